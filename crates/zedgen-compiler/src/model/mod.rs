//! Normalized model and the semantic transformation producing it.

mod normalized;
mod transform;

pub use normalized::{NormalizedDefinition, NormalizedModel, NormalizedRelation, SubjectType};
pub use transform::{
    flatten_relation, flatten_subject_types, normalize_definition, transform, TransformError,
    TransformResult,
};
