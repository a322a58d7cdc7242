//! Normalized definitions handed to the code emitter.

use std::collections::BTreeMap;
use std::fmt;

use crate::syntax::{ObjectType, PermissionDecl, RelationExpr};

/// One allowed subject type of a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectType {
    /// Path of the subject's object type (e.g., "platform/user").
    pub object_type: String,
    /// Any subject of the type is allowed (`platform/user:*`).
    pub wildcard: bool,
}

impl SubjectType {
    pub fn new(object_type: impl Into<String>, wildcard: bool) -> Self {
        Self {
            object_type: object_type.into(),
            wildcard,
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.object_type)?;
        if self.wildcard {
            f.write_str(":*")?;
        }
        Ok(())
    }
}

/// A relation with its union flattened into subject types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRelation {
    pub name: String,
    /// Leaves of the relation expression, left to right, duplicates kept.
    pub subject_types: Vec<SubjectType>,
    /// The expression as written, for documentation.
    pub expression: RelationExpr,
}

/// A definition resolved for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDefinition {
    /// Last path segment of the definition.
    pub name: String,
    /// Leading path segments.
    pub prefixes: Vec<String>,
    /// Relations in declaration order.
    pub relations: Vec<NormalizedRelation>,
    /// Permissions in declaration order, expression trees untouched.
    pub permissions: Vec<PermissionDecl>,
}

impl NormalizedDefinition {
    pub fn object_type(&self) -> ObjectType {
        ObjectType::new(self.name.clone(), self.prefixes.clone())
    }

    /// Canonical `/`-joined path.
    pub fn path(&self) -> String {
        self.object_type().to_string()
    }

    pub fn relation(&self, name: &str) -> Option<&NormalizedRelation> {
        self.relations.iter().find(|r| r.name == name)
    }

    pub fn permission(&self, name: &str) -> Option<&PermissionDecl> {
        self.permissions.iter().find(|p| p.name == name)
    }

    /// Subject type paths allowed on `relation`.
    pub fn subject_types(&self, relation: &str) -> Option<Vec<&str>> {
        self.relation(relation).map(|r| {
            r.subject_types
                .iter()
                .map(|s| s.object_type.as_str())
                .collect()
        })
    }
}

/// Normalized definitions keyed by short name, iterated in name order.
pub type NormalizedModel = BTreeMap<String, NormalizedDefinition>;
