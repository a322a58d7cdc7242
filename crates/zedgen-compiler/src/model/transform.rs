//! Semantic transformation from parsed definitions to the normalized model.
//!
//! For each definition:
//! - the path is split into `prefixes` and `name`
//! - every relation union is flattened into its ordered subject types
//! - permission trees are carried over unchanged
//!
//! Referenced relations and permissions are not checked against other
//! definitions. Collisions that would make the emitted code ambiguous are
//! rejected: two definitions sharing a short name, and repeated member names.
//! So are paths whose derived type or module name is not a Rust identifier.

use std::collections::btree_map::Entry;
use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::codegen::naming::{self, is_identifier};
use crate::syntax::{Definition, RelationExpr};

use super::normalized::{NormalizedDefinition, NormalizedModel, NormalizedRelation, SubjectType};

/// Semantic errors found while normalizing definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Two definitions normalize to the same short name.
    #[error("definitions '{first}' and '{second}' both normalize to '{name}'")]
    DuplicateDefinition {
        name: String,
        first: String,
        second: String,
    },

    /// A relation name is declared twice in one definition.
    #[error("relation '{relation}' is declared more than once in '{definition}'")]
    DuplicateRelation {
        definition: String,
        relation: String,
    },

    /// A permission name is declared twice in one definition.
    #[error("permission '{permission}' is declared more than once in '{definition}'")]
    DuplicatePermission {
        definition: String,
        permission: String,
    },

    /// A name cannot be used in generated source.
    #[error("invalid {kind} name '{name}' in '{definition}' (line {line}, column {column})")]
    InvalidName {
        kind: &'static str,
        name: String,
        definition: String,
        line: usize,
        column: usize,
    },
}

/// Result type for transformation.
pub type TransformResult<T> = Result<T, TransformError>;

/// Flattens a relation expression into its subject types, left to right.
pub fn flatten_relation(expression: &RelationExpr) -> Vec<SubjectType> {
    let mut subject_types = Vec::new();
    collect_subject_types(expression, &mut subject_types);
    subject_types
}

fn collect_subject_types(expression: &RelationExpr, out: &mut Vec<SubjectType>) {
    match expression {
        RelationExpr::Single { value, wildcard } => {
            out.push(SubjectType::new(value.clone(), *wildcard));
        }
        RelationExpr::Union(left, right) => {
            collect_subject_types(left, out);
            collect_subject_types(right, out);
        }
    }
}

/// Subject type paths of a relation expression, without wildcard markers.
pub fn flatten_subject_types(expression: &RelationExpr) -> Vec<String> {
    flatten_relation(expression)
        .into_iter()
        .map(|s| s.object_type)
        .collect()
}

/// Normalizes one definition.
pub fn normalize_definition(definition: &Definition) -> TransformResult<NormalizedDefinition> {
    let path = definition.object_type.to_string();
    let invalid = |kind: &'static str, name: &str| TransformError::InvalidName {
        kind,
        name: name.to_string(),
        definition: path.clone(),
        line: definition.line,
        column: definition.column,
    };

    if !definition.object_type.segments().all(is_identifier) {
        return Err(invalid("definition", &path));
    }
    let type_name = naming::type_name(&path);
    if !naming::is_item_name(&type_name) {
        return Err(invalid("type", &type_name));
    }
    let module_name = naming::module_name(&definition.object_type.name);
    if !naming::is_item_name(&module_name) {
        return Err(invalid("module", &module_name));
    }

    // Members are emitted as upper-cased constants; compare on that form.
    let mut seen = HashSet::new();
    let mut relations = Vec::with_capacity(definition.relations.len());
    for relation in &definition.relations {
        if !is_identifier(&relation.name) {
            return Err(invalid("relation", &relation.name));
        }
        if !seen.insert(naming::screaming_snake(&relation.name)) {
            return Err(TransformError::DuplicateRelation {
                definition: path.clone(),
                relation: relation.name.clone(),
            });
        }
        relations.push(NormalizedRelation {
            name: relation.name.clone(),
            subject_types: flatten_relation(&relation.expression),
            expression: relation.expression.clone(),
        });
    }

    let mut seen = HashSet::new();
    for permission in &definition.permissions {
        if !is_identifier(&permission.name) {
            return Err(invalid("permission", &permission.name));
        }
        if !seen.insert(naming::screaming_snake(&permission.name)) {
            return Err(TransformError::DuplicatePermission {
                definition: path.clone(),
                permission: permission.name.clone(),
            });
        }
    }

    Ok(NormalizedDefinition {
        name: definition.object_type.name.clone(),
        prefixes: definition.object_type.prefix.clone(),
        relations,
        permissions: definition.permissions.clone(),
    })
}

/// Normalizes every definition, keyed by short name.
pub fn transform(definitions: &[Definition]) -> TransformResult<NormalizedModel> {
    let mut model = NormalizedModel::new();
    for definition in definitions {
        let normalized = normalize_definition(definition)?;
        debug!(
            definition = %definition.object_type,
            relations = normalized.relations.len(),
            permissions = normalized.permissions.len(),
            "normalized definition"
        );
        match model.entry(normalized.name.clone()) {
            Entry::Occupied(existing) => {
                return Err(TransformError::DuplicateDefinition {
                    name: normalized.name.clone(),
                    first: existing.get().path(),
                    second: normalized.path(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(normalized);
            }
        }
    }
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{parse_schema, Operator, PermExpr, PermissionDecl, RelationDecl};

    fn transform_schema(input: &str) -> TransformResult<NormalizedModel> {
        transform(&parse_schema(input).expect("schema should parse"))
    }

    #[test]
    fn test_flatten_single_relation() {
        assert_eq!(flatten_subject_types(&RelationExpr::single("user")), vec!["user"]);
    }

    #[test]
    fn test_flatten_union_relation() {
        let expression = RelationExpr::union(
            RelationExpr::single("private_forum"),
            RelationExpr::single("public_forum"),
        );
        assert_eq!(
            flatten_subject_types(&expression),
            vec!["private_forum", "public_forum"]
        );
    }

    #[test]
    fn test_flatten_keeps_duplicates_and_wildcards() {
        let expression = RelationExpr::union(
            RelationExpr::union(RelationExpr::single("user"), RelationExpr::wildcard("user")),
            RelationExpr::single("user"),
        );
        let flattened = flatten_relation(&expression);
        assert_eq!(
            flattened,
            vec![
                SubjectType::new("user", false),
                SubjectType::new("user", true),
                SubjectType::new("user", false),
            ]
        );
        assert_eq!(flattened[1].to_string(), "user:*");
    }

    #[test]
    fn test_transform_definitions() {
        let definitions = vec![Definition {
            object_type: crate::syntax::ObjectType::from_path("user"),
            relations: vec![RelationDecl {
                name: "friend".into(),
                expression: RelationExpr::single("user"),
            }],
            permissions: vec![PermissionDecl {
                name: "edit".into(),
                expression: PermExpr::identifier("friend"),
            }],
            line: 1,
            column: 1,
        }];

        let model = transform(&definitions).unwrap();
        assert_eq!(model.len(), 1);
        let user = &model["user"];
        assert_eq!(user.relations.len(), 1);
        assert_eq!(user.permissions.len(), 1);
        assert_eq!(user.subject_types("friend"), Some(vec!["user"]));
    }

    #[test]
    fn test_transform_splits_prefixes() {
        let model = transform_schema("definition namespace/platform/user {}").unwrap();
        let user = &model["user"];
        assert_eq!(user.name, "user");
        assert_eq!(user.prefixes, vec!["namespace", "platform"]);
        assert_eq!(user.path(), "namespace/platform/user");
    }

    #[test]
    fn test_permissions_are_carried_unchanged() {
        let model = transform_schema(
            "definition forum { relation global: platform \
             permission edit = owner + global->admin }",
        )
        .unwrap();
        let edit = model["forum"].permission("edit").unwrap();
        assert_eq!(
            edit.expression,
            PermExpr::binary(
                Operator::Union,
                PermExpr::identifier("owner"),
                PermExpr::binary(
                    Operator::Arrow,
                    PermExpr::identifier("global"),
                    PermExpr::identifier("admin"),
                ),
            )
        );
    }

    #[test]
    fn test_relation_and_permission_may_share_a_name() {
        let model =
            transform_schema("definition doc { relation view: user permission view = view }");
        assert!(model.is_ok());
    }

    #[test]
    fn test_colliding_short_names_are_rejected() {
        let err = transform_schema("definition a/user {}\ndefinition b/user {}").unwrap_err();
        assert_eq!(
            err,
            TransformError::DuplicateDefinition {
                name: "user".into(),
                first: "a/user".into(),
                second: "b/user".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_members_are_rejected() {
        let err = transform_schema("definition doc { relation owner: user relation Owner: group }")
            .unwrap_err();
        assert!(matches!(
            err,
            TransformError::DuplicateRelation { ref relation, .. } if relation == "Owner"
        ));

        let err = transform_schema("definition doc { permission view = a permission view = b }")
            .unwrap_err();
        assert!(matches!(err, TransformError::DuplicatePermission { .. }));
    }

    #[test]
    fn test_members_colliding_after_upper_casing_are_rejected() {
        let err =
            transform_schema("definition road { relation straße: user relation strasse: user }")
                .unwrap_err();
        assert_eq!(
            err,
            TransformError::DuplicateRelation {
                definition: "road".into(),
                relation: "strasse".into(),
            }
        );

        let err =
            transform_schema("definition road { permission straße = a permission STRASSE = b }")
                .unwrap_err();
        assert!(matches!(err, TransformError::DuplicatePermission { .. }));
    }

    #[test]
    fn test_names_unusable_in_generated_code_are_rejected() {
        let cases = [
            "definition 9lives {}",
            "definition platform//user {}",
            "definition platform/ {}",
            "definition doc { relation a/b: user }",
            "definition doc { permission 1st = a }",
            "definition a/_1 {}",
            "definition _ {}",
            "definition a/__ {}",
            "definition self {}",
            "definition a/self/b {}",
            "definition _1 {}",
        ];
        for input in cases {
            let err = transform_schema(input).unwrap_err();
            assert!(
                matches!(err, TransformError::InvalidName { .. }),
                "expected InvalidName for {input:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_derived_names_are_reported() {
        let err = transform_schema("definition a/_1 {}").unwrap_err();
        assert_eq!(
            err,
            TransformError::InvalidName {
                kind: "type",
                name: "1".into(),
                definition: "a/_1".into(),
                line: 1,
                column: 1,
            }
        );

        let err = transform_schema("definition ns/box/_1 {}").unwrap_err();
        assert!(matches!(
            err,
            TransformError::InvalidName { kind: "module", ref name, .. } if name == "1_gen"
        ));
    }

    #[test]
    fn test_names_shared_with_runtime_types_are_accepted() {
        let model = transform_schema(
            "definition resource { relation owner: user } definition x/relation/y {}",
        )
        .unwrap();
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_model_iterates_in_name_order() {
        let model =
            transform_schema("definition zeta {} definition alpha {} definition mid {}").unwrap();
        let names: Vec<_> = model.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
