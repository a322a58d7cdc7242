// Code generated by zedgen 0.1.0. DO NOT EDIT.
// source: into

#![allow(dead_code)]

use zedgen_authz as authz;

/// Object type `into`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Into;

impl Into {
    /// Canonical object type path.
    pub const TYPE: authz::ObjectType = authz::ObjectType::from_static("into");

    /// Relations declared on `into`.
    pub const RELATIONS: &'static [authz::Relation] = &[];

    /// Permissions declared on `into`.
    pub const PERMISSIONS: &'static [authz::Permission] = &[];

    /// Reference to one `into` object.
    pub fn resource(id: impl ::core::convert::Into<authz::ObjectId>) -> authz::Resource {
        authz::Resource::new(Self::TYPE, id)
    }

    /// Subject types allowed on `relation`; empty for relations not declared here.
    pub fn subject_types(relation: &authz::Relation) -> &'static [authz::ObjectType] {
        match relation.as_str() {
            _ => &[],
        }
    }
}
