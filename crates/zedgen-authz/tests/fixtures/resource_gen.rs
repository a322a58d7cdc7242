// Code generated by zedgen 0.1.0. DO NOT EDIT.
// source: resource

#![allow(dead_code)]

use zedgen_authz as authz;

/// Object type `resource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resource;

impl Resource {
    /// Canonical object type path.
    pub const TYPE: authz::ObjectType = authz::ObjectType::from_static("resource");

    /// `relation owner: user`
    pub const RELATION_OWNER: authz::Relation = authz::Relation::from_static("owner");

    /// `permission manage = owner`
    pub const PERMISSION_MANAGE: authz::Permission = authz::Permission::from_static("manage");

    /// Relations declared on `resource`.
    pub const RELATIONS: &'static [authz::Relation] = &[Self::RELATION_OWNER];

    /// Permissions declared on `resource`.
    pub const PERMISSIONS: &'static [authz::Permission] = &[Self::PERMISSION_MANAGE];

    /// Subject types allowed on `owner`.
    pub const SUBJECTS_OWNER: &'static [authz::ObjectType] = &[authz::ObjectType::from_static("user")];

    /// Reference to one `resource` object.
    pub fn resource(id: impl ::core::convert::Into<authz::ObjectId>) -> authz::Resource {
        authz::Resource::new(Self::TYPE, id)
    }

    /// Subject types allowed on `relation`; empty for relations not declared here.
    pub fn subject_types(relation: &authz::Relation) -> &'static [authz::ObjectType] {
        match relation.as_str() {
            "owner" => Self::SUBJECTS_OWNER,
            _ => &[],
        }
    }
}
