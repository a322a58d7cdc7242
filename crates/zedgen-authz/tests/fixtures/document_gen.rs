// Code generated by zedgen 0.1.0. DO NOT EDIT.
// source: platform/document

#![allow(dead_code)]

use zedgen_authz as authz;

/// Object type `platform/document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Document;

impl Document {
    /// Canonical object type path.
    pub const TYPE: authz::ObjectType = authz::ObjectType::from_static("platform/document");

    /// `relation owner: platform/user`
    pub const RELATION_OWNER: authz::Relation = authz::Relation::from_static("owner");

    /// `relation viewer: platform/user | platform/group:*`
    pub const RELATION_VIEWER: authz::Relation = authz::Relation::from_static("viewer");

    /// `permission view = owner + viewer`
    pub const PERMISSION_VIEW: authz::Permission = authz::Permission::from_static("view");

    /// Relations declared on `platform/document`.
    pub const RELATIONS: &'static [authz::Relation] = &[Self::RELATION_OWNER, Self::RELATION_VIEWER];

    /// Permissions declared on `platform/document`.
    pub const PERMISSIONS: &'static [authz::Permission] = &[Self::PERMISSION_VIEW];

    /// Subject types allowed on `owner`.
    pub const SUBJECTS_OWNER: &'static [authz::ObjectType] = &[authz::ObjectType::from_static("platform/user")];

    /// Subject types allowed on `viewer`.
    pub const SUBJECTS_VIEWER: &'static [authz::ObjectType] = &[authz::ObjectType::from_static("platform/user"), authz::ObjectType::from_static("platform/group")];

    /// Reference to one `platform/document` object.
    pub fn resource(id: impl ::core::convert::Into<authz::ObjectId>) -> authz::Resource {
        authz::Resource::new(Self::TYPE, id)
    }

    /// Subject types allowed on `relation`; empty for relations not declared here.
    pub fn subject_types(relation: &authz::Relation) -> &'static [authz::ObjectType] {
        match relation.as_str() {
            "owner" => Self::SUBJECTS_OWNER,
            "viewer" => Self::SUBJECTS_VIEWER,
            _ => &[],
        }
    }
}
