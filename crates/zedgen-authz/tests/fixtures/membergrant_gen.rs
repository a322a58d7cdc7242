// Code generated by zedgen 0.1.0. DO NOT EDIT.
// source: acl/relation/member_grant

#![allow(dead_code)]

use zedgen_authz as authz;

/// Object type `acl/relation/member_grant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relation;

impl Relation {
    /// Canonical object type path.
    pub const TYPE: authz::ObjectType = authz::ObjectType::from_static("acl/relation/member_grant");

    /// `relation grantee: acl/user | acl/team:*`
    pub const RELATION_GRANTEE: authz::Relation = authz::Relation::from_static("grantee");

    /// `permission use_grant = grantee`
    pub const PERMISSION_USE_GRANT: authz::Permission = authz::Permission::from_static("use_grant");

    /// Relations declared on `acl/relation/member_grant`.
    pub const RELATIONS: &'static [authz::Relation] = &[Self::RELATION_GRANTEE];

    /// Permissions declared on `acl/relation/member_grant`.
    pub const PERMISSIONS: &'static [authz::Permission] = &[Self::PERMISSION_USE_GRANT];

    /// Subject types allowed on `grantee`.
    pub const SUBJECTS_GRANTEE: &'static [authz::ObjectType] = &[authz::ObjectType::from_static("acl/user"), authz::ObjectType::from_static("acl/team")];

    /// Reference to one `acl/relation/member_grant` object.
    pub fn resource(id: impl ::core::convert::Into<authz::ObjectId>) -> authz::Resource {
        authz::Resource::new(Self::TYPE, id)
    }

    /// Subject types allowed on `relation`; empty for relations not declared here.
    pub fn subject_types(relation: &authz::Relation) -> &'static [authz::ObjectType] {
        match relation.as_str() {
            "grantee" => Self::SUBJECTS_GRANTEE,
            _ => &[],
        }
    }
}
