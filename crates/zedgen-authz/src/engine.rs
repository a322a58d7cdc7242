//! Engine trait definition.

use async_trait::async_trait;

use crate::error::{AuthzError, AuthzResult};
use crate::types::{ObjectId, ObjectType, Permission, Relation, Resource, Subject};

/// Backend answering relationship and permission requests.
///
/// There is no process-wide default: callers construct an engine and pass
/// it to whatever needs one.
#[async_trait]
pub trait Engine: Send + Sync + 'static {
    /// Relates every subject id to `resource` through `relation`.
    async fn create_relations(
        &self,
        resource: &Resource,
        relation: &Relation,
        subject: &Subject,
    ) -> AuthzResult<()>;

    /// Succeeds when every subject id holds `permission` on `resource`.
    ///
    /// Fails with [`AuthzError::PermissionDenied`] for the first subject
    /// that does not.
    async fn check_permission(
        &self,
        resource: &Resource,
        permission: &Permission,
        subject: &Subject,
    ) -> AuthzResult<()>;

    /// Ids of `object_type` objects on which any subject id holds `permission`.
    async fn lookup_resources(
        &self,
        object_type: &ObjectType,
        permission: &Permission,
        subject: &Subject,
    ) -> AuthzResult<Vec<ObjectId>>;

    /// Ids of `subject_type` objects holding `permission` on `resource`.
    async fn lookup_subjects(
        &self,
        resource: &Resource,
        permission: &Permission,
        subject_type: &ObjectType,
    ) -> AuthzResult<Vec<ObjectId>>;

    /// Ids of `subject_type` objects directly related to `resource`.
    async fn read_relations(
        &self,
        resource: &Resource,
        relation: &Relation,
        subject_type: &ObjectType,
    ) -> AuthzResult<Vec<ObjectId>>;

    /// Removes the relationships written by [`Engine::create_relations`].
    async fn delete_relations(
        &self,
        resource: &Resource,
        relation: &Relation,
        subject: &Subject,
    ) -> AuthzResult<()>;

    /// Like [`Engine::check_permission`], with denial reported as `false`.
    async fn has_permission(
        &self,
        resource: &Resource,
        permission: &Permission,
        subject: &Subject,
    ) -> AuthzResult<bool> {
        match self.check_permission(resource, permission, subject).await {
            Ok(()) => Ok(true),
            Err(AuthzError::PermissionDenied { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
