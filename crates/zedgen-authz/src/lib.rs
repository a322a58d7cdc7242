//! zedgen-authz: runtime types for zedgen generated code
//!
//! Generated modules expose their object type, relations and permissions as
//! constants of the types defined here. Requests go through an [`Engine`]
//! owned by the caller.
//!
//! ```
//! use zedgen_authz::{ObjectType, Relation, Resource};
//!
//! const USER: ObjectType = ObjectType::from_static("platform/user");
//! const OWNER: Relation = Relation::from_static("owner");
//!
//! let alice = Resource::new(USER, "alice");
//! assert_eq!(alice.to_string(), "platform/user:alice");
//! assert_eq!(OWNER.as_str(), "owner");
//! ```

pub mod engine;
pub mod error;
pub mod types;

pub use engine::Engine;
pub use error::{AuthzError, AuthzResult};
pub use types::{from_ids, ids, ObjectId, ObjectType, Permission, Relation, Resource, Subject};
