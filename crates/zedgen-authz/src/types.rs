//! Value types shared by generated code and engines.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AuthzError, AuthzResult};

/// Declares a string-backed name usable in `const` items.
macro_rules! static_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            pub const fn from_static(name: &'static str) -> Self {
                Self(Cow::Borrowed(name))
            }

            pub fn new(name: impl Into<String>) -> Self {
                Self(Cow::Owned(name.into()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&'static str> for $name {
            fn from(name: &'static str) -> Self {
                Self::from_static(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::new(name)
            }
        }
    };
}

static_name!(
    /// Canonical object type path, e.g. `platform/user`.
    ObjectType
);

static_name!(
    /// Name of a relation declared on an object type.
    Relation
);

static_name!(
    /// Name of a permission declared on an object type.
    Permission
);

/// Identifier of one object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

/// One concrete object: `platform/user:alice`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub object_type: ObjectType,
    pub id: ObjectId,
}

impl Resource {
    pub fn new(object_type: ObjectType, id: impl Into<ObjectId>) -> Self {
        Self {
            object_type,
            id: id.into(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.id)
    }
}

/// Several objects of one type acting as subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub object_type: ObjectType,
    pub ids: Vec<ObjectId>,
}

impl Subject {
    pub fn new<I, T>(object_type: ObjectType, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ObjectId>,
    {
        Self {
            object_type,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// The subject's ids, or [`AuthzError::NoInput`] when there are none.
    pub fn require_ids(&self) -> AuthzResult<&[ObjectId]> {
        if self.ids.is_empty() {
            return Err(AuthzError::NoInput);
        }
        Ok(&self.ids)
    }

    /// One resource per subject id.
    pub fn resources(&self) -> impl Iterator<Item = Resource> + '_ {
        self.ids
            .iter()
            .map(|id| Resource::new(self.object_type.clone(), id.clone()))
    }
}

/// Converts domain identifiers into object ids.
pub fn ids<I, T>(ids: I) -> Vec<ObjectId>
where
    I: IntoIterator<Item = T>,
    T: Into<ObjectId>,
{
    ids.into_iter().map(Into::into).collect()
}

/// Converts object ids back into domain identifiers.
pub fn from_ids<T, I>(ids: I) -> Vec<T>
where
    I: IntoIterator<Item = ObjectId>,
    T: From<ObjectId>,
{
    ids.into_iter().map(T::from).collect()
}
