use std::{borrow::Borrow, sync::Arc};

/// The alias of a field or its name. Keys are cheap to clone, they are copied into every response
/// path and error path.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct ResponseKey(Arc<str>);

impl ResponseKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for ResponseKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for ResponseKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResponseKey {
    fn from(key: &str) -> Self {
        ResponseKey(key.into())
    }
}

impl From<String> for ResponseKey {
    fn from(key: String) -> Self {
        ResponseKey(key.into())
    }
}

impl std::fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for ResponseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}
