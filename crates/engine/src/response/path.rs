use error::{ErrorPath, ErrorPathSegment, InsertIntoErrorPath};
use operation::ResponseKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePathSegment {
    Field(ResponseKey),
    Index(usize),
}

/// Position of a value in the response, from the root. Appending a segment creates a new path
/// sharing its structure with the parent one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResponsePath(im::Vector<ResponsePathSegment>);

impl ResponsePath {
    #[must_use]
    pub fn child(&self, segment: impl Into<ResponsePathSegment>) -> ResponsePath {
        let mut path = self.0.clone();
        path.push_back(segment.into());
        ResponsePath(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResponsePathSegment> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ResponseKey> for ResponsePathSegment {
    fn from(key: ResponseKey) -> Self {
        ResponsePathSegment::Field(key)
    }
}

impl From<usize> for ResponsePathSegment {
    fn from(index: usize) -> Self {
        ResponsePathSegment::Index(index)
    }
}

impl std::fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                ResponsePathSegment::Field(key) => f.write_str(key)?,
                ResponsePathSegment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}

impl InsertIntoErrorPath for &ResponsePath {
    fn insert_into(self, path: &mut ErrorPath) {
        path.extend(self.0.iter().map(|segment| match segment {
            ResponsePathSegment::Field(key) => ErrorPathSegment::Field(key.clone()),
            ResponsePathSegment::Index(index) => ErrorPathSegment::Index(*index),
        }));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn children_share_their_parent() {
        let hero = ResponsePath::default().child(ResponseKey::from("hero"));
        let first = hero.child(ResponseKey::from("friends")).child(0);
        let second = hero.child(ResponseKey::from("friends")).child(1);

        assert_eq!(hero.to_string(), "hero");
        assert_eq!(first.to_string(), "hero.friends.0");
        assert_eq!(second.to_string(), "hero.friends.1");
        assert_eq!(ErrorPath::from(&first).len(), 3);
    }
}
