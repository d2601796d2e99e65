use operation::ResponseKey;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Default)]
pub struct ErrorPath(Vec<ErrorPathSegment>);

impl std::ops::Deref for ErrorPath {
    type Target = Vec<ErrorPathSegment>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for ErrorPath {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub enum ErrorPathSegment {
    Field(ResponseKey),
    Index(usize),
}

impl serde::Serialize for ErrorPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

impl serde::Serialize for ErrorPathSegment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ErrorPathSegment::Field(key) => serializer.serialize_str(key),
            ErrorPathSegment::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

pub trait InsertIntoErrorPath {
    fn insert_into(self, path: &mut ErrorPath);
}

impl InsertIntoErrorPath for ErrorPathSegment {
    fn insert_into(self, path: &mut ErrorPath) {
        path.0.push(self);
    }
}

impl InsertIntoErrorPath for ResponseKey {
    fn insert_into(self, path: &mut ErrorPath) {
        path.0.push(ErrorPathSegment::Field(self));
    }
}

impl InsertIntoErrorPath for &ResponseKey {
    fn insert_into(self, path: &mut ErrorPath) {
        path.0.push(ErrorPathSegment::Field(self.clone()));
    }
}

impl InsertIntoErrorPath for usize {
    fn insert_into(self, path: &mut ErrorPath) {
        path.0.push(ErrorPathSegment::Index(self));
    }
}

trait InsertAllIntoErrorPath {
    fn insert_all_into(self, path: &mut ErrorPath);
}

impl<T: InsertIntoErrorPath> InsertAllIntoErrorPath for T {
    fn insert_all_into(self, path: &mut ErrorPath) {
        self.insert_into(path);
    }
}

impl<T: InsertIntoErrorPath> InsertAllIntoErrorPath for Vec<T> {
    fn insert_all_into(self, path: &mut ErrorPath) {
        for item in self {
            item.insert_into(path);
        }
    }
}

impl<T1: InsertAllIntoErrorPath, T2: InsertAllIntoErrorPath> InsertAllIntoErrorPath for (T1, T2) {
    fn insert_all_into(self, path: &mut ErrorPath) {
        self.0.insert_all_into(path);
        self.1.insert_all_into(path);
    }
}

impl<T1: InsertAllIntoErrorPath, T2: InsertAllIntoErrorPath, T3: InsertAllIntoErrorPath> InsertAllIntoErrorPath
    for (T1, T2, T3)
{
    fn insert_all_into(self, path: &mut ErrorPath) {
        self.0.insert_all_into(path);
        self.1.insert_all_into(path);
        self.2.insert_all_into(path);
    }
}

impl<T: InsertAllIntoErrorPath> From<T> for ErrorPath {
    fn from(t: T) -> Self {
        let mut path = ErrorPath(Vec::new());
        t.insert_all_into(&mut path);
        path
    }
}

impl FromIterator<ErrorPathSegment> for ErrorPath {
    fn from_iter<I: IntoIterator<Item = ErrorPathSegment>>(iter: I) -> Self {
        ErrorPath(iter.into_iter().collect())
    }
}
