//! Compact representation of the GraphQL wrapping types of a named type.
//!
//! A GraphQL output type is a named type wrapped by any number of List and Non-Null
//! modifiers. `[[Int!]]!` is stored as the named type `Int` plus a [`Wrapping`] that records
//! whether the innermost type is required and, for each list from the innermost to the
//! outermost, whether that list is required.

use std::fmt;

/// At most this many list wrappers can be nested.
pub const MAX_LIST_WRAPPINGS: u8 = 11;

const INNER_IS_REQUIRED: u16 = 1;
const LIST_COUNT_SHIFT: u16 = 1;
const LIST_COUNT_MASK: u16 = 0b1111 << LIST_COUNT_SHIFT;
const LIST_FLAGS_SHIFT: u16 = 5;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Wrapping(u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListWrapping {
    RequiredList,
    NullableList,
}

impl Wrapping {
    pub fn new(required: bool) -> Self {
        if required { Self::required() } else { Self::nullable() }
    }

    pub fn nullable() -> Self {
        Wrapping(0)
    }

    pub fn required() -> Self {
        Wrapping(INNER_IS_REQUIRED)
    }

    #[must_use]
    pub fn list(self) -> Self {
        self.wrapped_by(ListWrapping::NullableList)
    }

    #[must_use]
    pub fn list_non_null(self) -> Self {
        self.wrapped_by(ListWrapping::RequiredList)
    }

    /// Adds a new outermost list wrapper.
    #[must_use]
    pub fn wrapped_by(self, list_wrapping: ListWrapping) -> Self {
        let count = self.list_count();
        assert!(count < MAX_LIST_WRAPPINGS, "too many nested list wrappers");
        let mut bits = (self.0 & !LIST_COUNT_MASK) | (u16::from(count + 1) << LIST_COUNT_SHIFT);
        if list_wrapping == ListWrapping::RequiredList {
            bits |= 1 << (LIST_FLAGS_SHIFT + u16::from(count));
        }
        Wrapping(bits)
    }

    pub fn list_count(self) -> u8 {
        ((self.0 & LIST_COUNT_MASK) >> LIST_COUNT_SHIFT) as u8
    }

    pub fn inner_is_required(self) -> bool {
        self.0 & INNER_IS_REQUIRED != 0
    }

    pub fn is_list(self) -> bool {
        self.list_count() > 0
    }

    /// Whether the outermost type is Non-Null.
    pub fn is_required(self) -> bool {
        match self.list_count() {
            0 => self.inner_is_required(),
            count => self.0 & (1 << (LIST_FLAGS_SHIFT + u16::from(count - 1))) != 0,
        }
    }

    pub fn is_nullable(self) -> bool {
        !self.is_required()
    }

    /// Removes the outermost Non-Null modifier, `[Int]!` becomes `[Int]`. No-op on a nullable
    /// wrapping.
    #[must_use]
    pub fn without_required(self) -> Self {
        match self.list_count() {
            0 => Wrapping(self.0 & !INNER_IS_REQUIRED),
            count => Wrapping(self.0 & !(1 << (LIST_FLAGS_SHIFT + u16::from(count - 1)))),
        }
    }

    /// Removes the outermost list, leaving the wrapping of its elements.
    pub fn pop_list_wrapping(&mut self) -> Option<ListWrapping> {
        let count = self.list_count();
        if count == 0 {
            return None;
        }
        let flag = 1 << (LIST_FLAGS_SHIFT + u16::from(count - 1));
        let list_wrapping = if self.0 & flag != 0 {
            ListWrapping::RequiredList
        } else {
            ListWrapping::NullableList
        };
        self.0 = (self.0 & !flag & !LIST_COUNT_MASK) | (u16::from(count - 1) << LIST_COUNT_SHIFT);
        Some(list_wrapping)
    }

    /// List wrappers from the innermost to the outermost.
    pub fn list_wrappings(self) -> impl DoubleEndedIterator<Item = ListWrapping> + ExactSizeIterator {
        (0..u16::from(self.list_count())).map(move |index| {
            if self.0 & (1 << (LIST_FLAGS_SHIFT + index)) != 0 {
                ListWrapping::RequiredList
            } else {
                ListWrapping::NullableList
            }
        })
    }

    pub fn type_display(self, name: &str) -> TypeDisplay<'_> {
        TypeDisplay { name, wrapping: self }
    }
}

impl fmt::Debug for Wrapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrapping({})", self.type_display("T"))
    }
}

pub struct TypeDisplay<'a> {
    name: &'a str,
    wrapping: Wrapping,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.wrapping.list_count() {
            f.write_str("[")?;
        }
        f.write_str(self.name)?;
        if self.wrapping.inner_is_required() {
            f.write_str("!")?;
        }
        for list_wrapping in self.wrapping.list_wrappings() {
            f.write_str("]")?;
            if list_wrapping == ListWrapping::RequiredList {
                f.write_str("!")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid type reference `{0}`")]
pub struct InvalidTypeReference(pub String);

/// Parses a type reference such as `[String!]!` into its named type and wrapping.
pub fn parse_type(ty: &str) -> Result<(&str, Wrapping), InvalidTypeReference> {
    parse_wrapped(ty).ok_or_else(|| InvalidTypeReference(ty.to_string()))
}

fn parse_wrapped(ty: &str) -> Option<(&str, Wrapping)> {
    let ty = ty.trim();
    let (ty, required) = match ty.strip_suffix('!') {
        Some(rest) => (rest.trim_end(), true),
        None => (ty, false),
    };

    if let Some(inner) = ty.strip_prefix('[') {
        let (name, wrapping) = parse_wrapped(inner.strip_suffix(']')?)?;
        if wrapping.list_count() >= MAX_LIST_WRAPPINGS {
            return None;
        }
        let list_wrapping = if required {
            ListWrapping::RequiredList
        } else {
            ListWrapping::NullableList
        };
        return Some((name, wrapping.wrapped_by(list_wrapping)));
    }

    let mut chars = ty.chars();
    let is_name = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_name.then_some((ty, Wrapping::new(required)))
}
