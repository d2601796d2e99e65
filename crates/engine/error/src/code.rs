use strum::EnumCount;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::FromRepr,
    strum_macros::EnumCount,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    BadRequest,
    InternalServerError,
    // Errors returned by resolvers
    FieldError,
    // Completion
    NonNullViolation,
    ListError,
    TypeResolutionError,
    SerializationError,
    // Execution
    FieldNotFound,
    OperationCancelled,
    LimitExceeded,
}

#[derive(Debug, Default)]
pub struct ErrorCodeCounter([u16; ErrorCode::COUNT]);

impl ErrorCodeCounter {
    pub fn from_errors(errors: &[super::GraphqlError]) -> Self {
        let mut counter = Self::default();
        for error in errors {
            counter.increment(error.code);
        }
        counter
    }

    pub fn increment(&mut self, code: ErrorCode) {
        self.0[code as usize] += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorCode, u16)> + '_ {
        self.0
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .filter_map(|(index, count)| Some((ErrorCode::from_repr(index)?, count)))
    }

    pub fn count(&self) -> usize {
        self.0.iter().map(|count| *count as usize).sum()
    }

    pub fn to_vec(&self) -> Vec<(ErrorCode, u16)> {
        self.iter().collect()
    }
}
