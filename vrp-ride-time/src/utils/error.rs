use std::fmt::{Display, Formatter};

/// An error with a human readable message, used where callers are not expected to match on error
/// kinds: building features, reading config, validating input data.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GenericError(String);

/// A result with [`GenericError`].
pub type GenericResult<T> = Result<T, GenericError>;

impl GenericError {
    /// Joins messages of many errors into one message.
    pub fn join_many(errs: &[GenericError], separator: &str) -> String {
        errs.iter().map(|GenericError(msg)| msg.as_str()).collect::<Vec<_>>().join(separator)
    }
}

impl Display for GenericError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl std::error::Error for GenericError {}

impl From<String> for GenericError {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

impl From<&str> for GenericError {
    fn from(msg: &str) -> Self {
        Self(msg.to_string())
    }
}
