use thiserror::Error;

/// Error taxonomy for catalog synthesis and light-curve handling.
///
/// Each variant maps to a stable process exit code so scripted callers can
/// tell configuration mistakes apart from data problems.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Invalid trait combination or option value, rejected at construction
    /// time rather than producing silent NaNs at evaluation time.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A serialized light-curve code that cannot be parsed back into a model.
    #[error("malformed light-curve code: {0}")]
    MalformedCode(String),

    /// An empirical table is missing or empty at first load.
    #[error("empirical data unavailable: {0}")]
    DataUnavailable(String),

    /// Filesystem or serialization failure while reading/writing catalogs.
    #[error("i/o error: {0}")]
    Io(String),
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Configuration(_) => 2,
            Error::MalformedCode(_) => 3,
            Error::DataUnavailable(_) => 4,
            Error::Io(_) => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(Error::Configuration("x".into()).exit_code(), 2);
        assert_eq!(Error::MalformedCode("x".into()).exit_code(), 3);
        assert_eq!(Error::DataUnavailable("x".into()).exit_code(), 4);
        assert_eq!(Error::Io("x".into()).exit_code(), 5);
    }
}
