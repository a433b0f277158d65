//! Purpose: Error model shared by the core, the C ABI and the host bindings.
//! Exports: `Error`, `ErrorKind`, `to_status_code`.
//! Role: Single error type; hosts translate it into their native error objects.
//! Invariants: Status codes are stable once published; kinds are additive-only.
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    InvalidArgument,
    NotFound,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    index: Option<usize>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            index: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Zero-based position of the offending argument, when one is to blame.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(index) = self.index {
            write!(f, " (arg: {index})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_status_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::InvalidArgument => 2,
        ErrorKind::NotFound => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_status_code};
    use std::error::Error as _;

    #[test]
    fn status_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Internal, 1),
            (ErrorKind::InvalidArgument, 2),
            (ErrorKind::NotFound, 3),
        ];

        for (kind, code) in cases {
            assert_eq!(to_status_code(kind), code);
        }
    }

    #[test]
    fn display_includes_message_and_index() {
        let err = Error::new(ErrorKind::InvalidArgument)
            .with_message("square() argument 1 must be a real number, not string")
            .with_index(0);
        assert_eq!(
            err.to_string(),
            "InvalidArgument: square() argument 1 must be a real number, not string (arg: 0)"
        );

        let bare = Error::new(ErrorKind::Internal);
        assert_eq!(bare.to_string(), "Internal");
        assert!(bare.message().is_none());
        assert!(bare.index().is_none());
    }

    #[test]
    fn source_is_chained() {
        let parse = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err = Error::new(ErrorKind::InvalidArgument)
            .with_message("invalid json")
            .with_source(parse);
        assert!(err.source().is_some());
    }
}
