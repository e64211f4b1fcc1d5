//! Error types for the sample toolkit.
//!
//! A single crate-wide [`Error`] enum covers template lookup failures,
//! identity-cache configuration failures, simplification failures, and the
//! two classes of tabular-format failure: recoverable cell-value errors
//! (which the parser downgrades to raw strings) and everything else (which
//! aborts the parse).
//!
//! ## Examples
//!
//! ```rust
//! use specimen::{Error, TemplateStore, TypeTag};
//!
//! let store = TemplateStore::empty();
//! let err = store.attributes(&TypeTag::nominal("Missing"), Default::default());
//! assert!(matches!(err, Err(Error::UnknownType(_))));
//! ```

use crate::TypeTag;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the sample toolkit.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A type descriptor was requested that has no registered template.
    #[error("no template registered for {0}")]
    UnknownType(TypeTag),

    /// An identity cache was constructed without an identify function.
    #[error("no identify function supplied")]
    NoIdentify,

    /// An instance could not be flattened into an attribute mapping.
    #[error("cannot simplify {type_name}: {value}")]
    CannotSimplify { type_name: String, value: String },

    /// A declared column type name matched neither a configured named parser
    /// nor an intrinsic one.
    #[error("unknown type name: {0:?}")]
    UnknownTypeName(String),

    /// A cell's text was not valid for the column's value parser.
    ///
    /// This is the only error kind the tabular parser recovers from: the
    /// offending cell falls back to its raw text and parsing continues.
    #[error("invalid value {text:?}: {msg}")]
    InvalidValue { text: String, msg: String },

    /// Materialization into a concrete type failed, or an instance could not
    /// be converted to a [`Value`](crate::Value).
    ///
    /// Wraps the serde-level message unmodified: a template/constructor
    /// mismatch is a template-authoring defect surfaced to the caller.
    #[error("{0}")]
    Build(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an unknown-type error for an unregistered type descriptor.
    pub fn unknown_type(tag: &TypeTag) -> Self {
        Error::UnknownType(tag.clone())
    }

    /// Creates a cannot-simplify error naming the offending type and value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use specimen::{Error, Value};
    ///
    /// let err = Error::cannot_simplify("i64", &Value::from(1));
    /// assert_eq!(err.to_string(), "cannot simplify i64: 1");
    /// ```
    pub fn cannot_simplify(type_name: &str, value: &crate::Value) -> Self {
        Error::CannotSimplify {
            type_name: type_name.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a recoverable invalid-value error for a malformed cell.
    ///
    /// Column parsers should return this (and only this) to request the
    /// raw-text fallback; any other error aborts the parse.
    pub fn invalid_value(text: &str, msg: impl fmt::Display) -> Self {
        Error::InvalidValue {
            text: text.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Build(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Build(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
