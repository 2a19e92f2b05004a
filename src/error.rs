//! Errors raised by either mapper generation or by a store client.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapperError {
    #[error("attribute '{0}' is missing from the item")]
    MissingAttribute(String),

    #[error("attribute '{attribute}' has the wrong type: expected {expected}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
    },

    #[error("attribute '{attribute}' is not a valid number: {value}")]
    InvalidNumber { attribute: String, value: String },

    #[error("item for table '{table}' has no hash key '{key}'")]
    MissingKey { table: String, key: String },

    #[error("legacy marshalling failed: {0}")]
    Marshal(String),

    #[error("legacy mapper cannot represent value: {0}")]
    Unsupported(String),

    #[error("store client failed: {0}")]
    Client(String),
}

// The legacy marshaller is a serde data format, so serde reports its own
// failures (wrong types, unknown variants) through these.
impl serde::ser::Error for MapperError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        MapperError::Marshal(msg.to_string())
    }
}

impl serde::de::Error for MapperError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        MapperError::Marshal(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MapperError>;
