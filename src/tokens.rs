//! Message tokens.
//!
//! A token is the key a host uses to look up a localized error message. This
//! crate never renders message text itself.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Key of a human-readable validation message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageToken(Cow<'static, str>);

impl MessageToken {
    /// A token known at compile time.
    pub const fn from_static(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    pub fn new(key: impl Into<String>) -> Self {
        Self(Cow::Owned(key.into()))
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageToken {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for MessageToken {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}

pub const REQUIRED: MessageToken = MessageToken::from_static("required");
pub const EMAIL: MessageToken = MessageToken::from_static("email");
pub const MAXIMUM_LENGTH: MessageToken = MessageToken::from_static("maximum_length");
pub const MINIMUM_LENGTH: MessageToken = MessageToken::from_static("minimum_length");
pub const RANGE_LENGTH: MessageToken = MessageToken::from_static("range_length");
pub const MIN_VALUE: MessageToken = MessageToken::from_static("min_value");
pub const MAX_VALUE: MessageToken = MessageToken::from_static("max_value");
pub const GREATER_THAN_ZERO: MessageToken = MessageToken::from_static("greater_than_zero");
pub const GREATER_OR_EQUAL_TO_ZERO: MessageToken =
    MessageToken::from_static("greater_or_equal_to_zero");
pub const REGEX: MessageToken = MessageToken::from_static("regex");
pub const FIELD_EQUALITY: MessageToken = MessageToken::from_static("field_equality");
