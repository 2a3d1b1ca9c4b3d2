//! A [`prompt::Message`] and its [`Role`]. The API returns the same shape
//! inside a [`Choice`], with metadata alongside.
//!
//! [`prompt::Message`]: crate::prompt::Message
//! [`Choice`]: crate::response::Choice

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role of the [`Message`] author.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Instructions the model gives special attention to.
    System,
    /// From the user.
    User,
    /// From the AI.
    Assistant,
}

impl Role {
    /// Get the string representation of the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in a [`Prompt`]. See [`response::Choice`] for the version the
/// API returns.
///
/// A message is [`Display`]ed as markdown with a [heading] indicating the
/// [`Role`] of the author.
///
/// [`Display`]: std::fmt::Display
/// [`Prompt`]: crate::Prompt
/// [`response::Choice`]: crate::response::Choice
/// [heading]: Message::HEADING
#[derive(Debug, Clone, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(test, derive(PartialEq))]
#[display("{}{}{}{}", Self::HEADING, role, Self::SEP, content)]
pub struct Message<'a> {
    /// Who is the message from.
    pub role: Role,
    /// The text content of the message.
    pub content: Cow<'a, str>,
}

impl Message<'_> {
    /// Heading for the message when rendered as markdown using [`Display`].
    ///
    /// [`Display`]: std::fmt::Display
    pub const HEADING: &'static str = "### ";

    /// Separator between the heading and the content.
    pub const SEP: &'static str = "\n\n";

    /// Convert to a `'static` lifetime by taking ownership of the [`Cow`]
    /// content.
    pub fn into_static(self) -> Message<'static> {
        Message {
            role: self.role,
            content: Cow::Owned(self.content.into_owned()),
        }
    }
}

impl<'a, T> From<(Role, T)> for Message<'a>
where
    T: Into<Cow<'a, str>>,
{
    fn from((role, content): (Role, T)) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::System.as_str(), "System");
        assert_eq!(Role::User.as_str(), "User");
        assert_eq!(Role::Assistant.as_str(), "Assistant");
        assert_eq!(Role::User.to_string(), "User");
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        let role: Role = serde_json::from_str(r#""assistant""#).unwrap();
        assert_eq!(role, Role::Assistant);
    }

    #[test]
    fn test_from_tuple() {
        let message: Message = (Role::User, "Hello").into();
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "Hello");

        // Owned content also converts.
        let message: Message = (Role::User, "Hello".to_string()).into();
        assert!(matches!(message.content, Cow::Owned(_)));
    }

    #[test]
    fn test_display() {
        let message: Message = (Role::User, "Hello").into();
        assert_eq!(message.to_string(), "### User\n\nHello");
    }

    #[test]
    fn test_into_static() {
        let content = "Hello".to_string();
        let message: Message = (Role::User, content.as_str()).into();
        let owned: Message<'static> = message.into_static();
        assert_eq!(owned.content, "Hello");
    }

    #[test]
    fn test_serde() {
        let message: Message = (Role::User, "Hello").into();
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Hello"}"#);

        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}
