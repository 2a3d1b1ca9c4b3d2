//! [`Key`] is a wrapper around an OpenAI API key.

use zeroize::Zeroizing;

/// Error for when a key is empty or contains bytes that can't appear in an
/// API key.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InvalidKey {
    /// The key is empty (or only whitespace).
    #[error("API key is empty")]
    Empty,
    /// The key contains a byte outside printable ASCII, so it could never be
    /// sent as a header value.
    #[error("API key contains invalid byte {byte:#04x} at offset {at}")]
    InvalidByte {
        /// The offending byte.
        byte: u8,
        /// Byte offset of the offending byte within the (trimmed) key.
        at: usize,
    },
}

/// Stores an OpenAI API key. The key is zeroized on drop. The object features
/// a [`Display`] implementation that can be used to write out the key. **Be
/// sure to zeroize whatever you write it to**. Prefer [`Key::read`] to borrow
/// the key in place.
///
/// [`Debug`] is redacted and never writes the key.
///
/// [`Display`]: std::fmt::Display
/// [`Debug`]: std::fmt::Debug
pub struct Key {
    secret: Zeroizing<String>,
}

impl Key {
    /// Borrow the key.
    pub fn read(&self) -> &str {
        self.secret.as_str()
    }
}

impl TryFrom<String> for Key {
    type Error = InvalidKey;

    /// Create a new key from a string. The string is zeroized after
    /// conversion. Surrounding whitespace (such as a trailing newline from a
    /// key file) is trimmed. The key must be non-empty printable ASCII.
    fn try_from(s: String) -> Result<Self, Self::Error> {
        let secret = Zeroizing::new(s);
        let trimmed = secret.trim();

        if trimmed.is_empty() {
            return Err(InvalidKey::Empty);
        }

        if let Some((at, byte)) = trimmed
            .bytes()
            .enumerate()
            .find(|(_, b)| !(0x21..=0x7e).contains(b))
        {
            return Err(InvalidKey::InvalidByte { byte, at });
        }

        if trimmed.len() == secret.len() {
            Ok(Self { secret })
        } else {
            // The untrimmed original is zeroized on drop.
            let owned = Zeroizing::new(trimmed.to_string());
            Ok(Self { secret: owned })
        }
    }
}

impl std::fmt::Display for Key {
    /// Write out the key. Make sure to zeroize whatever you write it to if at
    /// all possible.
    ///
    /// Prefer [`Self::read`] to borrow the key in place.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.read())
    }
}

impl std::fmt::Debug for Key {
    /// Redacted. The key is never written by `Debug`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key(..)")
    }
}
