//! The plaintext being shared or recovered.

use std::borrow::Cow;
use std::fmt;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::codec::Codec;
use crate::crypto::is_zero_buffer;
use crate::error::{Error, Result};

/// How secret text is turned into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Hex,
    Base64,
}

/// An immutable, non-empty secret buffer, wiped on drop.
///
/// Caller-supplied secrets are never all zero bytes: the share format marks
/// where the payload starts with a leading one bit, so an all-zero payload is
/// indistinguishable from no payload at all.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    buffer: Vec<u8>,
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

impl Secret {
    /// Wrap raw bytes. Empty and all-zero buffers are rejected.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let buffer = bytes.into();
        if buffer.is_empty() {
            return Err(Error::argument("secret buffer cannot be empty"));
        }
        if is_zero_buffer(&buffer) {
            return Err(Error::argument("secret buffer cannot be a zero buffer"));
        }
        Ok(Self { buffer })
    }

    /// Wrap text after trimming surrounding whitespace and decoding it.
    pub fn from_text(text: &str, encoding: Encoding) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::argument("secret string cannot be empty"));
        }
        let bytes = match encoding {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Hex => hex::decode(text)
                .map_err(|e| Error::argument(format!("secret is not valid hex: {e}")))?,
            Encoding::Base64 => B64
                .decode(text)
                .map_err(|e| Error::argument(format!("secret is not valid base64: {e}")))?,
        };
        Self::new(bytes)
    }

    /// Wrap the output of a recovery. Only emptiness is an error here: a
    /// reconstruction from the wrong shares is returned as-is.
    pub(crate) fn recovered(bytes: Zeroizing<Vec<u8>>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::argument("recovered secret is empty"));
        }
        Ok(Self {
            buffer: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The secret's hex groups as used on the wire.
    pub fn to_hex(&self, codec: &Codec) -> String {
        codec.hex(&self.buffer)
    }

    /// The secret's bit string, before the length marker is added.
    pub fn to_binary(&self, codec: &Codec) -> Result<String> {
        codec.binary(&self.to_hex(codec), 16)
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

/// Everything a split accepts as its secret.
#[derive(Debug, Clone, Copy)]
pub enum SecretInput<'a> {
    /// UTF-8 text, trimmed before use.
    Text(&'a str),
    Bytes(&'a [u8]),
    Secret(&'a Secret),
}

impl<'a> SecretInput<'a> {
    /// Validate and wrap, borrowing when the input already is a [`Secret`].
    pub fn into_secret(self) -> Result<Cow<'a, Secret>> {
        self.into_secret_with(Encoding::Utf8)
    }

    /// Like [`into_secret`](Self::into_secret), decoding text with `encoding`.
    /// Bytes and secrets are taken as-is.
    pub fn into_secret_with(self, encoding: Encoding) -> Result<Cow<'a, Secret>> {
        match self {
            SecretInput::Text(text) => Secret::from_text(text, encoding).map(Cow::Owned),
            SecretInput::Bytes(bytes) => Secret::new(bytes).map(Cow::Owned),
            SecretInput::Secret(secret) => Ok(Cow::Borrowed(secret)),
        }
    }
}

impl<'a> From<&'a str> for SecretInput<'a> {
    fn from(text: &'a str) -> Self {
        SecretInput::Text(text)
    }
}

impl<'a> From<&'a String> for SecretInput<'a> {
    fn from(text: &'a String) -> Self {
        SecretInput::Text(text)
    }
}

impl<'a> From<&'a [u8]> for SecretInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        SecretInput::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for SecretInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        SecretInput::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for SecretInput<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        SecretInput::Bytes(bytes)
    }
}

impl<'a> From<&'a Secret> for SecretInput<'a> {
    fn from(secret: &'a Secret) -> Self {
        SecretInput::Secret(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_bytes() {
        let secret = Secret::new(b"secret key".to_vec()).unwrap();
        assert_eq!(secret.as_bytes(), b"secret key");
        assert_eq!(secret.len(), 10);
        assert_eq!(secret.to_string_lossy(), "secret key");
    }

    #[test]
    fn rejects_empty_and_zero_buffers() {
        assert!(matches!(Secret::new(Vec::<u8>::new()), Err(Error::InvalidArgument(_))));
        assert!(matches!(Secret::new(vec![0u8; 16]), Err(Error::InvalidArgument(_))));
        assert!(Secret::new(vec![0u8, 0, 1]).is_ok());
    }

    #[test]
    fn text_is_trimmed_and_decoded() {
        assert_eq!(Secret::from_text("  key\n", Encoding::Utf8).unwrap().as_bytes(), b"key");
        assert_eq!(Secret::from_text("6b6579", Encoding::Hex).unwrap().as_bytes(), b"key");
        assert_eq!(Secret::from_text("a2V5", Encoding::Base64).unwrap().as_bytes(), b"key");
    }

    #[test]
    fn rejects_bad_text() {
        assert!(Secret::from_text("", Encoding::Utf8).is_err());
        assert!(Secret::from_text(" \t\n", Encoding::Utf8).is_err());
        assert!(Secret::from_text("6b6", Encoding::Hex).is_err());
        assert!(Secret::from_text("0000", Encoding::Hex).is_err());
        assert!(Secret::from_text("!!", Encoding::Base64).is_err());
    }

    #[test]
    fn wrapping_is_idempotent() {
        let first = Secret::from_text("correct horse", Encoding::Utf8).unwrap();
        let second = Secret::new(first.as_bytes()).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.as_bytes(), b"correct horse");
    }

    #[test]
    fn debug_hides_contents() {
        let secret = Secret::new(b"hunter2".to_vec()).unwrap();
        let shown = format!("{secret:?}");
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("len: 7"));
    }

    #[test]
    fn inputs_convert() {
        let owned = Secret::new(b"abc".to_vec()).unwrap();
        assert!(matches!(
            SecretInput::from(&owned).into_secret().unwrap(),
            Cow::Borrowed(_)
        ));
        assert_eq!(SecretInput::from("abc").into_secret().unwrap().as_bytes(), b"abc");
        assert_eq!(SecretInput::from(b"abc").into_secret().unwrap().as_bytes(), b"abc");
        assert!(SecretInput::from(&[0u8; 4]).into_secret().is_err());
        assert!(SecretInput::from("").into_secret().is_err());
    }

    #[test]
    fn encoding_applies_to_text_only() {
        let text = SecretInput::from("6b6579").into_secret_with(Encoding::Hex).unwrap();
        assert_eq!(text.as_bytes(), b"key");
        let bytes = SecretInput::from(b"6b6579").into_secret_with(Encoding::Hex).unwrap();
        assert_eq!(bytes.as_bytes(), b"6b6579");
    }
}
