use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Number of symbols in every short code.
pub const CODE_LENGTH: usize = 5;

/// The 62-symbol alphabet short codes are drawn from, in digit order.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A validated short code identifying a stored URL mapping.
///
/// Short codes are exactly [`CODE_LENGTH`] characters long and contain only
/// symbols from [`ALPHABET`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Parses and validates a short code received from the outside world.
    pub fn parse(code: impl Into<String>) -> std::result::Result<Self, CoreError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Only the code generator should use this; it always produces
    /// well-formed output.
    pub(crate) fn new_unchecked(code: String) -> Self {
        Self(code)
    }

    /// Builds the canonical short URL for this code under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> std::result::Result<(), CoreError> {
        if code.len() != CODE_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be {}, got {}",
                CODE_LENGTH,
                code.len()
            )));
        }

        if !code.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only alphanumeric characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShortCode {
    type Error = CoreError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ShortCode> for String {
    fn from(value: ShortCode) -> Self {
        value.0
    }
}

/// Extracts the short code from a short URL: the last path segment, with
/// trailing slashes and spaces removed.
///
/// The result is not validated; pass it to [`ShortCode::parse`] when it
/// comes from an untrusted source.
pub fn extract_code(short_url: &str) -> &str {
    let trimmed = short_url.trim_end_matches(['/', ' ']);
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::parse("abcde").is_ok());
        assert!(ShortCode::parse("R9TVn").is_ok());
        assert!(ShortCode::parse("00000").is_ok());
    }

    #[test]
    fn wrong_length() {
        assert!(ShortCode::parse("").is_err());
        assert!(ShortCode::parse("abcd").is_err());
        assert!(ShortCode::parse("abcdef").is_err());
        assert!(ShortCode::parse("unknownCode").is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::parse("ab-de").is_err());
        assert!(ShortCode::parse("ab_de").is_err());
        assert!(ShortCode::parse("ab/de").is_err());
        // five bytes long, but "é" is outside the alphabet
        assert!(ShortCode::parse("abcé").is_err());
    }

    #[test]
    fn to_url() {
        let code = ShortCode::parse("abc12").unwrap();
        assert_eq!(code.to_url("http://localhost:8080"), "http://localhost:8080/abc12");
        assert_eq!(code.to_url("http://localhost:8080/"), "http://localhost:8080/abc12");
    }

    #[test]
    fn extract_code_from_short_url() {
        assert_eq!(extract_code("http://localhost:8080/R9TVn"), "R9TVn");
        assert_eq!(extract_code("http://localhost:8080/R9TVn/"), "R9TVn");
        assert_eq!(extract_code("http://localhost:8080/R9TVn  "), "R9TVn");
        assert_eq!(extract_code("R9TVn"), "R9TVn");
    }

    #[test]
    fn serde_rejects_malformed_code() {
        let ok: ShortCode = serde_json::from_str("\"R9TVn\"").unwrap();
        assert_eq!(ok.as_str(), "R9TVn");
        assert!(serde_json::from_str::<ShortCode>("\"nope\"").is_err());
    }
}
