//! Cache key for lookup responses, one per backend endpoint.
use thiserror::Error;

/// Endpoint path (including any query string) identifying a cached response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupCacheKey(String);

impl LookupCacheKey {
    /// Construct a key after checking that it is non-empty and unpadded.
    pub fn new(value: impl Into<String>) -> Result<Self, LookupCacheKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(LookupCacheKeyValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(LookupCacheKeyValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for LookupCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for LookupCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`LookupCacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupCacheKeyValidationError {
    #[error("lookup cache key must not be empty")]
    Empty,
    #[error("lookup cache key must not contain surrounding whitespace")]
    ContainsWhitespace,
}

#[cfg(test)]
mod tests {
    use super::{LookupCacheKey, LookupCacheKeyValidationError};
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn rejects_blank_keys(#[case] value: &str) {
        assert_eq!(
            LookupCacheKey::new(value),
            Err(LookupCacheKeyValidationError::Empty)
        );
    }

    #[rstest]
    #[case(" /codes/cities")]
    #[case("/codes/cities\n")]
    fn rejects_padded_keys(#[case] value: &str) {
        assert_eq!(
            LookupCacheKey::new(value),
            Err(LookupCacheKeyValidationError::ContainsWhitespace)
        );
    }

    #[rstest]
    fn keeps_query_strings_verbatim() {
        let key = LookupCacheKey::new("/codes/cities?code=OTT").expect("valid key");
        assert_eq!(key.as_str(), "/codes/cities?code=OTT");
        assert_eq!(key.to_string(), "/codes/cities?code=OTT");
    }
}
