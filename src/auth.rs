use std::fmt;

/// A Buildkite API access token.
///
/// The token is handed over once at construction and never rotated. `Debug`
/// output is redacted so the value does not end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let token = Token::from("bkua_secret");
        assert_eq!(format!("{token:?}"), "Token(****)");
        assert_eq!(token.as_str(), "bkua_secret");
    }

    #[test]
    fn test_blank_token_is_empty() {
        assert!(Token::from("  ").is_empty());
        assert!(!Token::from("abc").is_empty());
    }
}
