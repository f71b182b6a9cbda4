//! Share link token generation.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

/// Bytes of entropy per token; the encoded form is 11 URL-safe
/// characters. A fixed design constant.
pub const TOKEN_BYTES: usize = 8;

/// Generates share link tokens.
#[derive(Debug, Clone)]
pub struct LinkService;

impl LinkService {
    /// Creates a new link service.
    pub fn new() -> Self {
        Self
    }

    /// Generates a URL-safe token from OS-level cryptographic randomness.
    pub fn generate_token(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

impl Default for LinkService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_url_safe() {
        let token = LinkService::new().generate_token();
        assert_eq!(token.len(), 11);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_tokens_differ() {
        let service = LinkService::new();
        let a = service.generate_token();
        let b = service.generate_token();
        assert_ne!(a, b);
    }
}
