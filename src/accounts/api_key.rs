use rand::{rngs::OsRng, RngCore};

const API_KEY_BYTES: usize = 16;

/// 16 bytes from the OS RNG, hex-encoded (32 chars).
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Prefix safe to put in a log line.
pub fn redact(api_key: &str) -> String {
    let prefix: String = api_key.chars().take(4).collect();
    format!("{prefix}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_32_lowercase_hex_chars() {
        let key = generate_api_key();
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn keys_differ() {
        assert_ne!(generate_api_key(), generate_api_key());
    }

    #[test]
    fn redact_keeps_only_a_prefix() {
        let key = "0123456789abcdef0123456789abcdef";
        assert_eq!(redact(key), "0123…");
        assert_eq!(redact("ab"), "ab…");
    }
}
