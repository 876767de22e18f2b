//! API key generation and hashing.
//!
//! Only the keyed hash of a secret is ever stored; the plaintext is shown to
//! the operator exactly once at provisioning time.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

/// Length of a generated secret.
pub const KEY_LENGTH: usize = 100;

/// Number of trailing characters kept in clear for identification.
pub const KEY_SUFFIX_LENGTH: usize = 4;

const KEY_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

type HmacSha256 = Hmac<Sha256>;

/// The result of generating a new API key.
pub struct GeneratedApiKey {
    /// The plaintext secret (shown once, never stored).
    pub plaintext: String,
    /// The last [`KEY_SUFFIX_LENGTH`] characters, for display.
    pub last4: String,
    /// Hex HMAC-SHA256 of the plaintext (stored in the database).
    pub hash: String,
}

/// Generate a new random lowercase-alphanumeric secret and its hash.
pub fn generate_api_key(pepper: &str) -> GeneratedApiKey {
    let mut rng = rand::rng();
    let plaintext: String = (0..KEY_LENGTH)
        .map(|_| KEY_CHARSET[rng.random_range(0..KEY_CHARSET.len())] as char)
        .collect();

    let last4 = plaintext[plaintext.len() - KEY_SUFFIX_LENGTH..].to_string();
    let hash = hash_api_key(&plaintext, pepper);

    GeneratedApiKey {
        plaintext,
        last4,
        hash,
    }
}

/// Keyed hash of a secret. The pepper is server configuration, so equal
/// secrets always hash equally and lookups by hash stay possible.
pub fn hash_api_key(secret: &str, pepper: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(pepper.as_bytes()).expect("HMAC accepts any key length");
    mac.update(secret.as_bytes());
    hex_encode(mac.finalize().into_bytes())
}

fn hex_encode(bytes: impl AsRef<[u8]>) -> String {
    bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_shape() {
        let key = generate_api_key("pepper");
        assert_eq!(key.plaintext.len(), KEY_LENGTH);
        assert!(key
            .plaintext
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!(key.plaintext.ends_with(&key.last4));
        assert_eq!(key.hash.len(), 64);
    }

    #[test]
    fn hash_is_deterministic_per_pepper() {
        assert_eq!(hash_api_key("secret", "p"), hash_api_key("secret", "p"));
        assert_ne!(hash_api_key("secret", "p"), hash_api_key("secret", "q"));
        assert_ne!(hash_api_key("secret", "p"), hash_api_key("other", "p"));
    }

    #[test]
    fn generated_hash_matches_rehash() {
        let key = generate_api_key("");
        assert_eq!(key.hash, hash_api_key(&key.plaintext, ""));
    }

    #[test]
    fn two_keys_differ() {
        assert_ne!(generate_api_key("").plaintext, generate_api_key("").plaintext);
    }
}
