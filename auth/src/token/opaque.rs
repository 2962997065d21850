use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;

use super::errors::TokenFormatError;

/// Random bytes drawn per token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Length of the unpadded URL-safe base64 encoding of [`TOKEN_BYTES`].
pub const TOKEN_LENGTH: usize = 43;

/// Freshly minted bearer token: the plaintext handed to the caller and the
/// digest that is persisted in its place.
pub struct OpaqueToken {
    plaintext: TokenPlaintext,
    digest: TokenDigest,
}

impl OpaqueToken {
    /// Mint a new token from the operating system CSPRNG.
    ///
    /// # Returns
    /// Token whose plaintext is 43 URL-safe base64 characters
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);

        let plaintext = TokenPlaintext(URL_SAFE_NO_PAD.encode(bytes));
        let digest = plaintext.digest();

        Self { plaintext, digest }
    }

    pub fn plaintext(&self) -> &TokenPlaintext {
        &self.plaintext
    }

    pub fn digest(&self) -> &TokenDigest {
        &self.digest
    }

    /// Split into plaintext and digest.
    pub fn into_parts(self) -> (TokenPlaintext, TokenDigest) {
        (self.plaintext, self.digest)
    }
}

impl fmt::Debug for OpaqueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueToken")
            .field("plaintext", &self.plaintext)
            .field("digest", &self.digest)
            .finish()
    }
}

/// Syntactically valid token plaintext.
///
/// `Debug` output is redacted so the secret cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPlaintext(String);

impl TokenPlaintext {
    /// Check the shape of an inbound token without touching any store.
    ///
    /// # Arguments
    /// * `raw` - Token string as received from the caller
    ///
    /// # Returns
    /// Validated token plaintext
    ///
    /// # Errors
    /// * `InvalidLength` - Not exactly 43 bytes
    /// * `InvalidCharacters` - Contains characters outside `A-Z a-z 0-9 - _`
    pub fn parse(raw: &str) -> Result<Self, TokenFormatError> {
        if raw.len() != TOKEN_LENGTH {
            return Err(TokenFormatError::InvalidLength {
                expected: TOKEN_LENGTH,
                actual: raw.len(),
            });
        }

        if !raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(TokenFormatError::InvalidCharacters);
        }

        Ok(Self(raw.to_string()))
    }

    /// Compute the digest under which this token is stored.
    pub fn digest(&self) -> TokenDigest {
        TokenDigest::of(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for TokenPlaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenPlaintext(<redacted>)")
    }
}

/// Lowercase hex SHA-256 of a token plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    /// Digest an arbitrary plaintext.
    pub fn of(plaintext: &str) -> Self {
        Self(hex::encode(Sha256::digest(plaintext.as_bytes())))
    }

    /// Wrap a digest previously read back from storage.
    pub fn from_stored(digest: String) -> Self {
        Self(digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
