//! Credential primitives shared by services.
//!
//! Provides the stateless half of authentication:
//! - Password hashing (Argon2id)
//! - Opaque bearer tokens: minting, syntax checks, and digests for storage
//!
//! Persistence, expiry and scope policy belong to the consuming service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Opaque Tokens
//! ```
//! use auth::{OpaqueToken, TokenPlaintext};
//!
//! let (plaintext, digest) = OpaqueToken::generate().into_parts();
//! assert_eq!(plaintext.as_str().len(), auth::TOKEN_LENGTH);
//!
//! // Inbound: check the shape, then look the digest up in storage
//! let inbound = TokenPlaintext::parse(plaintext.as_str()).unwrap();
//! assert_eq!(inbound.digest(), digest);
//! ```

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::OpaqueToken;
pub use token::TokenDigest;
pub use token::TokenFormatError;
pub use token::TokenPlaintext;
pub use token::TOKEN_LENGTH;
