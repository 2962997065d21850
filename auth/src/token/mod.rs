pub mod errors;
pub mod opaque;

pub use errors::TokenFormatError;
pub use opaque::OpaqueToken;
pub use opaque::TokenDigest;
pub use opaque::TokenPlaintext;
pub use opaque::TOKEN_LENGTH;
