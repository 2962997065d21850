pub mod credentials;
pub mod hashing;
pub mod token;
pub mod user;
