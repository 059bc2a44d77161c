//! Infrastructure Adapters - 出站端口适配器

pub mod hasher;
pub mod storage;

pub use hasher::Argon2PasswordHasher;
pub use storage::FileImageStorage;
