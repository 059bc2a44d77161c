//! Password Hasher 适配器

mod argon2_hasher;

pub use argon2_hasher::Argon2PasswordHasher;
