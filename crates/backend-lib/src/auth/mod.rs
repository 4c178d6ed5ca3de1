// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Registration, login, and bearer-token handling.

pub mod password;
pub mod service;
pub mod token;

pub use password::{hash_password, verify_password};
pub use service::AuthService;
pub use token::{Claims, TokenService};
