//! # docqflow-auth
//!
//! Bearer-token validation for DocqFlow. Token issuance, sessions, and
//! password handling belong to the external auth subsystem; this crate
//! only decodes and verifies the `(user_id, role, firm_id)` identity
//! assertion carried in the token.

pub mod jwt;

pub use jwt::claims::Claims;
pub use jwt::decoder::JwtDecoder;
