//! Session token verification and the principal extractor.

pub mod extractor;
pub mod jwt;
pub mod types;

pub use extractor::{session_token, Session};
pub use jwt::{encode_token, JwtVerifier, SessionVerifier, VerifyError};
pub use types::{Claims, Principal, Role};
