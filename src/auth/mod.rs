//! Authentication Gate
//!
//! Every `/students` route sits behind a static shared-secret check: the request must
//! carry `Authorization: Bearer <token>` and the token must equal the configured secret.
//! There is no per-user identity, expiry or revocation.
//!
//! - Missing header or another scheme: `401 Authentication token required`.
//! - Wrong token: `403 Invalid token`.

pub mod gate;
pub mod middleware;

pub use gate::AuthGate;
pub use middleware::require_bearer;
