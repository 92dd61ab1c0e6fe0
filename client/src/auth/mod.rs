//! Auth cookie constants and session token decoding.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend owns authentication. The client only observes the readable
//! half of the JWT cookie to learn the current user id; both the navigation
//! guard and the HTTP interceptor share these definitions.

pub mod token;

/// Name of the script-readable auth cookie set by the backend.
pub const AUTH_COOKIE: &str = "token-hp";
