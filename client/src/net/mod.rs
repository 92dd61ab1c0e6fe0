//! Networking modules for the backend HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines the exchange types and the intercepted client,
//! `interceptor` holds the pre/post hooks run around every exchange, `api`
//! wraps the backend endpoints, and `types` defines the wire schema.

pub mod api;
pub mod http;
pub mod interceptor;
#[cfg(test)]
pub(crate) mod test_helpers;
pub mod types;
