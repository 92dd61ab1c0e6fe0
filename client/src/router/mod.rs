//! Route table and navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `routes` declares every path with its visibility; `guard` turns session and
//! cookie state into allow/redirect decisions before a route renders.

pub mod guard;
pub mod routes;
