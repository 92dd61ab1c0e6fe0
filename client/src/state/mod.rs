//! Shared client-side state.
//!
//! DESIGN
//! ======
//! The only app-wide state is the session; it is provided through Leptos
//! context so the guard, the HTTP interceptor and the views share one store.

pub mod session;
