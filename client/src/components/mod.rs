//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the shared chrome around routed pages and read session
//! state from Leptos context providers.

pub mod nav_bar;
pub mod post_feed;
