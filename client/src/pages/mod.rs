//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its route-scoped fetching and form handling and delegates
//! list rendering to `components`. Pure input validation lives next to the
//! page that uses it so it can be tested off-browser.

pub mod about;
pub mod author;
pub mod home;
pub mod login;
pub mod logout;
pub mod not_found;
pub mod profile;
pub mod search;
pub mod signup;
pub mod submit;
