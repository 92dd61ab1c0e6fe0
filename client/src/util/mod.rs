//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (cookies, storage, randomness)
//! behind small seams so guard and interceptor logic stays testable off the
//! browser.

pub mod cookie;
pub mod request_id;
pub mod storage;
