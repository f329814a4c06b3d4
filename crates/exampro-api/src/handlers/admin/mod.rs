//! Admin-only handlers.

pub mod audit;
pub mod notifications;
