//! # exampro-api
//!
//! HTTP API layer for ExamPro built on Axum.
//!
//! Provides the notification and admin audit endpoints, request logging
//! middleware, identity extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
