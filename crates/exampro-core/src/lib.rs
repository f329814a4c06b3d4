//! # exampro-core
//!
//! Core crate for the ExamPro notification and admin-audit backend. Contains
//! configuration schemas, typed identifiers, pagination types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other ExamPro crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
