//! Convenience result type alias for ExamPro.

use crate::error::AppError;

/// A specialized `Result` type for ExamPro operations.
pub type AppResult<T> = Result<T, AppError>;
