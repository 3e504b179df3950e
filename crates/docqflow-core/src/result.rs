//! Result alias for the unified error type.

use crate::error::AppError;

/// Convenience alias used throughout DocqFlow.
pub type AppResult<T> = Result<T, AppError>;
