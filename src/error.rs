//! Error types for the pagination rewriting engine

use thiserror::Error;

/// Result type alias for rewriting operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that may occur while building a paginated query.
///
/// Every variant is deterministic given the same inputs and carries no
/// partial output: a failed rewrite never returns a half-built query, and
/// none of these are worth retrying.
#[derive(Debug, Error)]
pub enum Error {
   /// Page numbers are 1-based; zero is a caller bug, not page one.
   #[error("page number must be greater than zero")]
   InvalidPageNumber,

   /// Page size must be greater than zero.
   #[error("page size must be greater than zero")]
   InvalidPageSize,

   /// The requested window's row indexes do not fit in a u64.
   #[error("page window exceeds the representable row range")]
   PageBoundsOverflow,

   /// The requested page size is above the configured ceiling.
   #[error("page size {requested} exceeds the configured maximum of {max}")]
   PageSizeExceeded { requested: u64, max: u64 },

   /// The query already carries a clause that conflicts with the dialect's
   /// wrapping strategy (e.g. a top-level LIMIT when the strategy appends
   /// its own).
   #[error("query already contains a top-level {clause} clause and cannot be wrapped for pagination")]
   UnsupportedQueryShape { clause: &'static str },

   /// The configured dialect identifier has no registered implementation.
   ///
   /// This is a configuration error: surface it at setup time, before any
   /// query reaches the rewriter.
   #[error("unknown dialect '{0}'")]
   UnknownDialect(String),
}

impl Error {
   /// Extract a structured error code from the error type.
   ///
   /// This provides machine-readable error codes for error handling.
   pub fn error_code(&self) -> &'static str {
      match self {
         Error::InvalidPageNumber => "INVALID_PAGE_NUMBER",
         Error::InvalidPageSize => "INVALID_PAGE_SIZE",
         Error::PageBoundsOverflow => "PAGE_BOUNDS_OVERFLOW",
         Error::PageSizeExceeded { .. } => "PAGE_SIZE_EXCEEDED",
         Error::UnsupportedQueryShape { .. } => "UNSUPPORTED_QUERY_SHAPE",
         Error::UnknownDialect(_) => "UNKNOWN_DIALECT",
      }
   }
}
