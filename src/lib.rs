//! # sql-page-rewriter
//!
//! A dialect-abstracted SQL pagination rewriting engine: given an arbitrary
//! read query and a requested page window, it produces the dialect-specific
//! SQL that returns only the rows of that window, together with the extra
//! bound parameters the rewritten query needs. It sits between code that
//! says "give me page N of size S of this query" and a database driver that
//! only understands its own limiting syntax.
//!
//! ## Core Types
//!
//! - **[`Page`]**: a requested window of rows — 1-based page number, page
//!   size, derived row bounds, optional totals
//! - **[`Dialect`]**: the closed set of supported engine families, resolved
//!   from a configured identifier
//! - **[`PageDialect`]**: the contract every rewriting strategy implements
//! - **[`RewriterConfig`]**: setup-time configuration (dialect identifier,
//!   default and maximum page size)
//! - **[`Error`]**: error type for rewriting operations
//!
//! ## Architecture
//!
//! - **Pure rewriting**: every operation is a pure function over its
//!   arguments — no I/O, no execution, no caching, no shared mutable state
//! - **Ordered parameters**: the augmented mapping keeps the caller's
//!   parameters first, in their original order, then the two pagination
//!   bounds in the order the rewritten text references them
//! - **Closed dialect set**: strategies are stateless singletons dispatched
//!   through an exhaustive match, so adding an engine is a
//!   compile-time-checked change
//!
//! Executing the rewritten SQL — and feeding a total row count back into
//! the [`Page`] — is entirely the caller's responsibility.
//!
//! ## Usage Pattern
//!
//! ```
//! use sql_page_rewriter::{Dialect, Page, ParamMap};
//! use serde_json::json;
//!
//! let dialect = Dialect::resolve("mysql")?;
//! let page = Page::new(2, 5)?;
//!
//! let mut params = ParamMap::new();
//! params.insert("category".into(), json!("tech"));
//!
//! let sql = sql_page_rewriter::rewrite("SELECT id FROM posts WHERE category = ?", dialect)?;
//! let params = sql_page_rewriter::bind_parameters(&params, &page, dialect);
//!
//! assert_eq!(sql, "SELECT id FROM posts WHERE category = ? limit ? offset ?");
//! assert_eq!(params.len(), 3);
//! # Ok::<(), sql_page_rewriter::Error>(())
//! ```

mod config;
mod dialect;
mod error;
mod page;
mod params;
mod scan;

pub use config::RewriterConfig;
pub use dialect::{Dialect, LimitOffsetDialect, PageDialect, RowNumberDialect, RownumDialect};
pub use error::{Error, Result};
pub use page::Page;
pub use params::{PAGE_BOUND_FIRST, PAGE_BOUND_SECOND, ParamMap};

use tracing::{debug, trace};

/// Rewrite `sql` into the paginated form of the given dialect.
///
/// The returned query selects exactly the rows of the requested window once
/// executed with the parameters from [`bind_parameters`]. The original text
/// is wrapped verbatim; its semantics are preserved.
pub fn rewrite(sql: &str, dialect: Dialect) -> Result<String> {
   let rewritten = dialect.rewriter().rewrite(sql)?;
   debug!(dialect = %dialect, "Rewrote query for pagination");
   trace!(sql = %rewritten, "Paginated query text");
   Ok(rewritten)
}

/// Assemble the parameters for a query rewritten with [`rewrite`].
///
/// Returns the caller's parameters verbatim, in their original order,
/// followed by the two pagination bounds under [`PAGE_BOUND_FIRST`] and
/// [`PAGE_BOUND_SECOND`], in the order the rewritten text references them.
pub fn bind_parameters(original: &ParamMap, page: &Page, dialect: Dialect) -> ParamMap {
   dialect.rewriter().bind_parameters(original, page)
}
