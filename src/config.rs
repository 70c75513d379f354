//! Configuration for the pagination rewriter

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::page::Page;

/// Configuration for the pagination rewriter.
///
/// Loaded by the hosting application from its own configuration source and
/// handed over already parsed; this crate never reads files. Resolve the
/// dialect once at setup via [`RewriterConfig::resolve_dialect`] so a
/// misconfigured identifier fails fast instead of on the first query.
///
/// # Examples
///
/// ```
/// use sql_page_rewriter::RewriterConfig;
///
/// // Use defaults
/// let config = RewriterConfig::default();
///
/// // Customize specific fields
/// let config = RewriterConfig {
///     dialect: "oracle".into(),
///     max_page_size: Some(200),
///     ..Default::default()
/// };
///
/// let dialect = config.resolve_dialect()?;
/// # Ok::<(), sql_page_rewriter::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewriterConfig {
   /// Identifier of the target engine family
   ///
   /// Accepted values are the identifiers [`Dialect::resolve`] knows:
   /// `oracle`, `dm`, `mysql`, `postgresql` (alias `postgres`), `sqlite`,
   /// and `sqlserver` (alias `mssql`).
   ///
   /// Default: "mysql"
   pub dialect: String,

   /// Page size applied when a request does not specify one
   ///
   /// Default: 20
   pub default_page_size: u64,

   /// Ceiling on requested page sizes
   ///
   /// Requests above the ceiling are rejected rather than clamped, so a
   /// runaway caller is surfaced instead of silently served a smaller
   /// window than it asked for.
   ///
   /// Default: None (no ceiling)
   pub max_page_size: Option<u64>,
}

impl Default for RewriterConfig {
   fn default() -> Self {
      Self {
         dialect: "mysql".to_string(),
         default_page_size: 20,
         max_page_size: None,
      }
   }
}

impl RewriterConfig {
   /// Resolve the configured dialect identifier.
   ///
   /// An unknown identifier is a fatal configuration error; call this at
   /// setup time, before any query reaches the rewriter.
   pub fn resolve_dialect(&self) -> Result<Dialect> {
      Dialect::resolve(&self.dialect)
   }

   /// Build the [`Page`] for an incoming request.
   ///
   /// Applies the configured default when the request carries no page size
   /// and enforces the configured ceiling.
   pub fn page(&self, page_number: u64, page_size: Option<u64>) -> Result<Page> {
      let size = page_size.unwrap_or(self.default_page_size);
      if let Some(max) = self.max_page_size
         && size > max
      {
         return Err(Error::PageSizeExceeded {
            requested: size,
            max,
         });
      }

      Page::new(page_number, size)
   }
}
