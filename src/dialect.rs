//! Dialect contract, rewriting strategies, and the dialect selector.
//!
//! Every supported engine family implements [`PageDialect`]: rewrite a read
//! query into its paginated form, and supply the two pagination bound
//! values the rewritten text references. Parameter assembly itself is a
//! provided method shared by all dialects, so every rewritten query exposes
//! the same two logical slots under the same names.
//!
//! The set of engines is the closed [`Dialect`] enumeration. Adding one
//! means adding a variant and extending the exhaustive dispatch in
//! [`Dialect::rewriter`], and the compiler flags every spot that needs to
//! know about it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::page::Page;
use crate::params::{PAGE_BOUND_FIRST, PAGE_BOUND_SECOND, ParamMap, append_bounds};
use crate::scan::{has_top_level_limit, has_top_level_order_by, strip_terminators};

/// Pagination contract implemented by every dialect strategy.
///
/// Implementations are stateless: `&'static` references to them are shared
/// across arbitrarily many concurrent callers.
pub trait PageDialect {
   /// Rewrite `sql` into a query whose result set is exactly the window
   /// `[start_row, end_row]` of the original result set.
   ///
   /// The original text is wrapped verbatim (after trailing whitespace and
   /// `;` terminators come off), so its columns, joins, filters, and
   /// ordering are preserved. Fails with [`Error::UnsupportedQueryShape`]
   /// only when the strategy provably cannot wrap the query.
   fn rewrite(&self, sql: &str) -> Result<String>;

   /// The two pagination bound entries, `(name, value)`, in the exact
   /// order the rewritten SQL references them left to right.
   ///
   /// This is the only dialect-specific part of parameter assembly.
   fn page_bounds(&self, page: &Page) -> [(&'static str, u64); 2];

   /// Copy the caller's parameters verbatim and append the two pagination
   /// bounds from [`PageDialect::page_bounds`].
   ///
   /// Positional drivers bind values in map insertion order, so the append
   /// order must match the placeholder order in the rewritten text, which
   /// is exactly what `page_bounds` guarantees.
   fn bind_parameters(&self, original: &ParamMap, page: &Page) -> ParamMap {
      append_bounds(original, self.page_bounds(page))
   }
}

/// Nested-rownum strategy for engines without a native limiting clause
/// (the Oracle family, including Dameng).
///
/// The synthetic row number has to be generated inside a subquery and
/// filtered twice: the inner `rownum <= ?` cap lets the engine stop
/// producing rows at the window's end, and the outer `row_id > ?` filter
/// discards everything before the window's start.
#[derive(Debug, Clone, Copy, Default)]
pub struct RownumDialect;

impl PageDialect for RownumDialect {
   fn rewrite(&self, sql: &str) -> Result<String> {
      let inner = strip_terminators(sql);

      let mut wrapped = String::with_capacity(inner.len() + 120);
      wrapped.push_str("select * from ( select tmp_page.*, rownum row_id from ( ");
      wrapped.push_str(inner);
      wrapped.push_str(" ) tmp_page where rownum <= ? ) where row_id > ?");
      Ok(wrapped)
   }

   fn page_bounds(&self, page: &Page) -> [(&'static str, u64); 2] {
      // The strict outer filter keeps everything above start_row - 1, so
      // consecutive pages are non-overlapping and gap-free.
      [
         (PAGE_BOUND_FIRST, page.end_row()),
         (PAGE_BOUND_SECOND, page.start_row() - 1),
      ]
   }
}

/// Native-limit strategy for engines with a LIMIT/OFFSET clause
/// (MySQL, PostgreSQL, SQLite).
///
/// No subquery is needed; the engine's own limiting clause computes the
/// window directly. A query that already carries a top-level LIMIT cannot
/// take a second one and is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitOffsetDialect;

impl PageDialect for LimitOffsetDialect {
   fn rewrite(&self, sql: &str) -> Result<String> {
      let base = strip_terminators(sql);
      if has_top_level_limit(base) {
         return Err(Error::UnsupportedQueryShape { clause: "LIMIT" });
      }

      Ok(format!("{base} limit ? offset ?"))
   }

   fn page_bounds(&self, page: &Page) -> [(&'static str, u64); 2] {
      // The text references the row count before the zero-based offset,
      // so the SECOND slot (page size) is appended first. Slot meanings
      // stay fixed: FIRST is the offset, SECOND the page size.
      [
         (PAGE_BOUND_SECOND, page.page_size()),
         (PAGE_BOUND_FIRST, page.start_row() - 1),
      ]
   }
}

/// Windowed row-number strategy for the SQL Server family.
///
/// Wraps the query in a derived table that numbers rows with
/// `row_number()`, then keeps the window with a BETWEEN filter. The window
/// function needs a deterministic ordering; a query without its own ORDER
/// BY gets the constant fallback `order by (select null)`, which keeps row
/// numbering stable across pages (rows stay in the engine's base order).
///
/// A query that does carry a top-level ORDER BY cannot live inside the
/// derived-table wrap on this engine family and is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowNumberDialect;

impl PageDialect for RowNumberDialect {
   fn rewrite(&self, sql: &str) -> Result<String> {
      let inner = strip_terminators(sql);
      if has_top_level_order_by(inner) {
         return Err(Error::UnsupportedQueryShape { clause: "ORDER BY" });
      }

      let mut wrapped = String::with_capacity(inner.len() + 140);
      wrapped.push_str(
         "select * from ( select tmp_page.*, row_number() over (order by (select null)) row_id from ( ",
      );
      wrapped.push_str(inner);
      wrapped.push_str(" ) tmp_page ) paged where row_id between ? and ?");
      Ok(wrapped)
   }

   fn page_bounds(&self, page: &Page) -> [(&'static str, u64); 2] {
      [
         (PAGE_BOUND_FIRST, page.start_row()),
         (PAGE_BOUND_SECOND, page.end_row()),
      ]
   }
}

/// Supported database engine families.
///
/// Resolved once from configuration via [`Dialect::resolve`] and shared as
/// a plain `Copy` value from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
   /// Oracle (nested-rownum pagination)
   Oracle,
   /// Dameng (Oracle-syntax family)
   Dm,
   /// MySQL (native LIMIT/OFFSET)
   MySql,
   /// PostgreSQL (native LIMIT/OFFSET)
   #[serde(rename = "postgresql", alias = "postgres")]
   Postgres,
   /// SQLite (native LIMIT/OFFSET)
   Sqlite,
   /// SQL Server (windowed row_number pagination)
   #[serde(alias = "mssql")]
   SqlServer,
}

impl Dialect {
   /// Resolve a configured dialect identifier to an engine family.
   ///
   /// Identifiers are matched case-insensitively with surrounding
   /// whitespace ignored; `postgres` and `mssql` are accepted as aliases.
   /// Anything outside the registered set is [`Error::UnknownDialect`] —
   /// a configuration error to surface at setup time, not deferred to the
   /// first query.
   pub fn resolve(identifier: &str) -> Result<Dialect> {
      let normalized = identifier.trim().to_ascii_lowercase();
      match normalized.as_str() {
         "oracle" => Ok(Dialect::Oracle),
         "dm" => Ok(Dialect::Dm),
         "mysql" => Ok(Dialect::MySql),
         "postgresql" | "postgres" => Ok(Dialect::Postgres),
         "sqlite" => Ok(Dialect::Sqlite),
         "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
         _ => Err(Error::UnknownDialect(identifier.trim().to_string())),
      }
   }

   /// The rewriting strategy for this engine family.
   pub fn rewriter(self) -> &'static dyn PageDialect {
      match self {
         Dialect::Oracle | Dialect::Dm => &RownumDialect,
         Dialect::MySql | Dialect::Postgres | Dialect::Sqlite => &LimitOffsetDialect,
         Dialect::SqlServer => &RowNumberDialect,
      }
   }

   /// Canonical identifier for this engine family.
   pub fn as_str(self) -> &'static str {
      match self {
         Dialect::Oracle => "oracle",
         Dialect::Dm => "dm",
         Dialect::MySql => "mysql",
         Dialect::Postgres => "postgresql",
         Dialect::Sqlite => "sqlite",
         Dialect::SqlServer => "sqlserver",
      }
   }
}

impl FromStr for Dialect {
   type Err = Error;

   fn from_str(s: &str) -> Result<Dialect> {
      Dialect::resolve(s)
   }
}

impl fmt::Display for Dialect {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.as_str())
   }
}
