//! The page window value object

use serde::Serialize;

use crate::error::{Error, Result};

/// A requested window of rows, identified by a 1-based page number and a
/// page size.
///
/// The absolute row bounds of the window are derived accessors, recomputed
/// from `(page_number, page_size)` on every call so they can never drift
/// from their inputs:
///
/// ```text
/// start_row = (page_number - 1) * page_size + 1
/// end_row   = start_row + page_size - 1
/// ```
///
/// A `Page` is constructed once per incoming request and is immutable after
/// construction, except for the total-count fields which may be back-filled
/// once a count is known (see [`Page::with_total_rows`]).
///
/// # Examples
///
/// ```
/// use sql_page_rewriter::Page;
///
/// let page = Page::new(3, 10)?;
/// assert_eq!(page.start_row(), 21);
/// assert_eq!(page.end_row(), 30);
///
/// let page = page.with_total_rows(95);
/// assert_eq!(page.total_pages(), Some(10));
/// # Ok::<(), sql_page_rewriter::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
   /// 1-based page number
   page_number: u64,

   /// Number of rows per page
   page_size: u64,

   /// Total number of rows in the unpaginated result set, once known
   #[serde(skip_serializing_if = "Option::is_none")]
   total_rows: Option<u64>,

   /// Total number of pages, derived from `total_rows`
   #[serde(skip_serializing_if = "Option::is_none")]
   total_pages: Option<u64>,
}

impl Page {
   /// Create a page window from a 1-based page number and a page size.
   ///
   /// Both must be greater than zero — a non-positive page size is a
   /// configuration error and is rejected here, before any SQL is touched,
   /// rather than silently clamped. Windows whose row indexes would not
   /// fit in a `u64` are rejected as [`Error::PageBoundsOverflow`].
   pub fn new(page_number: u64, page_size: u64) -> Result<Self> {
      if page_number == 0 {
         return Err(Error::InvalidPageNumber);
      }
      if page_size == 0 {
         return Err(Error::InvalidPageSize);
      }

      // end_row is exactly page_number * page_size; checking the product
      // here lets the row-bound accessors use plain arithmetic.
      page_number
         .checked_mul(page_size)
         .ok_or(Error::PageBoundsOverflow)?;

      Ok(Self {
         page_number,
         page_size,
         total_rows: None,
         total_pages: None,
      })
   }

   /// 1-based page number.
   pub fn page_number(&self) -> u64 {
      self.page_number
   }

   /// Number of rows per page.
   pub fn page_size(&self) -> u64 {
      self.page_size
   }

   /// Absolute 1-based index of the first row in the window.
   pub fn start_row(&self) -> u64 {
      (self.page_number - 1) * self.page_size + 1
   }

   /// Absolute 1-based index of the last row in the window.
   pub fn end_row(&self) -> u64 {
      self.page_number * self.page_size
   }

   /// Back-fill the total row count and derive the total page count.
   ///
   /// The page count is the ceiling of `total_rows / page_size`, so a
   /// partially filled last page still counts as a page.
   pub fn with_total_rows(mut self, total_rows: u64) -> Self {
      self.total_rows = Some(total_rows);
      self.total_pages = Some(total_rows.div_ceil(self.page_size));
      self
   }

   /// Total number of rows in the unpaginated result set, if back-filled.
   pub fn total_rows(&self) -> Option<u64> {
      self.total_rows
   }

   /// Total number of pages, if the row count has been back-filled.
   pub fn total_pages(&self) -> Option<u64> {
      self.total_pages
   }
}
