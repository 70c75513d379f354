//! Ordered bound-parameter mapping shared by all dialects

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Ordered mapping of bound-parameter name to value.
///
/// Insertion order is the positional binding order: drivers that bind by
/// position take the values in the order they appear here, so the two
/// pagination bounds are always appended after the caller's own
/// parameters, in the order the rewritten SQL references them.
pub type ParamMap = IndexMap<String, JsonValue>;

/// Name of the first pagination bound parameter.
///
/// Every dialect exposes the same two logical slots under these fixed,
/// dialect-agnostic names; only the numeric meaning of each slot differs
/// per dialect.
pub const PAGE_BOUND_FIRST: &str = "page_bound_first";

/// Name of the second pagination bound parameter.
pub const PAGE_BOUND_SECOND: &str = "page_bound_second";

/// Copy `original` verbatim and append the two pagination bound entries in
/// the given order.
pub(crate) fn append_bounds(original: &ParamMap, bounds: [(&'static str, u64); 2]) -> ParamMap {
   let mut params = original.clone();
   for (name, value) in bounds {
      params.insert(name.to_string(), JsonValue::from(value));
   }
   params
}
