use serde_json::json;
use sql_page_rewriter::{
   Dialect, PAGE_BOUND_FIRST, PAGE_BOUND_SECOND, Page, PageDialect, ParamMap, bind_parameters,
   rewrite,
};

/// The query every flow below paginates, with one caller-supplied filter
/// parameter.
const BASE_QUERY: &str = "SELECT id, title FROM posts WHERE category = ?";

fn base_params() -> ParamMap {
   let mut params = ParamMap::new();
   params.insert("category".into(), json!("tech"));
   params
}

/// Bound values in map order, for asserting positional binding order.
fn ordered_entries(params: &ParamMap) -> Vec<(&str, &serde_json::Value)> {
   params.iter().map(|(k, v)| (k.as_str(), v)).collect()
}

// ─── Oracle family (nested rownum) ───

#[test]
fn oracle_page_two_of_five() {
   let dialect = Dialect::resolve("oracle").unwrap();
   let page = Page::new(2, 5).unwrap();

   // Generated SQL:
   //    select * from (
   //       select tmp_page.*, rownum row_id from (
   //          SELECT id, title FROM posts WHERE category = ?
   //       ) tmp_page where rownum <= ?
   //    ) where row_id > ?
   //
   // The inner cap lets the engine stop counting at row 10; the outer
   // filter discards rows 1..=5, leaving the window 6..=10.
   let sql = rewrite(BASE_QUERY, dialect).unwrap();
   assert_eq!(
      sql,
      "select * from ( select tmp_page.*, rownum row_id from ( SELECT id, title FROM posts WHERE category = ? ) tmp_page where rownum <= ? ) where row_id > ?"
   );

   // Binding order: the caller's filter first, then the cap (end_row = 10),
   // then the lower bound (start_row - 1 = 5) — matching the placeholders
   // left to right.
   let params = bind_parameters(&base_params(), &page, dialect);
   assert_eq!(
      ordered_entries(&params),
      vec![
         ("category", &json!("tech")),
         (PAGE_BOUND_FIRST, &json!(10)),
         (PAGE_BOUND_SECOND, &json!(5)),
      ]
   );
}

#[test]
fn oracle_wraps_original_text_verbatim() {
   let dialect = Dialect::resolve("dm").unwrap();
   let sql = rewrite(BASE_QUERY, dialect).unwrap();
   assert!(sql.contains(BASE_QUERY));
}

// ─── LIMIT/OFFSET family ───

#[test]
fn mysql_page_two_of_five() {
   let dialect = Dialect::resolve("mysql").unwrap();
   let page = Page::new(2, 5).unwrap();

   // Generated SQL:
   //    SELECT id, title FROM posts WHERE category = ? limit ? offset ?
   //
   // No subquery needed — the engine's own clause computes the window.
   let sql = rewrite(BASE_QUERY, dialect).unwrap();
   assert_eq!(sql, format!("{BASE_QUERY} limit ? offset ?"));

   // The count placeholder precedes the offset placeholder, so the SECOND
   // slot (page size = 5) is bound before the FIRST slot (offset = 5).
   let params = bind_parameters(&base_params(), &page, dialect);
   assert_eq!(
      ordered_entries(&params),
      vec![
         ("category", &json!("tech")),
         (PAGE_BOUND_SECOND, &json!(5)),
         (PAGE_BOUND_FIRST, &json!(5)),
      ]
   );
}

#[test]
fn postgres_alias_first_page() {
   let dialect = Dialect::resolve("postgres").unwrap();
   let page = Page::new(1, 20).unwrap();

   let params = bind_parameters(&base_params(), &page, dialect);
   assert_eq!(params[PAGE_BOUND_FIRST], json!(0));
   assert_eq!(params[PAGE_BOUND_SECOND], json!(20));
}

#[test]
fn limit_family_rejects_preexisting_limit() {
   let dialect = Dialect::resolve("sqlite").unwrap();
   let err = rewrite("SELECT id FROM posts LIMIT 3", dialect).unwrap_err();
   assert_eq!(err.error_code(), "UNSUPPORTED_QUERY_SHAPE");
}

// ─── SQL Server family (windowed row_number) ───

#[test]
fn sqlserver_page_two_of_five() {
   let dialect = Dialect::resolve("sqlserver").unwrap();
   let page = Page::new(2, 5).unwrap();

   // Generated SQL:
   //    select * from (
   //       select tmp_page.*, row_number() over (order by (select null)) row_id from (
   //          SELECT id, title FROM posts WHERE category = ?
   //       ) tmp_page
   //    ) paged where row_id between ? and ?
   //
   // The query has no ORDER BY of its own, so the constant fallback
   // ordering keeps numbering deterministic across pages.
   let sql = rewrite(BASE_QUERY, dialect).unwrap();
   assert!(sql.contains("row_number() over (order by (select null))"));
   assert!(sql.contains(BASE_QUERY));
   assert!(sql.ends_with("where row_id between ? and ?"));

   // BETWEEN is inclusive on both ends: start_row = 6, end_row = 10.
   let params = bind_parameters(&base_params(), &page, dialect);
   assert_eq!(
      ordered_entries(&params),
      vec![
         ("category", &json!("tech")),
         (PAGE_BOUND_FIRST, &json!(6)),
         (PAGE_BOUND_SECOND, &json!(10)),
      ]
   );
}

#[test]
fn sqlserver_rejects_top_level_order_by() {
   let dialect = Dialect::resolve("mssql").unwrap();
   let err = rewrite("SELECT id FROM posts ORDER BY id", dialect).unwrap_err();
   assert_eq!(err.error_code(), "UNSUPPORTED_QUERY_SHAPE");
}

// ─── Cross-dialect properties ───

#[test]
fn trailing_terminators_are_tolerated_everywhere() {
   for identifier in ["oracle", "mysql", "sqlserver"] {
      let dialect = Dialect::resolve(identifier).unwrap();
      let sql = rewrite("SELECT id FROM posts ; \n", dialect).unwrap();
      assert!(
         !sql.contains(';'),
         "dialect {identifier} kept a terminator: {sql}"
      );
      assert!(sql.contains("SELECT id FROM posts"));
   }
}

#[test]
fn originals_are_never_disturbed() {
   let mut original = ParamMap::new();
   original.insert("a".into(), json!(1));
   original.insert("b".into(), json!("two"));
   original.insert("c".into(), json!(null));
   let page = Page::new(3, 7).unwrap();

   for identifier in ["dm", "postgresql", "mssql"] {
      let dialect = Dialect::resolve(identifier).unwrap();
      let augmented = bind_parameters(&original, &page, dialect);

      assert_eq!(augmented.len(), original.len() + 2);
      for (i, (key, value)) in original.iter().enumerate() {
         let (augmented_key, augmented_value) = augmented.get_index(i).unwrap();
         assert_eq!(augmented_key, key);
         assert_eq!(augmented_value, value);
      }
   }
}

/// Emulate each strategy's filter against a numbered result set and check
/// the window it keeps: `min(page_size, max(0, total - start_row + 1))`
/// rows, at exactly the absolute positions `start_row..=end_row`.
#[test]
fn bound_values_select_the_requested_window() {
   let total_rows = 13u64;
   let rows = || 1..=total_rows;

   for (page_number, page_size) in [(1, 5), (2, 5), (3, 5), (4, 5), (1, 13), (2, 13), (7, 2)] {
      let page = Page::new(page_number, page_size).unwrap();
      let expected: Vec<u64> = rows()
         .filter(|r| *r >= page.start_row() && *r <= page.end_row())
         .collect();
      assert_eq!(
         expected.len() as u64,
         page_size.min((total_rows + 1).saturating_sub(page.start_row()))
      );

      // rownum: inner `rownum <= first`, outer `row_id > second`
      let [(_, first), (_, second)] = Dialect::Oracle.rewriter().page_bounds(&page);
      let kept: Vec<u64> = rows().filter(|r| *r <= first && *r > second).collect();
      assert_eq!(kept, expected, "rownum window for page {page_number}");

      // limit/offset: skip `offset`, take `count`
      let bounds = Dialect::MySql.rewriter().page_bounds(&page);
      let (count, offset) = (bounds[0].1, bounds[1].1);
      let kept: Vec<u64> = rows().skip(offset as usize).take(count as usize).collect();
      assert_eq!(kept, expected, "limit window for page {page_number}");

      // row_number: `row_id between first and second`
      let [(_, lo), (_, hi)] = Dialect::SqlServer.rewriter().page_bounds(&page);
      let kept: Vec<u64> = rows().filter(|r| *r >= lo && *r <= hi).collect();
      assert_eq!(kept, expected, "row_number window for page {page_number}");
   }
}

#[test]
fn unknown_dialect_is_independent_of_query_content() {
   for identifier in ["db2", "hsqldb", "", "mysql8"] {
      let err = Dialect::resolve(identifier).unwrap_err();
      assert_eq!(err.error_code(), "UNKNOWN_DIALECT");
   }
}
