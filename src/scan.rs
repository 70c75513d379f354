//! Quote- and comment-aware scanning of SQL text.
//!
//! The rewriting strategies never parse SQL into a syntax tree; they only
//! need to know whether a handful of keywords appear at the *top level* of
//! the statement — outside parentheses, string literals, quoted
//! identifiers, and comments. A keyword inside a subquery or a comment is
//! none of our business; one at depth zero changes whether a strategy can
//! safely wrap the query.

/// Whether `keyword` appears as a standalone keyword anywhere at paren
/// depth zero in `query`, ignoring quoted sections and comments.
///
/// `keyword` must be given in uppercase; the query is uppercased before
/// scanning. "Standalone" means the bytes before and after the match (if
/// present) are not identifier characters, so `LIMITED` never matches
/// `LIMIT`.
pub(crate) fn has_top_level_keyword(query: &str, keyword: &[u8]) -> bool {
   let upper = query.to_uppercase();
   let bytes = upper.as_bytes();
   let len = bytes.len();
   let mut depth: i32 = 0;
   let mut i = 0;

   while i < len {
      match bytes[i] {
         b'(' => depth += 1,
         b')' => depth -= 1,
         // String literal or quoted identifier, with SQL-standard doubled
         // quote escaping ('' or "")
         quote @ (b'\'' | b'"') => {
            i += 1;
            while i < len {
               if bytes[i] == quote {
                  if i + 1 < len && bytes[i + 1] == quote {
                     i += 2;
                     continue;
                  }
                  break;
               }
               i += 1;
            }
         }
         // -- line comment runs to the end of the line
         b'-' if bytes.get(i + 1) == Some(&b'-') => {
            while i < len && bytes[i] != b'\n' {
               i += 1;
            }
            if i == len {
               break;
            }
         }
         // /* ... */ block comment
         b'/' if bytes.get(i + 1) == Some(&b'*') => {
            i += 2;
            while i + 1 < len && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
               i += 1;
            }
            i = (i + 1).min(len - 1);
         }
         _ if depth == 0 && keyword_at(bytes, i, keyword) => return true,
         _ => {}
      }
      i += 1;
   }

   false
}

/// Whether `keyword` starts at `i` and is delimited on both sides.
fn keyword_at(bytes: &[u8], i: usize, keyword: &[u8]) -> bool {
   let end = i + keyword.len();
   if end > bytes.len() || &bytes[i..end] != keyword {
      return false;
   }

   let delimited_before = i == 0 || !is_ident_byte(bytes[i - 1]);
   let delimited_after = end == bytes.len() || !is_ident_byte(bytes[end]);
   delimited_before && delimited_after
}

fn is_ident_byte(b: u8) -> bool {
   b.is_ascii_alphanumeric() || b == b'_'
}

/// Whether the query carries a LIMIT clause at the top level.
pub(crate) fn has_top_level_limit(query: &str) -> bool {
   has_top_level_keyword(query, b"LIMIT")
}

/// Whether the query carries an ORDER BY clause at the top level.
pub(crate) fn has_top_level_order_by(query: &str) -> bool {
   has_top_level_keyword(query, b"ORDER BY")
}

/// Strip trailing whitespace and `;` statement terminators.
///
/// Callers hand over SQL exactly as their mapping layer produced it, which
/// may end in one or more terminators; those must come off before the text
/// is wrapped in a subquery or extended with a trailing clause.
pub(crate) fn strip_terminators(sql: &str) -> &str {
   let mut rest = sql.trim_end();
   while let Some(stripped) = rest.strip_suffix(';') {
      rest = stripped.trim_end();
   }
   rest
}
