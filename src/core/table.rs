//! Locates the listings table and walks its rows.
//!
//! The markup nests four levels deep: table, row, cell, and a decorative
//! `<font>` wrapper that carries the visible text. Each level is one
//! routine pulling from the shared token stream; no tree is built. All
//! schema identifiers observed on the (unversioned) vendor page live here
//! as constants so a layout change is a one-place edit.

use crate::core::sanitize::{normalize_entities, normalize_ws};
use crate::core::tokenizer::{Token, Tokenizer};

/// Identifying attribute of the listings table.
pub const TABLE_ID_ATTR: &str = "id";
pub const TABLE_ID_VALUE: &str = "Table4";

const TABLE_TAG: &str = "table";
const ROW_TAG: &str = "tr";
const CELL_TAG: &str = "td";
const LABEL_TAG: &str = "font";
const ANCHOR_TAG: &str = "a";
const LINE_BREAK_TAG: &str = "br";

/// Leading `<tr>`s that are column headers, skipped unconditionally.
const HEADER_ROWS: usize = 2;

/// Scans forward to the start tag carrying `attr="value"` and leaves the
/// stream positioned just after it. False if the input ends first.
pub fn seek_table(tokens: &mut Tokenizer<'_>, attr: &str, value: &str) -> bool {
    loop {
        match tokens.next() {
            Token::StartTag { attrs, .. } => {
                if attrs.iter().any(|(k, v)| k == attr && v == value) {
                    return true;
                }
            }
            Token::Eof => return false,
            _ => {}
        }
    }
}

/// Table level: yields the raw field list of each data row.
pub struct RowReader<'t, 's> {
    tokens: &'t mut Tokenizer<'s>,
    rows_seen: usize,
    finished: bool,
}

impl<'t, 's> RowReader<'t, 's> {
    /// Expects a stream positioned just past the table's start tag.
    pub fn new(tokens: &'t mut Tokenizer<'s>) -> Self {
        Self {
            tokens,
            rows_seen: 0,
            finished: false,
        }
    }

    /// The first `HEADER_ROWS` rows are dropped without being parsed; the
    /// closing table tag ends the iteration, as does end of input
    /// (a truncated document is an implicit end, not an error).
    pub fn next_data_row(&mut self) -> Option<Vec<String>> {
        if self.finished {
            return None;
        }
        loop {
            match self.tokens.next() {
                Token::StartTag { name, .. } if name == ROW_TAG => {
                    self.rows_seen += 1;
                    if self.rows_seen > HEADER_ROWS {
                        return Some(read_row(self.tokens));
                    }
                }
                Token::EndTag { name } if name == TABLE_TAG => {
                    self.finished = true;
                    return None;
                }
                Token::Eof => {
                    self.finished = true;
                    return None;
                }
                _ => {}
            }
        }
    }
}

/// Row level: one field per `<td>`, complete on `</tr>`.
fn read_row(tokens: &mut Tokenizer<'_>) -> Vec<String> {
    let mut fields = Vec::new();
    loop {
        match tokens.next() {
            Token::StartTag { name, .. } if name == CELL_TAG => {
                fields.push(read_cell(tokens));
            }
            Token::EndTag { name } if name == ROW_TAG => return fields,
            Token::Eof => return fields,
            _ => {}
        }
    }
}

/// Cell level: the visible text lives inside a `<font>` wrapper. A later
/// wrapper in the same cell replaces an earlier one, matching the source
/// page's layout.
fn read_cell(tokens: &mut Tokenizer<'_>) -> String {
    let mut field = String::new();
    loop {
        match tokens.next() {
            Token::StartTag { name, .. } if name == LABEL_TAG => {
                field = read_label(tokens);
            }
            Token::EndTag { name } if name == CELL_TAG => return field,
            Token::Eof => return field,
            _ => {}
        }
    }
}

/// Label level: accumulates character data. An anchor ends the free text,
/// a `<br/>` continues it, any other self-closing tag ends it.
fn read_label(tokens: &mut Tokenizer<'_>) -> String {
    let mut text = String::new();
    loop {
        match tokens.next() {
            Token::Text(chunk) => {
                text.push(' ');
                text.push_str(&chunk);
            }
            Token::StartTag { name, .. } if name == ANCHOR_TAG => break,
            Token::SelfClosingTag { name, .. } => {
                if name != LINE_BREAK_TAG {
                    break;
                }
            }
            Token::EndTag { name } if name == LABEL_TAG => break,
            Token::Eof => break,
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_of(doc: &str) -> Vec<Vec<String>> {
        let mut tokens = Tokenizer::new(doc);
        assert!(seek_table(&mut tokens, TABLE_ID_ATTR, TABLE_ID_VALUE));
        let mut reader = RowReader::new(&mut tokens);
        let mut rows = Vec::new();
        while let Some(row) = reader.next_data_row() {
            rows.push(row);
        }
        rows
    }

    #[test]
    fn locator_skips_unrelated_tables() {
        let doc = r#"<table id="Table1"><tr><td>x</td></tr></table>
                     <div id="Table4x"></div>
                     <table border="1" id="Table4"><tr></tr></table>"#;
        let mut tokens = Tokenizer::new(doc);
        assert!(seek_table(&mut tokens, TABLE_ID_ATTR, TABLE_ID_VALUE));
    }

    #[test]
    fn locator_reports_missing_table() {
        let mut tokens = Tokenizer::new("<html><table id=\"Other\"></table></html>");
        assert!(!seek_table(&mut tokens, TABLE_ID_ATTR, TABLE_ID_VALUE));
    }

    #[test]
    fn first_two_rows_are_headers() {
        let doc = r#"<table id="Table4">
            <tr><td><font>State</font></td></tr>
            <tr><td><font>City</font></td></tr>
            <tr><td><font>CO</font></td><td><font>Denver</font></td></tr>
            <tr><td><font>CO</font></td><td><font>Boulder</font></td></tr>
        </table>"#;
        let rows = rows_of(doc);
        assert_eq!(
            rows,
            vec![
                vec!["CO".to_string(), "Denver".to_string()],
                vec!["CO".to_string(), "Boulder".to_string()],
            ]
        );
    }

    #[test]
    fn line_break_never_splits_a_field() {
        let doc = r#"<table id="Table4"><tr></tr><tr></tr>
            <tr><td><font size="2">1600 Stout St<br/>9th Floor</font></td></tr>
        </table>"#;
        let rows = rows_of(doc);
        assert_eq!(rows, vec![vec!["1600 Stout St 9th Floor".to_string()]]);
    }

    #[test]
    fn anchor_ends_the_free_text() {
        let doc = r#"<table id="Table4"><tr></tr><tr></tr>
            <tr><td><font>Denver Main <a href="/map">map</a> trailing</font></td></tr>
        </table>"#;
        let rows = rows_of(doc);
        assert_eq!(rows, vec![vec!["Denver Main".to_string()]]);
    }

    #[test]
    fn other_self_closing_tag_ends_the_label() {
        let doc = r#"<table id="Table4"><tr></tr><tr></tr>
            <tr><td><font>before<img src="x"/>after</font></td></tr>
        </table>"#;
        let rows = rows_of(doc);
        assert_eq!(rows, vec![vec!["before".to_string()]]);
    }

    #[test]
    fn later_label_replaces_earlier_one() {
        let doc = r#"<table id="Table4"><tr></tr><tr></tr>
            <tr><td><font>old</font><font>new</font></td></tr>
        </table>"#;
        let rows = rows_of(doc);
        assert_eq!(rows, vec![vec!["new".to_string()]]);
    }

    #[test]
    fn truncated_document_keeps_extracted_rows() {
        let doc = r#"<table id="Table4"><tr></tr><tr></tr>
            <tr><td><font>kept</font></td></tr>
            <tr><td><font>partial"#;
        let rows = rows_of(doc);
        assert_eq!(
            rows,
            vec![vec!["kept".to_string()], vec!["partial".to_string()]]
        );
    }

    #[test]
    fn spacer_rows_come_back_empty() {
        let doc = r#"<table id="Table4"><tr></tr><tr></tr>
            <tr><td></td></tr>
            <tr></tr>
        </table>"#;
        let rows = rows_of(doc);
        assert_eq!(rows, vec![vec![String::new()], vec![]]);
    }

    #[test]
    fn entities_and_whitespace_are_cleaned() {
        let doc = "<table id=\"Table4\"><tr></tr><tr></tr>
            <tr><td><font>  931&nbsp;14th   St\n</font></td></tr>
        </table>";
        let rows = rows_of(doc);
        assert_eq!(rows, vec![vec!["931 14th St".to_string()]]);
    }
}
