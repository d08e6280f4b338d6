use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use serde_json::Value;

use super::dom::{find_first, has_class, text_of};
use crate::core::types::{Record, RecordTable};

static THEAD: Lazy<Selector> = Lazy::new(|| Selector::parse("thead").unwrap());
static TBODY: Lazy<Selector> = Lazy::new(|| Selector::parse("tbody").unwrap());
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").unwrap());
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").unwrap());

/// Decides which body rows of a table are data rows.
pub trait RowPolicy {
    fn keep(&self, row: ElementRef<'_>) -> bool;
}

/// Statement tables: drops rows classed `notes` or `sub`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipNoteRows;

impl RowPolicy for SkipNoteRows {
    fn keep(&self, row: ElementRef<'_>) -> bool {
        !(has_class(row, "notes") || has_class(row, "sub"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAllRows;

impl RowPolicy for KeepAllRows {
    fn keep(&self, _row: ElementRef<'_>) -> bool {
        true
    }
}

/// Keeps only rows carrying the given attribute, whatever its value.
#[derive(Debug, Clone, Copy)]
pub struct RequireAttr(pub &'static str);

impl RowPolicy for RequireAttr {
    fn keep(&self, row: ElementRef<'_>) -> bool {
        row.value().attr(self.0).is_some()
    }
}

/// Header labels from the table's `<thead>`, empty when there is none.
pub fn header_cells(table: ElementRef<'_>) -> Vec<String> {
    find_first(table, &THEAD)
        .map(|thead| thead.select(&TH).map(text_of).collect())
        .unwrap_or_default()
}

/// Rows of the table's first `<tbody>`, empty when there is none.
pub fn body_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    find_first(table, &TBODY)
        .map(|tbody| tbody.select(&TR).collect())
        .unwrap_or_default()
}

/// Trimmed text of every `th` and `td` in the row, in document order.
pub fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.select(&CELL).map(text_of).collect()
}

/// Zips a row against the header by position.
///
/// Returns `None` when the lengths differ. A repeated header label keeps its
/// first position and takes the value of its last cell.
pub fn materialize(headers: &[String], cells: Vec<String>) -> Option<Record> {
    if cells.len() != headers.len() {
        return None;
    }
    let mut record = Record::new();
    for (header, cell) in headers.iter().zip(cells) {
        record.insert(header.clone(), Value::String(cell));
    }
    Some(record)
}

/// Applies `policy` then `materialize` to each row, keeping document order.
pub fn normalize_rows<'a, P, I>(headers: &[String], rows: I, policy: &P) -> RecordTable
where
    P: RowPolicy + ?Sized,
    I: IntoIterator<Item = ElementRef<'a>>,
{
    let mut table = RecordTable::new();
    for row in rows {
        if !policy.keep(row) {
            continue;
        }
        let cells = row_cells(row);
        let width = cells.len();
        match materialize(headers, cells) {
            Some(record) => table.push(record),
            None => log::debug!(
                "Dropping row with {} cells, header has {}",
                width,
                headers.len()
            ),
        }
    }
    table
}

/// Normalizes a table with a `<thead>` header and `<tbody>` data rows.
pub fn normalize_table<P>(table: ElementRef<'_>, policy: &P) -> RecordTable
where
    P: RowPolicy + ?Sized,
{
    let headers = header_cells(table);
    normalize_rows(&headers, body_rows(table), policy)
}
