use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::dom::Page;
use super::table::{body_rows, normalize_rows, row_cells, RequireAttr};
use crate::core::types::RecordTable;

/// Attribute present on every company row of the peers fragment.
pub const PEER_ROW_ATTR: &str = "data-row-company-id";

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());

/// Layout of the peers fragment: the first body row holds the column labels,
/// and only rows tagged with [`PEER_ROW_ATTR`] are companies.
///
/// Returns `None` when the body has no rows at all.
pub fn peer_table_layout<'a>(
    table: ElementRef<'a>,
) -> Option<(Vec<String>, Vec<ElementRef<'a>>, RequireAttr)> {
    let mut rows = body_rows(table).into_iter();
    let header_row = rows.next()?;
    Some((
        row_cells(header_row),
        rows.collect(),
        RequireAttr(PEER_ROW_ATTR),
    ))
}

/// Peer comparison rows from the fragment returned by the peers endpoint.
pub fn extract_peer_comparison(page: &Page) -> Option<RecordTable> {
    let Some(table) = page.find_first(&TABLE) else {
        log::warn!("No peer comparison table found");
        return None;
    };
    let Some((headers, rows, policy)) = peer_table_layout(table) else {
        log::warn!("No rows found in the peer comparison table");
        return None;
    };
    Some(normalize_rows(&headers, rows, &policy))
}
