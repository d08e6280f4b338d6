use once_cell::sync::Lazy;
use scraper::Selector;

use super::dom::{find_by_id, find_first, Page};
use super::table::{normalize_table, KeepAllRows, SkipNoteRows};
use crate::core::types::{RecordTable, Section};

pub const SHAREHOLDING_ID: &str = "shareholding";
pub const QUARTERLY_SHP_ID: &str = "quarterly-shp";
pub const YEARLY_SHP_ID: &str = "yearly-shp";

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());

/// First table inside `<section id="...">`, normalized with note rows removed.
pub fn extract_section_table(page: &Page, section: Section) -> Option<RecordTable> {
    let Some(container) = page.find_by_id("section", section.id()) else {
        log::debug!("Section '{}' not present", section);
        return None;
    };
    let Some(table) = find_first(container, &TABLE) else {
        log::debug!("Section '{}' has no table", section);
        return None;
    };
    Some(normalize_table(table, &SkipNoteRows))
}

/// Shareholding pattern table, quarterly view first, yearly view otherwise.
pub fn extract_shareholding(page: &Page) -> Option<RecordTable> {
    let section = page.find_by_id("section", SHAREHOLDING_ID)?;
    let view = find_by_id(section, "div", QUARTERLY_SHP_ID)
        .or_else(|| find_by_id(section, "div", YEARLY_SHP_ID))?;
    let table = find_first(view, &TABLE)?;
    Some(normalize_table(table, &KeepAllRows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAGE: &str = r#"
        <section id="quarters">
          <div class="responsive-holder">
            <table class="data-table">
              <thead><tr><th class="text"></th><th>Jun 2024</th><th>Sep 2024</th></tr></thead>
              <tbody>
                <tr class="stripe"><td class="text">Sales +</td><td>62,613</td><td>64,259</td></tr>
                <tr class="sub"><td class="text">YOY Sales Growth %</td><td>5%</td><td>7%</td></tr>
                <tr><td class="text">Raw PDF</td><td></td></tr>
              </tbody>
            </table>
          </div>
        </section>
        <section id="profit-loss"><p>No table yet</p></section>
        <section id="shareholding">
          <div id="yearly-shp">
            <table><thead><tr><th></th><th>Mar 2024</th></tr></thead>
            <tbody><tr><td>Promoters</td><td>71.77%</td></tr></tbody></table>
          </div>
          <div id="quarterly-shp">
            <table><thead><tr><th></th><th>Jun 2024</th><th>Sep 2024</th></tr></thead>
            <tbody>
              <tr class="sub"><td>Promoters</td><td>71.77%</td><td>71.77%</td></tr>
              <tr><td>FIIs</td><td>12.35%</td><td>12.66%</td></tr>
            </tbody></table>
          </div>
        </section>
    "#;

    #[test]
    fn test_section_table() {
        let page = Page::parse(PAGE);
        let rows = extract_section_table(&page, Section::Quarters).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][""], json!("Sales +"));
        assert_eq!(rows[0]["Sep 2024"], json!("64,259"));
    }

    #[test]
    fn test_missing_section_or_table() {
        let page = Page::parse(PAGE);
        assert!(extract_section_table(&page, Section::ProfitLoss).is_none());
        assert!(extract_section_table(&page, Section::CashFlow).is_none());
    }

    #[test]
    fn test_shareholding_prefers_quarterly_view() {
        let page = Page::parse(PAGE);
        let rows = extract_shareholding(&page).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Jun 2024"], json!("71.77%"));
        assert_eq!(rows[1][""], json!("FIIs"));
    }

    #[test]
    fn test_shareholding_falls_back_to_yearly_view() {
        let page = Page::parse(
            r#"<section id="shareholding"><div id="yearly-shp">
                <table><thead><tr><th></th><th>Mar 2024</th></tr></thead>
                <tbody><tr><td>Public</td><td>14.2%</td></tr></tbody></table>
            </div></section>"#,
        );
        let rows = extract_shareholding(&page).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Mar 2024"], json!("14.2%"));
    }

    #[test]
    fn test_shareholding_without_view() {
        let page = Page::parse(r#"<section id="shareholding"><table></table></section>"#);
        assert!(extract_shareholding(&page).is_none());
    }
}
