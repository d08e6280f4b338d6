use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use crate::core::types::{AggregateResult, CompanyIds, RecordTable, Section};
use crate::fetch::Fetcher;
use crate::output;
use crate::scrape::{
    extract_company_ids, extract_company_info, extract_peer_comparison, extract_section_table,
    extract_shareholding, Page,
};

/// Everything the company page yields on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryExtraction {
    pub ids: CompanyIds,
    pub result: AggregateResult,
}

/// Symbols are looked up and written out upper-cased.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

fn non_empty(table: Option<RecordTable>) -> Option<RecordTable> {
    table.filter(|rows| !rows.is_empty())
}

/// Extracts every section of the company page.
///
/// Fails only when the company ids are missing; each other section that
/// yields no rows is left absent.
pub fn extract_primary(markup: &str) -> Result<PrimaryExtraction> {
    let page = Page::parse(markup);

    let ids = extract_company_ids(&page)
        .ok_or_else(|| anyhow!("Failed to extract company ID or Warehouse ID"))?;
    log::info!(
        "Found company_id={} warehouse_id={}",
        ids.company_id,
        ids.warehouse_id
    );

    let mut result = AggregateResult {
        company_info: Some(extract_company_info(&page)),
        ..Default::default()
    };

    for section in Section::ALL {
        let table = non_empty(extract_section_table(&page, section));
        if table.is_none() {
            log::warn!("No data found for section: {}", section);
        }
        result.set_section(section, table);
    }

    result.shareholding = non_empty(extract_shareholding(&page));
    if result.shareholding.is_none() {
        log::warn!("No data found for shareholding section");
    }

    Ok(PrimaryExtraction { ids, result })
}

/// Peer comparison rows from the peers fragment, absent when empty.
pub fn extract_peers(markup: &str) -> Option<RecordTable> {
    let page = Page::parse(markup);
    let table = non_empty(extract_peer_comparison(&page));
    if table.is_none() {
        log::warn!("No data found for peer comparison section");
    }
    table
}

pub struct Aggregator<F> {
    fetcher: F,
}

impl<F: Fetcher> Aggregator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetches the company page, then the peers fragment, one after the other.
    ///
    /// A failed company page fetch or missing ids abort the run; a failed
    /// peers fetch only drops `peer_comparison`.
    pub async fn run(&self, symbol: &str) -> Result<AggregateResult> {
        let symbol = normalize_symbol(symbol);
        let markup = self
            .fetcher
            .company_page(&symbol)
            .await
            .map_err(|e| anyhow!("Failed to retrieve the company page: {}", e))?;

        let PrimaryExtraction { ids, mut result } = extract_primary(&markup)?;

        match self.fetcher.peers(&symbol, &ids.warehouse_id).await {
            Ok(peers_markup) => result.peer_comparison = extract_peers(&peers_markup),
            Err(e) => log::warn!("Failed to fetch peers data: {}", e),
        }

        Ok(result)
    }

    /// Runs the extraction and writes `<dir>/<SYMBOL>.json`; nothing is written on failure.
    pub async fn run_to_file(&self, symbol: &str, dir: &Path) -> Result<PathBuf> {
        let result = self.run(symbol).await?;
        output::write_result(dir, &normalize_symbol(symbol), &result)
    }
}
