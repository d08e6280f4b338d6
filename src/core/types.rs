use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One table row keyed by column header, in header order.
///
/// Built from a `serde_json` map with insertion order preserved. When a header
/// label repeats, the later cell overwrites the earlier one (last value wins)
/// while the key keeps its first position.
pub type Record = Map<String, Value>;

pub type RecordTable = Vec<Record>;

/// Scalar company fields. Label-derived keys; `Company Name` and
/// `Current Price` are always present and may be null.
pub type CompanyInfo = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyIds {
    pub company_id: String,
    pub warehouse_id: String,
}

/// Named statement sections laid out as `<section id="...">` on the company page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Quarters,
    ProfitLoss,
    BalanceSheet,
    CashFlow,
    Ratios,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Quarters,
        Section::ProfitLoss,
        Section::BalanceSheet,
        Section::CashFlow,
        Section::Ratios,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Quarters => "quarters",
            Section::ProfitLoss => "profit-loss",
            Section::BalanceSheet => "balance-sheet",
            Section::CashFlow => "cash-flow",
            Section::Ratios => "ratios",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub company_info: Option<CompanyInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quarters: Option<RecordTable>,
    #[serde(rename = "profit-loss", skip_serializing_if = "Option::is_none", default)]
    pub profit_loss: Option<RecordTable>,
    #[serde(rename = "balance-sheet", skip_serializing_if = "Option::is_none", default)]
    pub balance_sheet: Option<RecordTable>,
    #[serde(rename = "cash-flow", skip_serializing_if = "Option::is_none", default)]
    pub cash_flow: Option<RecordTable>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ratios: Option<RecordTable>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shareholding: Option<RecordTable>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub peer_comparison: Option<RecordTable>,
}

impl AggregateResult {
    pub fn section(&self, section: Section) -> Option<&RecordTable> {
        self.section_slot(section).as_ref()
    }

    pub fn set_section(&mut self, section: Section, table: Option<RecordTable>) {
        *self.section_slot_mut(section) = table;
    }

    fn section_slot(&self, section: Section) -> &Option<RecordTable> {
        match section {
            Section::Quarters => &self.quarters,
            Section::ProfitLoss => &self.profit_loss,
            Section::BalanceSheet => &self.balance_sheet,
            Section::CashFlow => &self.cash_flow,
            Section::Ratios => &self.ratios,
        }
    }

    fn section_slot_mut(&mut self, section: Section) -> &mut Option<RecordTable> {
        match section {
            Section::Quarters => &mut self.quarters,
            Section::ProfitLoss => &mut self.profit_loss,
            Section::BalanceSheet => &mut self.balance_sheet,
            Section::CashFlow => &mut self.cash_flow,
            Section::Ratios => &mut self.ratios,
        }
    }
}
