use super::dom::Page;
use crate::core::types::CompanyIds;

pub const COMPANY_INFO_ID: &str = "company-info";
pub const COMPANY_ID_ATTR: &str = "data-company-id";
pub const WAREHOUSE_ID_ATTR: &str = "data-warehouse-id";

/// Reads the company and warehouse ids off `<div id="company-info">`.
///
/// Both attributes must be present and non-empty.
pub fn extract_company_ids(page: &Page) -> Option<CompanyIds> {
    let Some(container) = page.find_by_id("div", COMPANY_INFO_ID) else {
        log::warn!("Company ID and Warehouse ID not found in '{}' div", COMPANY_INFO_ID);
        return None;
    };

    let attr = |name: &str| {
        container
            .value()
            .attr(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    match (attr(COMPANY_ID_ATTR), attr(WAREHOUSE_ID_ATTR)) {
        (Some(company_id), Some(warehouse_id)) => Some(CompanyIds {
            company_id,
            warehouse_id,
        }),
        (company_id, warehouse_id) => {
            log::warn!(
                "Incomplete ids on '{}': company_id={:?} warehouse_id={:?}",
                COMPANY_INFO_ID,
                company_id,
                warehouse_id
            );
            None
        }
    }
}
