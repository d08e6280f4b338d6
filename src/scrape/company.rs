use once_cell::sync::Lazy;
use scraper::Selector;
use serde_json::Value;

use super::dom::{find_by_class, find_by_text, find_next, text_of, Page};
use crate::core::types::CompanyInfo;

pub const COMPANY_NAME: &str = "Company Name";
pub const CURRENT_PRICE: &str = "Current Price";

static COMPANY_NAME_HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1.margin-0").unwrap());
static NUMBER_SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span.number").unwrap());
static RATIO_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());

pub fn extract_company_name(page: &Page) -> Option<String> {
    page.find_first(&COMPANY_NAME_HEADING).map(text_of)
}

/// Value of the first `span.number` following the "Current Price" label.
pub fn extract_current_price(page: &Page) -> Option<String> {
    let label = find_by_text(page.root(), "span", CURRENT_PRICE)?;
    find_next(page.root(), label, &NUMBER_SPAN).map(text_of)
}

/// `(name, value)` pairs from `<ul id="top-ratios">`, in list order.
///
/// Items lacking either a `span.name` or a `span.number` are skipped.
pub fn extract_top_ratios(page: &Page) -> Option<Vec<(String, String)>> {
    let list = page.find_by_id("ul", "top-ratios")?;
    let ratios = list
        .select(&RATIO_ITEM)
        .filter_map(|item| {
            let name = find_by_class(item, "span", "name")?;
            let value = find_by_class(item, "span", "number")?;
            Some((text_of(name), text_of(value)))
        })
        .collect();
    Some(ratios)
}

/// Company name, current price and every top ratio, each looked up independently.
pub fn extract_company_info(page: &Page) -> CompanyInfo {
    let mut info = CompanyInfo::new();

    let name = extract_company_name(page);
    if name.is_none() {
        log::warn!("Company name heading not found");
    }
    info.insert(COMPANY_NAME.to_string(), name.map_or(Value::Null, Value::String));

    let price = extract_current_price(page);
    if price.is_none() {
        log::warn!("Current price not found");
    }
    info.insert(CURRENT_PRICE.to_string(), price.map_or(Value::Null, Value::String));

    match extract_top_ratios(page) {
        Some(ratios) => {
            for (name, value) in ratios {
                info.insert(name, Value::String(value));
            }
        }
        None => log::warn!("No ratios found in company info"),
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TOP: &str = r#"
        <div class="company-info">
          <h1 class="h2 shrink-text" style="margin: 0.5em 0">Wrong Heading</h1>
          <h1 class="margin-0"> Tata Consultancy Services Ltd </h1>
          <ul id="top-ratios">
            <li class="flex flex-space-between">
              <span class="name"> Market Cap </span>
              <span class="nowrap value">₹ <span class="number">15,06,543</span> Cr.</span>
            </li>
            <li class="flex flex-space-between">
              <span class="name"> Current Price </span>
              <span class="nowrap value">₹ <span class="number">4,165</span></span>
            </li>
            <li class="flex flex-space-between">
              <span class="name">Stock P/E</span>
              <span class="nowrap value"><span class="number">31.2</span></span>
            </li>
          </ul>
        </div>
    "#;

    #[test]
    fn test_extract_company_info() {
        let info = extract_company_info(&Page::parse(TOP));
        assert_eq!(info[COMPANY_NAME], json!("Tata Consultancy Services Ltd"));
        assert_eq!(info[CURRENT_PRICE], json!("4,165"));
        assert_eq!(info["Market Cap"], json!("15,06,543"));
        assert_eq!(info["Stock P/E"], json!("31.2"));

        let keys: Vec<_> = info.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![COMPANY_NAME, CURRENT_PRICE, "Market Cap", "Stock P/E"]
        );
    }

    #[test]
    fn test_ratio_without_number_is_skipped() {
        let html = r#"<ul id="top-ratios">
            <li><span class="name">P/E</span><span class="number">25.3</span></li>
            <li><span class="name">ROE</span><span class="value"></span></li>
        </ul>"#;
        let page = Page::parse(html);
        let ratios = extract_top_ratios(&page).unwrap();
        assert_eq!(ratios, vec![("P/E".to_string(), "25.3".to_string())]);

        let info = extract_company_info(&page);
        assert_eq!(info["P/E"], json!("25.3"));
        assert!(info.get("ROE").is_none());
    }

    #[test]
    fn test_missing_fields_are_null() {
        let info = extract_company_info(&Page::parse("<p>nothing here</p>"));
        assert_eq!(info.len(), 2);
        assert_eq!(info[COMPANY_NAME], Value::Null);
        assert_eq!(info[CURRENT_PRICE], Value::Null);
    }

    #[test]
    fn test_price_label_without_number_is_null() {
        let page = Page::parse(r#"<h1 class="margin-0">Acme</h1><span>Current Price</span>"#);
        assert_eq!(extract_current_price(&page), None);
        assert_eq!(extract_company_name(&page).as_deref(), Some("Acme"));
    }
}
