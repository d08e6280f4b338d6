pub mod company;
pub mod dom;
pub mod ids;
pub mod peers;
pub mod sections;
pub mod table;

pub use company::extract_company_info;
pub use dom::Page;
pub use ids::extract_company_ids;
pub use peers::extract_peer_comparison;
pub use sections::{extract_section_table, extract_shareholding};
