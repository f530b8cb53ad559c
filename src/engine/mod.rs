pub mod auth;
pub mod fetch;
pub mod powerbi;
pub mod scrape;
pub mod stats;
pub mod store;
pub mod table;
pub mod template;
