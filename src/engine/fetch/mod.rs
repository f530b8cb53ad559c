mod client;
mod errors;
mod pacing;


pub use client::{HttpReportClient, ReportClient};
pub use errors::{FetchError, FetchResult};
pub use pacing::monthly_pacing;
