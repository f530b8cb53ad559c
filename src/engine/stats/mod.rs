//! Update jobs: pull report slices, decode them and persist the tables.

mod errors;
mod plan;
mod service;
mod settings;


pub use errors::{StatsError, StatsResult};
pub use plan::month_plan;
pub use service::StatsService;
pub use settings::StatsSettings;
