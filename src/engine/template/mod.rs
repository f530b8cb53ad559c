//! Rewrites a generic report query template into the payload for one
//! dimension slice and time window.

mod adjuster;
mod errors;
mod query;
mod rules;
mod vocabulary;


pub use adjuster::{TemplateAdjuster, adjust_for_date, adjust_for_period};
pub use errors::{TemplateError, TemplateResult};
pub use query::{QuerySections, QueryTemplate};
pub use vocabulary::TemplateVocabulary;
