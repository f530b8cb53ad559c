//! Decoder for the compressed `DSR`/`DM0` result format returned by Power BI
//! query endpoints.

mod bitset;
mod decoder;
mod dictionary;
mod errors;
mod last_day;
mod normalize;
mod types;

#[cfg(test)]
mod decoder_test;
#[cfg(test)]
mod last_day_test;

pub use bitset::{is_bit_set, reconstruct_row, reconstruct_rows};
pub use decoder::{DecodeOptions, DecodedResponse, decode, decode_with};
pub use dictionary::expand_values;
pub use errors::{DecodeError, DecodeResult};
pub use last_day::{LastDaySummary, extract_last_day};
pub use normalize::{fill_leading_null, parse_measure, replace_newlines};
pub use types::{
    ColumnDescriptor, CompressedRow, DEFAULT_NEWLINE_REPLACEMENT, DecodedRow, NOT_AVAILABLE,
    ValueDicts,
};
