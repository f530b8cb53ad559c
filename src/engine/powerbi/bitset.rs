use serde_json::Value;
use tracing::trace;

use super::errors::{DecodeError, DecodeResult};
use super::types::{CompressedRow, DecodedRow};

pub fn is_bit_set(index: usize, bitset: u64) -> bool {
    index < u64::BITS as usize && (bitset >> index) & 1 == 1
}

/// Expands one compressed row to `width` cells.
///
/// Columns flagged in the copy mask take the value at the same index of
/// `previous`; columns flagged in the null mask become `null`. Copy wins when
/// both bits are set. The row's own cells fill the remaining columns in order.
pub fn reconstruct_row(
    previous: Option<&[Value]>,
    row: CompressedRow,
    width: usize,
    position: usize,
) -> DecodeResult<DecodedRow> {
    if !row.has_masks() {
        if row.cells.len() != width {
            return Err(DecodeError::RowWidth {
                row: position,
                expected: width,
                found: row.cells.len(),
            });
        }
        return Ok(row.cells);
    }

    let masked = (0..width)
        .filter(|&i| is_bit_set(i, row.copy_mask) || is_bit_set(i, row.null_mask))
        .count();
    let found = row.cells.len() + masked;
    if found != width {
        return Err(DecodeError::RowWidth {
            row: position,
            expected: width,
            found,
        });
    }

    let mut given = row.cells.into_iter();
    let mut cells = Vec::with_capacity(width);
    for i in 0..width {
        if is_bit_set(i, row.copy_mask) {
            let value = previous
                .and_then(|prev| prev.get(i))
                .ok_or(DecodeError::MissingPreviousRow { row: position })?;
            cells.push(value.clone());
        } else if is_bit_set(i, row.null_mask) {
            cells.push(Value::Null);
        } else {
            // Counted above, cannot run out.
            cells.push(given.next().unwrap_or(Value::Null));
        }
    }

    trace!(
        target: "pilgrim_stats::decode",
        row = position,
        copy_mask = row.copy_mask,
        null_mask = row.null_mask,
        "Reconstructed row"
    );
    Ok(cells)
}

/// Reconstructs rows in order, each one against the already reconstructed row
/// before it. `seed` stands in as the predecessor of the first row.
pub fn reconstruct_rows(
    width: usize,
    rows: Vec<CompressedRow>,
    seed: Option<&[Value]>,
) -> DecodeResult<Vec<DecodedRow>> {
    rows.into_iter()
        .enumerate()
        .try_fold(Vec::new(), |mut out: Vec<DecodedRow>, (position, row)| {
            let previous = out.last().map(Vec::as_slice).or(seed);
            let current = reconstruct_row(previous, row, width, position)?;
            out.push(current);
            Ok(out)
        })
}
