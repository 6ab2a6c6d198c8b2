use crate::models::IdentifierBatch;

pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Splits `identifiers` into contiguous batches of at most `batch_size`.
///
/// Only the last batch may be shorter. No identifiers means no batches.
/// A `batch_size` of zero is treated as one.
pub fn partition(identifiers: &[String], batch_size: usize) -> Vec<IdentifierBatch> {
    identifiers
        .chunks(batch_size.max(1))
        .enumerate()
        .filter_map(|(index, chunk)| IdentifierBatch::new(index, chunk.to_vec()))
        .collect()
}
