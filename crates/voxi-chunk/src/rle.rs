//! Run-length persisted chunk format.
//!
//! A chunk is a flat sequence of `(block id, run length)` byte pairs with no
//! header. Rows are visited `y` outermost, then `x`, and each row is consumed
//! run by run along `z`. Runs never cross a row and are always in `[1, 255]`.

use voxi_blocks::Block;

use crate::{BlockStore, CHUNK_SIZE};

/// Largest run a single pair can carry.
pub const MAX_RUN: usize = u8::MAX as usize;

/// Number of rows in a persisted chunk.
pub const ROWS_PER_CHUNK: usize = CHUNK_SIZE * CHUNK_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("chunk data ends mid-stream at byte {offset}")]
    Truncated { offset: usize },
    #[error("zero-length run at byte {offset}")]
    ZeroRun { offset: usize },
    #[error("run of {run} at byte {offset} overflows row with {row_remaining} blocks left")]
    RunOverflowsRow {
        offset: usize,
        row_remaining: usize,
        run: usize,
    },
    #[error("unknown block id {id} at byte {offset}")]
    UnknownBlock { offset: usize, id: u8 },
    #[error("{extra} trailing bytes after the last row")]
    TrailingBytes { extra: usize },
}

/// Appends the runs of one row, splitting runs longer than [`MAX_RUN`].
pub fn encode_row(row: &[Block], out: &mut Vec<u8>) {
    let mut z = 0;
    while z < row.len() {
        let block = row[z];
        let mut len = 1;
        while z + len < row.len() && row[z + len] == block {
            len += 1;
        }
        let mut left = len;
        while left > 0 {
            let run = left.min(MAX_RUN);
            out.extend_from_slice(&[block.id(), run as u8]);
            left -= run;
        }
        z += len;
    }
}

/// Appends the persisted form of `store` to `out`.
pub fn encode(store: &BlockStore, out: &mut Vec<u8>) {
    for y in 0..CHUNK_SIZE {
        for x in 0..CHUNK_SIZE {
            encode_row(store.row(x, y), out);
        }
    }
}

/// Walks `rows` rows of `row_len` blocks, calling `f(row, start, len, block)`
/// per run. Fails on the first malformed pair; `f` has seen only valid runs.
pub fn for_each_run(
    bytes: &[u8],
    rows: usize,
    row_len: usize,
    mut f: impl FnMut(usize, usize, usize, Block),
) -> Result<(), CodecError> {
    let mut offset = 0;
    for row in 0..rows {
        let mut start = 0;
        while start < row_len {
            let pair = bytes
                .get(offset..offset + 2)
                .ok_or(CodecError::Truncated { offset })?;
            let block = Block::from_id(pair[0]).ok_or(CodecError::UnknownBlock {
                offset,
                id: pair[0],
            })?;
            let run = pair[1] as usize;
            if run == 0 {
                return Err(CodecError::ZeroRun { offset });
            }
            let row_remaining = row_len - start;
            if run > row_remaining {
                return Err(CodecError::RunOverflowsRow {
                    offset,
                    row_remaining,
                    run,
                });
            }
            f(row, start, run, block);
            start += run;
            offset += 2;
        }
    }
    if offset != bytes.len() {
        return Err(CodecError::TrailingBytes {
            extra: bytes.len() - offset,
        });
    }
    Ok(())
}

/// Checks that `bytes` describes exactly one chunk.
pub fn validate(bytes: &[u8]) -> Result<(), CodecError> {
    for_each_run(bytes, ROWS_PER_CHUNK, CHUNK_SIZE, |_, _, _, _| {})
}

/// Replaces the contents of `store` with the chunk in `bytes`.
///
/// The stream is validated in full first, so on error `store` is untouched.
pub fn decode_into(bytes: &[u8], store: &mut BlockStore) -> Result<(), CodecError> {
    validate(bytes)?;
    for_each_run(bytes, ROWS_PER_CHUNK, CHUNK_SIZE, |row, start, len, block| {
        let y = row / CHUNK_SIZE;
        let x = row % CHUNK_SIZE;
        store.row_mut(x, y)[start..start + len].fill(block);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_chunk_is_one_pair_per_row() {
        let mut store = BlockStore::new();
        store.fill(Block::Stone);
        let mut out = Vec::new();
        encode(&store, &mut out);
        assert_eq!(out.len(), ROWS_PER_CHUNK * 2);
        assert!(out.chunks(2).all(|p| p == [Block::Stone.id(), CHUNK_SIZE as u8]));
    }

    #[test]
    fn long_row_splits_at_max_run() {
        let row = vec![Block::Dirt; 600];
        let mut out = Vec::new();
        encode_row(&row, &mut out);
        assert_eq!(out, vec![2, 255, 2, 255, 2, 90]);
    }
}
