//! LZ4 compression of the serialized password list.
//!
//! The uncompressed length is prepended as a little-endian u32 so
//! decompression can allocate exactly once.

use crate::errors::{VaultError, Result};

pub fn compress(data: &[u8]) -> Vec<u8> {
    lz4_flex::compress_prepend_size(data)
}

pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    lz4_flex::decompress_size_prepended(data)
        .map_err(|e| VaultError::ParseFailed(format!("decompression: {e}")))
}
