//! File payload compression using DEFLATE (zlib container) via `miniz_oxide`
//!
//! Used by the file responder when a `FILE_REQUEST` asks for compressed
//! payloads. Each file's bytes are compressed individually; the `Folder`
//! reply's `compressed` flag tells the peer how to read them.

use miniz_oxide::deflate::compress_to_vec_zlib;
use miniz_oxide::inflate::decompress_to_vec_zlib;

/// DEFLATE compression level (1-10, higher = better ratio, slower)
const COMPRESSION_LEVEL: u8 = 6;

/// Compress a payload into a zlib-wrapped DEFLATE stream
pub fn compress(input: &[u8]) -> Vec<u8> {
    compress_to_vec_zlib(input, COMPRESSION_LEVEL)
}

/// Decompress a zlib-wrapped DEFLATE stream
///
/// Returns `None` on malformed input.
pub fn decompress(input: &[u8]) -> Option<Vec<u8>> {
    match decompress_to_vec_zlib(input) {
        Ok(data) => Some(data),
        Err(e) => {
            log::warn!("decompress: DEFLATE error: {:?}", e);
            None
        }
    }
}
