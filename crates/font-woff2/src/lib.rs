//! WOFF2 decoding and encoding for subset web fonts.
//!
//! HarfBuzz only understands raw sfnt data, so WOFF2 input is decompressed
//! before subsetting and the subset is compressed again afterwards.
//!
//! # Example
//!
//! ```no_run
//! use playfair_font_woff2::{decode, encode};
//!
//! let woff2_data: &[u8] = &[];
//! let ttf = decode(woff2_data).unwrap();
//! let woff2 = encode(&ttf).unwrap();
//! ```

use std::io::Cursor;

use anyhow::{Context, Result, anyhow};
use ttf2woff2::BrotliQuality;
use woff2::decode::convert_woff2_to_ttf;

/// Signature at the start of every WOFF2 file.
pub const WOFF2_SIGNATURE: &[u8; 4] = b"wOF2";

/// Returns `true` if the data starts with the WOFF2 signature.
pub fn is_woff2(data: &[u8]) -> bool {
    data.starts_with(WOFF2_SIGNATURE)
}

/// Decompresses WOFF2 data into a raw sfnt.
///
/// Data without the WOFF2 signature is assumed to already be an sfnt and is
/// returned unchanged.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    if !is_woff2(data) {
        return Ok(data.to_vec());
    }
    convert_woff2_to_ttf(&mut Cursor::new(data)).context("Failed to decode WOFF2")
}

/// Compresses a raw sfnt into WOFF2 using maximum Brotli quality.
pub fn encode(ttf_data: &[u8]) -> Result<Vec<u8>> {
    ttf2woff2::encode(ttf_data, BrotliQuality::default())
        .map_err(|e| anyhow!("Failed to encode WOFF2: {e}"))
}
