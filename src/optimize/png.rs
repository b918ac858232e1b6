//! Lossless PNG recompression.
//!
//! Decodes a PNG and re-encodes it at maximum compression. Pixels and
//! dimensions are unchanged, but the colour type may not be: indexed and
//! sub-byte images are expanded to 8-bit channels on decode. When the
//! re-encoded file is not smaller, the source bytes are kept.

use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ImageFormat;

use crate::error::{PogoError, Result};

/// Recompress PNG bytes, returning whichever encoding is smaller.
pub fn recompress_png(source: &[u8]) -> Result<Vec<u8>> {
    let img = image::load_from_memory_with_format(source, ImageFormat::Png).map_err(|e| {
        PogoError::Parse {
            message: format!("Failed to decode PNG: {}", e),
            help: None,
        }
    })?;

    let mut out = Cursor::new(Vec::with_capacity(source.len()));
    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive);

    img.write_with_encoder(encoder).map_err(|e| PogoError::Build {
        message: format!("Failed to encode PNG: {}", e),
        help: None,
    })?;

    let encoded = out.into_inner();
    if encoded.len() < source.len() {
        Ok(encoded)
    } else {
        Ok(source.to_vec())
    }
}
