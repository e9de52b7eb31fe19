//! Error taxonomy for the generator pipeline
//!
//! Every variant is terminal for the invocation: the caller discards any
//! partially produced text and exits non-zero.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("image is not palette-indexed (color type {color_type})")]
    NotIndexed { color_type: String },

    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("tile width {width} must be a positive multiple of 8")]
    TileWidth { width: u32 },

    #[error("tile height {height} must be positive")]
    TileHeight { height: u32 },

    #[error("sprite tiles must be 24x21 pixels, got {width}x{height}")]
    SpriteDimensions { width: u32, height: u32 },

    #[error("unsupported palette bit depth: {depth}")]
    UnsupportedBitDepth { depth: u8 },

    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("format error: {0}")]
    Fmt(#[from] std::fmt::Error),
}
