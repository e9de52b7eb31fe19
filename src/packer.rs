//! Pixel-to-bitplane packer
//!
//! Samples a paletted image in fixed-size tiles and packs each pixel row
//! into 1-bit-per-pixel bytes. A pixel is visible (bit 1) unless its palette
//! index equals the designated background index; no other palette index
//! carries meaning here.

use crate::error::Error;
use crate::image::IndexedImage;

/// VIC-II hardware sprite format: 24x21 pixels, 63 data bytes padded to the
/// 64-byte sprite-pointer stride.
pub const SPRITE_WIDTH: u32 = 24;
pub const SPRITE_HEIGHT: u32 = 21;

/// Character glyphs are 8x8 pixels, one byte per row.
pub const CHAR_WIDTH: u32 = 8;
pub const CHAR_HEIGHT: u32 = 8;

/// Packed 1-bpp bitmap of a single tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBlock {
    bytes: Vec<u8>,
    row_bytes: usize,
    pad_bytes: usize,
}

impl PackedBlock {
    /// All bytes of the block, pixel rows first, padding last.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Pixel rows, `tile_width / 8` bytes each, padding excluded.
    pub fn pixel_rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.bytes[..self.bytes.len() - self.pad_bytes].chunks_exact(self.row_bytes)
    }

    /// Trailing padding bytes (always zero).
    pub fn padding(&self) -> &[u8] {
        &self.bytes[self.bytes.len() - self.pad_bytes..]
    }
}

/// Pack every `tile_width` x `tile_height` tile of `image` into a 1-bpp block.
///
/// Tiles are visited row-major over the image: tile-rows top to bottom,
/// tile-columns left to right. Within a tile, pixel rows run top to bottom,
/// bytes left to right, and the leftmost pixel of each byte lands in bit 7.
/// `pad_bytes` zero bytes are appended to every block.
///
/// Every sampled coordinate is bounds-checked: a tile layout that does not
/// fit the image fails the whole pack rather than truncating or wrapping.
pub fn pack(
    image: &IndexedImage,
    tile_width: u32,
    tile_height: u32,
    background: u8,
    pad_bytes: usize,
) -> Result<Vec<PackedBlock>, Error> {
    if tile_width == 0 || tile_width % 8 != 0 {
        return Err(Error::TileWidth { width: tile_width });
    }
    if tile_height == 0 {
        return Err(Error::TileHeight {
            height: tile_height,
        });
    }

    let mut blocks = Vec::new();
    let mut top = 0;
    while top < image.height() {
        let mut left = 0;
        while left < image.width() {
            blocks.push(pack_tile(
                image,
                left,
                top,
                tile_width,
                tile_height,
                background,
                pad_bytes,
            )?);
            left += tile_width;
        }
        top += tile_height;
    }

    tracing::debug!(
        "packed {} {}x{} tiles from {}x{} image",
        blocks.len(),
        tile_width,
        tile_height,
        image.width(),
        image.height()
    );
    Ok(blocks)
}

fn pack_tile(
    image: &IndexedImage,
    left: u32,
    top: u32,
    tile_width: u32,
    tile_height: u32,
    background: u8,
    pad_bytes: usize,
) -> Result<PackedBlock, Error> {
    let row_bytes = (tile_width / 8) as usize;
    let mut bytes = Vec::with_capacity(tile_height as usize * row_bytes + pad_bytes);

    for y in top..top + tile_height {
        for byte_index in 0..row_bytes as u32 {
            let start_x = left + byte_index * 8;
            let mut value = 0u8;
            for i in 0..8 {
                let pixel = image.palette_index_at(start_x + i, y)?;
                value = (value << 1) | u8::from(pixel != background);
            }
            bytes.push(value);
        }
    }
    bytes.resize(bytes.len() + pad_bytes, 0);

    Ok(PackedBlock {
        bytes,
        row_bytes,
        pad_bytes,
    })
}

/// Pack 8x8 character glyphs, no padding.
pub fn pack_charset(image: &IndexedImage, background: u8) -> Result<Vec<PackedBlock>, Error> {
    pack(image, CHAR_WIDTH, CHAR_HEIGHT, background, 0)
}

/// Pack 24x21 hardware sprites with the pointer-stride padding byte.
pub fn pack_sprites(image: &IndexedImage, background: u8) -> Result<Vec<PackedBlock>, Error> {
    pack(image, SPRITE_WIDTH, SPRITE_HEIGHT, background, 1)
}

/// Check declared sprite-sheet tile dimensions against the hardware format.
///
/// Callers validate this before touching the image: a sheet declared at the
/// wrong size is an input error, not a warning.
pub fn check_sprite_dimensions(width: u32, height: u32) -> Result<(), Error> {
    if width != SPRITE_WIDTH || height != SPRITE_HEIGHT {
        return Err(Error::SpriteDimensions { width, height });
    }
    Ok(())
}
