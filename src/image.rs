//! Indexed PNG loading boundary
//!
//! The packer is defined over palette indices, so decoding must not expand
//! the palette to RGB. This wraps the `png` decoder with transformations
//! disabled and exposes the image as `width`/`height`/`palette_index_at`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::Error;

/// A decoded palette-indexed image, one palette index per pixel regardless
/// of the bit depth used on disk.
#[derive(Debug, Clone)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    indices: Vec<u8>,
}

impl IndexedImage {
    /// Load an indexed PNG from disk.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::decode(BufReader::new(file))
    }

    /// Decode an indexed PNG from a reader.
    ///
    /// Any color type other than `Indexed` is rejected: a non-paletted
    /// image has no background index to test against.
    pub fn decode<R: Read>(r: R) -> Result<Self, Error> {
        let mut decoder = png::Decoder::new(r);
        // The default transformations expand indexed data to RGB.
        decoder.set_transformations(png::Transformations::IDENTITY);
        let mut reader = decoder.read_info()?;

        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;

        if info.color_type != png::ColorType::Indexed {
            return Err(Error::NotIndexed {
                color_type: format!("{:?}", info.color_type),
            });
        }

        let indices = unpack_indices(
            &buf[..info.buffer_size()],
            info.width,
            info.height,
            info.bit_depth,
        )?;

        Ok(Self {
            width: info.width,
            height: info.height,
            indices,
        })
    }

    /// Build an image directly from one palette index per pixel.
    pub fn from_indices(width: u32, height: u32, indices: Vec<u8>) -> Self {
        assert_eq!(indices.len(), (width * height) as usize);
        Self {
            width,
            height,
            indices,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette index of the pixel at (x, y).
    ///
    /// Out-of-bounds coordinates mean the requested tile layout disagrees
    /// with the image, which aborts the whole run.
    pub fn palette_index_at(&self, x: u32, y: u32) -> Result<u8, Error> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.indices[(y * self.width + x) as usize])
    }
}

/// Unpack scanlines of 1/2/4/8-bit palette indices to one byte per pixel.
///
/// Scanlines are padded to a byte boundary, so rows are walked individually
/// rather than treating the buffer as one bit stream.
fn unpack_indices(
    data: &[u8],
    width: u32,
    height: u32,
    depth: png::BitDepth,
) -> Result<Vec<u8>, Error> {
    let bits = match depth {
        png::BitDepth::One => 1usize,
        png::BitDepth::Two => 2,
        png::BitDepth::Four => 4,
        png::BitDepth::Eight => 8,
        png::BitDepth::Sixteen => return Err(Error::UnsupportedBitDepth { depth: 16 }),
    };
    if bits == 8 {
        return Ok(data.to_vec());
    }

    let row_bytes = (width as usize * bits + 7) / 8;
    let mask = (1u8 << bits) - 1;
    let mut indices = Vec::with_capacity((width * height) as usize);
    for row in data.chunks_exact(row_bytes).take(height as usize) {
        for x in 0..width as usize {
            let bit_offset = x * bits;
            let shift = 8 - bits - bit_offset % 8;
            indices.push((row[bit_offset / 8] >> shift) & mask);
        }
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            if color == png::ColorType::Indexed {
                encoder.set_palette(vec![0, 0, 0, 255, 255, 255]);
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn decode_indexed_png_keeps_indices() {
        let indices = vec![0, 1, 1, 0, 1, 0, 0, 1];
        let png_bytes = encode_png(4, 2, png::ColorType::Indexed, &indices);

        let img = IndexedImage::decode(&png_bytes[..]).unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.palette_index_at(0, 0).unwrap(), 0);
        assert_eq!(img.palette_index_at(1, 0).unwrap(), 1);
        assert_eq!(img.palette_index_at(3, 1).unwrap(), 1);
    }

    #[test]
    fn decode_rejects_rgb_png() {
        let pixels = vec![0u8; 2 * 2 * 3];
        let png_bytes = encode_png(2, 2, png::ColorType::Rgb, &pixels);

        let err = IndexedImage::decode(&png_bytes[..]).unwrap_err();
        assert!(matches!(err, Error::NotIndexed { .. }));
    }

    #[test]
    fn out_of_bounds_sample_is_an_error() {
        let img = IndexedImage::from_indices(2, 2, vec![0; 4]);
        assert!(img.palette_index_at(1, 1).is_ok());
        assert!(matches!(
            img.palette_index_at(2, 0),
            Err(Error::OutOfBounds { x: 2, y: 0, .. })
        ));
        assert!(matches!(
            img.palette_index_at(0, 2),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn unpack_four_bit_indices() {
        // Two 4-bit indices per byte, MSB nibble first: row 0 = [1, 2, 3],
        // row 1 = [15, 0, 7]. Odd width leaves the low nibble of the last
        // byte as padding.
        let data = vec![0x12, 0x30, 0xF0, 0x70];
        let indices = unpack_indices(&data, 3, 2, png::BitDepth::Four).unwrap();
        assert_eq!(indices, vec![1, 2, 3, 15, 0, 7]);
    }

    #[test]
    fn unpack_one_bit_indices() {
        // 10101010 packs eight 1-bit indices into one byte.
        let indices = unpack_indices(&[0b1010_1010], 8, 1, png::BitDepth::One).unwrap();
        assert_eq!(indices, vec![1, 0, 1, 0, 1, 0, 1, 0]);
    }
}
