//! vic-gen - C64 VIC-II asset and render-code generator library
//!
//! Converts indexed-color PNGs and fixed layout parameters into ca65-style
//! assembly fragments: packed 1-bpp charset and sprite data, unrolled
//! tile-map-to-screen copy code, and the sprite-state register flush.
//!
//! Each `generate_*` function is one complete pipeline (image -> packer ->
//! emitter, or unroller -> emitter) returning the finished text, banner
//! included. Nothing here touches stdout; writing is the binary's job.

pub mod emit;
pub mod error;
pub mod image;
pub mod packer;
pub mod sprite_state;
pub mod unroll;

pub use error::Error;
pub use image::IndexedImage;

use std::path::Path;

use sprite_state::SpriteStateLayout;
use unroll::TransferLayout;

/// Result of a sprite-sheet conversion: the generated text and the label
/// index the next invocation should start from.
#[derive(Debug)]
pub struct SpriteOutput {
    pub text: String,
    pub next_label: u32,
}

/// Pack an indexed PNG into 8x8 charset data.
pub fn generate_charset(input: &Path, background: u8) -> Result<String, Error> {
    let image = IndexedImage::load(input)?;
    let blocks = packer::pack_charset(&image, background)?;
    tracing::info!(
        "packed {} glyphs from {}x{} image",
        blocks.len(),
        image.width(),
        image.height()
    );

    let mut out = banner_for("charset");
    out.push_str(&emit::emit_charset(&blocks)?);
    Ok(out)
}

/// Pack an indexed PNG into labeled 24x21 sprite data.
///
/// `tile_width`/`tile_height` declare what the caller believes the sheet
/// contains; they are validated against the hardware format before the
/// image is touched. `start_index` seeds the label counter so several
/// sheets can share one label namespace.
pub fn generate_sprites(
    input: &Path,
    tile_width: u32,
    tile_height: u32,
    background: u8,
    label_prefix: &str,
    start_index: u32,
) -> Result<SpriteOutput, Error> {
    packer::check_sprite_dimensions(tile_width, tile_height)?;

    let image = IndexedImage::load(input)?;
    let blocks = packer::pack_sprites(&image, background)?;
    tracing::info!(
        "packed {} sprites from {}x{} image",
        blocks.len(),
        image.width(),
        image.height()
    );

    let (body, next_label) = emit::emit_sprites(&blocks, label_prefix, start_index)?;
    let mut text = banner_for("sprites");
    text.push_str(&body);
    Ok(SpriteOutput { text, next_label })
}

/// Unroll the full tile-map-to-screen copy into straight-line code.
pub fn generate_tile_map_copy(
    layout: &TransferLayout,
    rows: u32,
    columns: u32,
    cursor: &str,
) -> Result<String, Error> {
    let pairs = unroll::unroll_tile_map(layout, rows, columns);
    let mut out = banner_for("tile-map");
    out.push_str(&emit::emit_tile_map_copy(&pairs, cursor)?);
    Ok(out)
}

/// Generate the per-row copy fragment for a runtime column loop.
pub fn generate_screen_copy(
    layout: &TransferLayout,
    rows: u32,
    y_offset: u32,
) -> Result<String, Error> {
    let pairs = unroll::unroll_screen_rows(layout, rows, y_offset);
    let mut out = banner_for("screen-rows");
    out.push_str(&emit::emit_screen_copy(&pairs)?);
    Ok(out)
}

/// Generate the sprite-state register flush.
pub fn generate_sprite_state(layout: &SpriteStateLayout, sprites: u32) -> Result<String, Error> {
    let mut out = banner_for("sprite-state");
    out.push_str(&sprite_state::generate(layout, sprites)?);
    Ok(out)
}

fn banner_for(subcommand: &str) -> String {
    emit::banner(&format!("vic-gen {}", subcommand))
}
