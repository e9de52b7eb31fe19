//! Sprite-state register update generator
//!
//! The runtime keeps an interleaved table of 4 bytes per sprite: x position,
//! y position, shape pointer, color. This generates the straight-line block
//! that flushes the table into the VIC-II position/color registers and the
//! sprite-pointer slot of each screen page.

use std::fmt::Write;

use crate::error::Error;

/// Bytes per sprite in the state table.
pub const STATE_STRIDE: u32 = 4;

/// The VIC-II drives 8 hardware sprites.
pub const HARDWARE_SPRITES: u32 = 8;

/// Symbol names for the state table and its register targets.
#[derive(Debug, Clone)]
pub struct SpriteStateLayout {
    pub state_base: String,
    /// `{register_prefix}_{n}_X` / `{register_prefix}_{n}_Y` position registers.
    pub register_prefix: String,
    /// Screen pages whose sprite-pointer slots receive the shape pointer.
    pub screen_pages: Vec<String>,
    /// Offset of the sprite-pointer slots within a screen page.
    pub pointer_offset: String,
    pub color_base: String,
}

impl Default for SpriteStateLayout {
    fn default() -> Self {
        Self {
            state_base: "sprites_state".into(),
            register_prefix: "VIC_SPRITE".into(),
            screen_pages: vec!["screen_0".into(), "screen_1".into()],
            pointer_offset: "SPRITE_IX_OFST".into(),
            color_base: "VIC_SPRITE_COLR".into(),
        }
    }
}

/// Generate the register-update block for `sprites` hardware sprites.
pub fn generate(layout: &SpriteStateLayout, sprites: u32) -> Result<String, Error> {
    let mut out = String::new();
    for n in 0..sprites {
        let offset = n * STATE_STRIDE;
        if n > 0 {
            writeln!(out)?;
        }
        writeln!(out, "    ; sprite {}", n)?;
        writeln!(out, "    lda {}+{}", layout.state_base, offset)?;
        writeln!(out, "    sta {}_{}_X", layout.register_prefix, n)?;
        writeln!(out, "    lda {}+{}", layout.state_base, offset + 1)?;
        writeln!(out, "    sta {}_{}_Y", layout.register_prefix, n)?;
        writeln!(out, "    lda {}+{}", layout.state_base, offset + 2)?;
        for page in &layout.screen_pages {
            writeln!(out, "    sta {}+{}+{}", page, layout.pointer_offset, n)?;
        }
        writeln!(out, "    lda {}+{}", layout.state_base, offset + 3)?;
        writeln!(out, "    sta {}+{}", layout.color_base, n)?;
    }
    Ok(out)
}
