//! Tile-to-screen transfer unrolling
//!
//! Replaces the runtime "copy a row of tile indices to a screen row" loop
//! with straight-line load/store pairs. Two shapes exist in the consumer
//! program: the fully unrolled copy of the whole tile map, and a per-row
//! fragment whose column sweep stays in a runtime loop.

/// Text screen dimensions in tiles.
pub const SCREEN_COLUMNS: u32 = 40;
pub const SCREEN_ROWS: u32 = 25;

/// Index register an operand is offset by at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexReg {
    X,
    Y,
}

/// Symbolic address `base + stride * row (+ column)`, optionally indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddrExpr {
    pub base: String,
    pub stride: String,
    pub row: u32,
    pub column: Option<u32>,
    pub index: Option<IndexReg>,
}

/// One load/store pair of the unrolled copy.
///
/// `row`/`column` locate the pair in the sweep; `column` is `None` when the
/// column sweep is delegated to the caller's runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPair {
    pub row: u32,
    pub column: Option<u32>,
    pub src: AddrExpr,
    pub dst: AddrExpr,
}

/// Symbol names shared by both unrolling shapes.
#[derive(Debug, Clone)]
pub struct TransferLayout {
    pub tile_base: String,
    pub tile_stride: String,
    pub screen_base: String,
    pub screen_stride: String,
}

impl Default for TransferLayout {
    fn default() -> Self {
        Self {
            tile_base: "tile_map".into(),
            tile_stride: "TILE_MAP_WIDTH".into(),
            screen_base: "screen".into(),
            screen_stride: "SCREEN_WIDTH".into(),
        }
    }
}

/// Fully unrolled copy: one pair per (row, column), row-major.
///
/// The source sweeps the tile map through the shared X register; the
/// destination is a fully recomputed absolute address. The emitter reloads
/// X at the start of each row and increments it once between columns, which
/// must stay exactly equivalent to recomputing the column index per pair.
pub fn unroll_tile_map(layout: &TransferLayout, rows: u32, columns: u32) -> Vec<TransferPair> {
    let mut pairs = Vec::with_capacity(rows as usize * columns as usize);
    for row in 0..rows {
        for column in 0..columns {
            pairs.push(TransferPair {
                row,
                column: Some(column),
                src: AddrExpr {
                    base: layout.tile_base.clone(),
                    stride: layout.tile_stride.clone(),
                    row,
                    column: None,
                    index: Some(IndexReg::X),
                },
                dst: AddrExpr {
                    base: layout.screen_base.clone(),
                    stride: layout.screen_stride.clone(),
                    row,
                    column: Some(column),
                    index: None,
                },
            });
        }
    }
    pairs
}

/// Row-looped copy: one pair per row, column sweep left to the caller.
///
/// X walks the tile map and Y the screen at runtime; only the per-row base
/// offsets are baked in. `y_offset` shifts the destination rows so the same
/// fragment can target either half of a split screen.
pub fn unroll_screen_rows(layout: &TransferLayout, rows: u32, y_offset: u32) -> Vec<TransferPair> {
    (0..rows)
        .map(|row| TransferPair {
            row,
            column: None,
            src: AddrExpr {
                base: layout.tile_base.clone(),
                stride: layout.tile_stride.clone(),
                row,
                column: None,
                index: Some(IndexReg::X),
            },
            dst: AddrExpr {
                base: layout.screen_base.clone(),
                stride: layout.screen_stride.clone(),
                row: y_offset + row,
                column: None,
                index: Some(IndexReg::Y),
            },
        })
        .collect()
}
