//! ca65 text emission
//!
//! Turns packed blocks and unrolled transfer pairs into assembler source.
//! Data bytes are always emitted as 8-character binary literals so the bit
//! positions stay visible in the generated file.

use std::fmt::Write;

use crate::error::Error;
use crate::packer::PackedBlock;
use crate::unroll::{AddrExpr, IndexReg, TransferPair};

/// Generated-file banner. Every output starts with this.
pub fn banner(generator: &str) -> String {
    format!("; generated code by `{}`, do not edit\n", generator)
}

fn byte_literal(value: u8) -> String {
    format!("%{:08b}", value)
}

fn byte_row(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| byte_literal(b))
        .collect::<Vec<_>>()
        .join(", ")
}

fn operand(expr: &AddrExpr) -> String {
    let mut s = format!("{} + {} * {:2}", expr.base, expr.stride, expr.row);
    if let Some(column) = expr.column {
        s.push_str(&format!(" + {:2}", column));
    }
    match expr.index {
        Some(IndexReg::X) => s.push_str(", x"),
        Some(IndexReg::Y) => s.push_str(", y"),
        None => {}
    }
    s
}

/// Emit charset blocks: a zero-based tile-index comment per block, no labels.
pub fn emit_charset(blocks: &[PackedBlock]) -> Result<String, Error> {
    let mut out = String::new();
    for (tile, block) in blocks.iter().enumerate() {
        writeln!(out, "; {}", tile)?;
        for row in block.pixel_rows() {
            writeln!(out, ".byte {}", byte_row(row))?;
        }
    }
    Ok(out)
}

/// Emit sprite blocks with one label per block.
///
/// Labels are `<prefix>_<index>`, starting at `start_index` and advancing by
/// exactly one per block; the advanced counter is returned so a batch run
/// over several sheets can keep its label ranges disjoint. Each pixel row
/// carries a zero-based row comment; padding bytes follow the rows.
pub fn emit_sprites(
    blocks: &[PackedBlock],
    prefix: &str,
    start_index: u32,
) -> Result<(String, u32), Error> {
    let mut out = String::new();
    let mut label = start_index;
    for block in blocks {
        writeln!(out)?;
        writeln!(out, "{}_{}:", prefix, label)?;
        label += 1;
        for (row, bytes) in block.pixel_rows().enumerate() {
            writeln!(out, ".byte {} ; row {}", byte_row(bytes), row)?;
        }
        for &pad in block.padding() {
            writeln!(out, ".byte {}", byte_literal(pad))?;
        }
    }
    Ok((out, label))
}

/// Emit the fully unrolled tile-map copy.
///
/// `cursor` names the zero-page symbol holding the starting tile-map offset;
/// X is reloaded from it at each row and advanced once between columns.
pub fn emit_tile_map_copy(pairs: &[TransferPair], cursor: &str) -> Result<String, Error> {
    let mut out = String::new();
    for pair in pairs {
        if pair.column.map_or(true, |c| c == 0) {
            writeln!(out)?;
            writeln!(out, "    ; row {}", pair.row)?;
            writeln!(out, "    ldx {}", cursor)?;
        } else {
            writeln!(out, "    inx")?;
        }
        writeln!(out, "    lda {}", operand(&pair.src))?;
        writeln!(out, "    sta {}", operand(&pair.dst))?;
    }
    Ok(out)
}

/// Emit the row-looped copy fragment: bare pair lines, registers carried by
/// the caller's runtime loop.
pub fn emit_screen_copy(pairs: &[TransferPair]) -> Result<String, Error> {
    let mut out = String::new();
    for pair in pairs {
        writeln!(out, "    lda {}", operand(&pair.src))?;
        writeln!(out, "    sta {}", operand(&pair.dst))?;
    }
    Ok(out)
}
