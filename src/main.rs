//! vic-gen - C64 VIC-II asset and render-code generator
//!
//! Packs indexed PNGs into charset/sprite bitplane data and expands
//! tile-map copy loops into straight-line 6502 code, one subcommand per
//! generated fragment. Output goes to stdout for redirection into the
//! hand-written program's source tree.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vic_gen::packer::{SPRITE_HEIGHT, SPRITE_WIDTH};
use vic_gen::sprite_state::{SpriteStateLayout, HARDWARE_SPRITES};
use vic_gen::unroll::{TransferLayout, SCREEN_COLUMNS, SCREEN_ROWS};

#[derive(Parser)]
#[command(name = "vic-gen")]
#[command(about = "C64 VIC-II asset and render-code generator")]
#[command(version)]
struct Cli {
    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack an 8x8 character set from an indexed PNG
    Charset {
        /// Input indexed-color PNG
        input: PathBuf,

        /// Palette index treated as background (bit 0)
        #[arg(short, long, default_value_t = 0)]
        background: u8,
    },

    /// Pack 24x21 hardware sprites from an indexed PNG
    Sprites {
        /// Input indexed-color PNG
        input: PathBuf,

        /// Declared sprite width in pixels (must match the hardware format)
        #[arg(long, default_value_t = SPRITE_WIDTH)]
        width: u32,

        /// Declared sprite height in pixels (must match the hardware format)
        #[arg(long, default_value_t = SPRITE_HEIGHT)]
        height: u32,

        /// Palette index treated as background (bit 0)
        #[arg(short, long, default_value_t = 0)]
        background: u8,

        /// First label index, so label ranges stay disjoint across sheets
        #[arg(short = 'i', long, default_value_t = 0)]
        start_index: u32,

        /// Label prefix for the emitted blocks
        #[arg(short = 'p', long, default_value = "sprites_data")]
        label_prefix: String,
    },

    /// Unroll the full tile-map-to-screen copy
    TileMap {
        /// Screen rows to copy
        #[arg(long, default_value_t = SCREEN_ROWS)]
        rows: u32,

        /// Screen columns per row
        #[arg(long, default_value_t = SCREEN_COLUMNS)]
        columns: u32,

        /// Zero-page symbol holding the starting tile-map offset
        #[arg(long, default_value = "tmp1")]
        cursor: String,

        /// Screen base symbol
        #[arg(long, default_value = "screen")]
        screen_base: String,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Per-row copy fragment for a runtime column loop
    ScreenRows {
        /// Destination screen symbol
        screen: String,

        /// First destination screen row
        y_offset: u32,

        /// Number of rows to copy
        rows: u32,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Flush the sprite-state table into VIC-II registers
    SpriteState {
        /// Number of hardware sprites to update
        #[arg(long, default_value_t = HARDWARE_SPRITES)]
        sprites: u32,
    },
}

/// Symbol names shared by the unrolling subcommands.
#[derive(clap::Args)]
struct LayoutArgs {
    /// Tile-map base symbol
    #[arg(long, default_value = "tile_map")]
    tile_base: String,

    /// Tile-map row stride symbol
    #[arg(long, default_value = "TILE_MAP_WIDTH")]
    tile_stride: String,

    /// Screen row stride symbol
    #[arg(long, default_value = "SCREEN_WIDTH")]
    screen_stride: String,
}

impl LayoutArgs {
    fn into_layout(self, screen_base: String) -> TransferLayout {
        TransferLayout {
            tile_base: self.tile_base,
            tile_stride: self.tile_stride,
            screen_base,
            screen_stride: self.screen_stride,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the generated text.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let text = match cli.command {
        Commands::Charset { input, background } => vic_gen::generate_charset(&input, background)
            .with_context(|| format!("failed to pack charset from {}", input.display()))?,

        Commands::Sprites {
            input,
            width,
            height,
            background,
            start_index,
            label_prefix,
        } => {
            let out = vic_gen::generate_sprites(
                &input,
                width,
                height,
                background,
                &label_prefix,
                start_index,
            )
            .with_context(|| format!("failed to pack sprites from {}", input.display()))?;
            tracing::info!("next free label index: {}", out.next_label);
            out.text
        }

        Commands::TileMap {
            rows,
            columns,
            cursor,
            screen_base,
            layout,
        } => {
            vic_gen::generate_tile_map_copy(&layout.into_layout(screen_base), rows, columns, &cursor)?
        }

        Commands::ScreenRows {
            screen,
            y_offset,
            rows,
            layout,
        } => vic_gen::generate_screen_copy(&layout.into_layout(screen), rows, y_offset)?,

        Commands::SpriteState { sprites } => {
            vic_gen::generate_sprite_state(&SpriteStateLayout::default(), sprites)?
        }
    };

    match cli.output {
        Some(path) => std::fs::write(&path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", text),
    }

    Ok(())
}
