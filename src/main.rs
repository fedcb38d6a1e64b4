//! Command line player for the BlinkStick 8x8 grid

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::util::SubscriberInitExt;

use blinkgrid::routines::{self, FrameLimit, TILE_INTERVAL_MS};
use blinkgrid::{BlinkStick, Builder, Grid, Life, MIN_WRITE_DELAY_US, SpriteSheet, StdDelay};

const DEFAULT_SHEET: &str = "8x8_icons.png";
const DEFAULT_MESSAGE: &str = "WHY   AM   I   HERE   ";

#[derive(Parser)]
#[command(name = "blinkgrid")]
#[command(version, about = "Pattern player for an 8x8 BlinkStick LED grid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Stop after this many frames (runs until interrupted if unset)
    #[arg(long, global = true)]
    frames: Option<u64>,

    /// BlinkStick channel the grid is wired to
    #[arg(long, global = true, default_value_t = 0)]
    channel: u8,

    /// Sleep after every LED write, in microseconds
    #[arg(long, global = true, default_value_t = MIN_WRITE_DELAY_US)]
    write_delay_us: u32,

    /// Log every frame
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one tile of the sprite sheet
    Tile {
        /// Tile row on the sheet
        row: u32,
        /// Tile column on the sheet
        col: u32,
        /// Sprite sheet image
        #[arg(long, default_value = DEFAULT_SHEET)]
        sheet: PathBuf,
    },

    /// Cycle through every tile of the sprite sheet
    Tiles {
        /// Sprite sheet image
        #[arg(long, default_value = DEFAULT_SHEET)]
        sheet: PathBuf,
        /// Pause between tiles
        #[arg(long, default_value_t = TILE_INTERVAL_MS)]
        interval_ms: u32,
    },

    /// Cycle through every glyph of the font
    Glyphs,

    /// Show a message one letter at a time
    Message {
        /// Text to show
        #[arg(default_value = DEFAULT_MESSAGE)]
        text: String,
    },

    /// Run Conway's Game of Life
    Life,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .compact()
        .finish()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = Builder::new()
        .channel(cli.channel)
        .write_delay_us(cli.write_delay_us)
        .build()
        .context("invalid configuration")?;
    let limit = FrameLimit::from(cli.frames);
    let mut delay = StdDelay;

    let device = BlinkStick::open().context("failed to open BlinkStick")?;
    let mut grid = Grid::new(device, config, &mut delay).context("failed to initialize grid")?;

    let shown = match cli.command {
        Commands::Tile { row, col, sheet } => {
            let sheet = SpriteSheet::open(&sheet)
                .with_context(|| format!("failed to load {}", sheet.display()))?;
            routines::render_tile(&mut grid, &sheet, row, col, &mut delay)?;
            1
        }
        Commands::Tiles { sheet, interval_ms } => {
            let sheet = SpriteSheet::open(&sheet)
                .with_context(|| format!("failed to load {}", sheet.display()))?;
            routines::cycle_tiles(&mut grid, &sheet, limit, interval_ms, &mut delay)?
        }
        Commands::Glyphs => routines::cycle_glyphs(&mut grid, limit, &mut delay)?,
        Commands::Message { text } => {
            let mut rng = rand::thread_rng();
            routines::scroll_message(&mut grid, &text, &mut rng, limit, &mut delay)?
        }
        Commands::Life => {
            let mut life = Life::new(rand::thread_rng(), &mut grid, &mut delay)?;
            routines::run_life(&mut grid, &mut life, limit, &mut delay)?
        }
    };

    info!("Showed {shown} frames");
    Ok(())
}
