// src/main.rs

//! `crochet-cad` command line: writes a crochet pattern for a ball, donut or
//! cone to stdout.

use std::path::PathBuf;

// Error reporting and logging
use anyhow::Context; // For context on Results
use clap::{Parser, Subcommand};
use log::{debug, info};

// Library items; the defaults double as the CLI defaults.
use crochet_cad::shapes::{DEFAULT_BASE_CIRCUMFERENCE, DEFAULT_HOLE_CIRCUMFERENCE, DEFAULT_ROWS};
use crochet_cad::{LineFormat, Pattern, PatternConfig, Phrasebook, Shape, Stitch};

// --- Command line ---

#[derive(Parser)]
#[command(
    name = "crochet-cad",
    version,
    about = "Generate a crochet pattern for a geometric primitive"
)]
struct Cli {
    /// Print extra information (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Generate an exact pattern, which may not produce such an even end-product.
    /// Balls of 35 or more rows are too steep at the poles to be worked exactly
    #[arg(short, long, global = true)]
    accurate: bool,
    /// Print only the stitch count of each row
    #[arg(long, global = true)]
    rows_only: bool,
    /// Write each row as an HTML element
    #[arg(long, global = true)]
    html: bool,
    /// Stitch to work the pattern in (sc, hdc, dc, tr)
    #[arg(long, default_value = "sc", global = true, value_parser = Stitch::parse_row_stitch)]
    stitch: Stitch,
    /// JSON file overriding the pattern wording
    #[arg(long, value_name = "FILE", global = true)]
    phrasebook: Option<PathBuf>,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// A ball (sphere)
    #[command(alias = "sphere")]
    Ball {
        /// Number of rows; the circumference is about twice this value.
        /// With --accurate, at most 34
        #[arg(short = 'r', long = "row-count", default_value_t = DEFAULT_ROWS)]
        rows: u32,
    },
    /// A donut (torus), started at the hole and worked up and around
    #[command(alias = "torus")]
    Donut {
        /// Circumference of the donut hole, in stitches
        #[arg(short = 'i', long = "inner-radius", default_value_t = DEFAULT_HOLE_CIRCUMFERENCE)]
        hole: u32,
        /// Number of rows; defines the thickness of the donut
        #[arg(short = 'r', long = "row-count", default_value_t = DEFAULT_ROWS)]
        rows: u32,
        /// Angle around the tube, in radians, of the first row
        #[arg(long, default_value_t = 0.0)]
        initial_angle: f64,
    },
    /// A cone, worked from the tip down
    Cone {
        /// Number of rows; defines the height of the cone
        #[arg(short = 'r', long = "row-count", default_value_t = DEFAULT_ROWS)]
        rows: u32,
        /// Number of stitches around the base
        #[arg(short = 'c', long = "max-circumference", default_value_t = DEFAULT_BASE_CIRCUMFERENCE)]
        base: u32,
    },
}

impl Cmd {
    fn shape(&self) -> Shape {
        match *self {
            Cmd::Ball { rows } => Shape::Sphere { rows },
            Cmd::Donut {
                hole,
                rows,
                initial_angle,
            } => Shape::Torus {
                hole,
                rows,
                initial_angle,
            },
            Cmd::Cone { rows, base } => Shape::Cone { rows, base },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse(); // Exits with a usage error if no shape is given

    // -v raises the log level; RUST_LOG still wins when set.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let phrasebook = match &cli.phrasebook {
        Some(path) => Phrasebook::load(path)
            .with_context(|| format!("Failed to load phrasebook {}", path.display()))?,
        None => Phrasebook::default(),
    };

    let config = PatternConfig {
        accurate: cli.accurate,
        rows_only: cli.rows_only,
        format: if cli.html {
            LineFormat::Html
        } else {
            LineFormat::Text
        },
        stitch: cli.stitch,
    };
    debug!("Pattern config: {:?}", config);

    let pattern = Pattern::new(cli.command.shape(), config);
    info!("Generating pattern for {}", pattern.shape);
    let lines = pattern
        .lines(&phrasebook)
        .with_context(|| format!("Failed to generate pattern for {}", pattern.shape))?;

    // Title and underline only for plain-text instructions.
    if !pattern.config.rows_only && pattern.config.format == LineFormat::Text {
        let title = pattern.shape.to_string();
        println!("{}", title);
        println!("{}", "=".repeat(title.chars().count()));
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
