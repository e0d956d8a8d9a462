use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use laser_parts::surface::analyze_surface_file;
use laser_parts::svg::read_svg;
use laser_parts::{
    AssembleOptions, SplitOptions, SurfaceOptions, find_surface_conflicts, split_into_parts,
    write_parts,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "laser-parts",
    version,
    about = "Split fragmented laser-cutting drawings into nested parts"
)]
struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reassemble a drawing's cuts and write one SVG per part
    Split {
        /// Input SVG drawing
        input: PathBuf,

        /// Directory for the part files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Part files are named <PREFIX><N>.svg
        #[arg(long, default_value = "output")]
        prefix: String,

        /// Decimal digits kept when matching fragment endpoints
        #[arg(
            long,
            default_value_t = 0,
            allow_negative_numbers = true,
            value_parser = precision_parser()
        )]
        precision: i32,

        /// Photo of the material; parts overlapping dark regions are reported
        #[arg(long)]
        surface: Option<PathBuf>,

        #[command(flatten)]
        surface_options: SurfaceArgs,
    },

    /// List the non-cuttable regions of a surface photo
    Regions {
        /// Surface image (PNG or JPEG)
        image: PathBuf,

        #[command(flatten)]
        surface_options: SurfaceArgs,
    },
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Ignore regions no taller and no wider than this many pixels
    #[arg(long, default_value_t = 10)]
    min_region: u32,

    /// Rotate the surface photo 90° clockwise first
    #[arg(long)]
    rotate: bool,
}

impl From<&SurfaceArgs> for SurfaceOptions {
    fn from(args: &SurfaceArgs) -> Self {
        SurfaceOptions {
            min_region_size: args.min_region,
            rotate: args.rotate,
        }
    }
}

fn precision_parser() -> clap::builder::RangedI64ValueParser<i32> {
    let range = AssembleOptions::PRECISION_RANGE;
    clap::value_parser!(i32).range(i64::from(*range.start())..=i64::from(*range.end()))
}

/// Console logging, filtered by RUST_LOG
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Split {
            input,
            output_dir,
            prefix,
            precision,
            surface,
            surface_options,
        } => {
            let options = SplitOptions {
                assemble: AssembleOptions { precision },
                output_dir,
                prefix,
            };

            let paths = read_svg(&input)
                .with_context(|| format!("reading drawing '{}'", input.display()))?;
            let parts = split_into_parts(paths, &options.assemble)
                .with_context(|| format!("grouping parts of '{}'", input.display()))?;
            let written = write_parts(&parts, &options)?;
            info!(
                parts = written.len(),
                dir = %options.output_dir.display(),
                "wrote parts"
            );

            if let Some(surface) = surface {
                let regions = analyze_surface_file(&surface, &(&surface_options).into())
                    .with_context(|| format!("analyzing surface '{}'", surface.display()))?;
                for conflict in find_surface_conflicts(&parts, &regions) {
                    warn!(
                        part = %written[conflict.part].display(),
                        region = conflict.region,
                        "part overlaps a non-cuttable region"
                    );
                }
            }
        }
        Command::Regions {
            image,
            surface_options,
        } => {
            let regions = analyze_surface_file(&image, &(&surface_options).into())
                .with_context(|| format!("analyzing surface '{}'", image.display()))?;
            for region in &regions {
                let b = region.bounds;
                println!(
                    "region {}: x {}..{} y {}..{} ({} px)",
                    region.id,
                    b.min_x,
                    b.max_x,
                    b.min_y,
                    b.max_y,
                    region.pixels.len()
                );
            }
            info!(regions = regions.len(), "surface analyzed");
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
