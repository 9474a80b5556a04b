use clap::{Parser, Subcommand};
use cli::{convert, ConversionJob};
use color_eyre::eyre::Result;
use raster_shapes::{AlphaMode, GridSource, OutputFormat, RasterSource, TextArt};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single image into vector shapes
    Convert {
        /// Path to the input image
        #[arg(short, long)]
        input: PathBuf,
        /// Output file (.svg, .geojson or .json)
        #[arg(short, long)]
        output: PathBuf,
        /// Output format; inferred from the output extension when omitted
        #[arg(short, long)]
        format: Option<OutputFormat>,
        /// Treat pixels that differ only in alpha as different colors
        #[arg(long)]
        keep_alpha: bool,
        /// Keep every step of each polygon outline
        #[arg(long)]
        no_reduce: bool,
        /// Also write the equivalent job file (.toml or .json) for `process`
        #[arg(long)]
        save_job: Option<PathBuf>,
    },
    /// Run a conversion job from a configuration file
    Process {
        /// Path to the TOML or JSON configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Render the built-in sailboat scene
    Demo {
        /// Output file (.svg, .geojson or .json)
        #[arg(short, long, default_value = "sailboat.svg")]
        output: PathBuf,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Convert {
            input,
            output,
            format,
            keep_alpha,
            no_reduce,
            save_job,
        } => {
            let alpha = if *keep_alpha { AlphaMode::Keep } else { AlphaMode::Ignore };
            let format = match format {
                Some(format) => *format,
                None => OutputFormat::from_path(output)?,
            };
            convert_image(input, output, format, alpha, !*no_reduce)?;

            if let Some(job_path) = save_job {
                ConversionJob::single_image(input, output, format, alpha, !*no_reduce)
                    .to_file(job_path)?;
                info!("Saved job to {}", job_path.display());
            }
        }
        Commands::Process { config } => {
            process_job(config)?;
        }
        Commands::Demo { output } => {
            let grid = TextArt::sailboat().to_grid()?;
            let shapes = convert(grid, true);
            shapes.save_auto(output)?;
            info!("Wrote sailboat to {}", output.display());
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&ConversionJob::schema())?);
        }
    }

    Ok(())
}

fn convert_image(
    input: &Path,
    output: &Path,
    format: OutputFormat,
    alpha: AlphaMode,
    reduce: bool,
) -> Result<()> {
    let grid = RasterSource::open(input, alpha)?.to_grid()?;
    info!(
        "Converting {} ({}x{} cells) -> {}",
        input.display(),
        grid.column_count(),
        grid.row_count(),
        output.display()
    );

    let shapes = convert(grid, reduce);
    shapes.save(output, format)?;
    info!("✅ Wrote {} shapes to {}", shapes.shape_count(), output.display());
    Ok(())
}

fn process_job(config_path: &Path) -> Result<()> {
    let job = ConversionJob::from_file(config_path)?;
    info!("Conversion job: {:?}", job);

    let written = job.run()?;
    for path in &written {
        info!("Wrote {}", path.display());
    }

    info!("✅ Conversion completed!");
    Ok(())
}
