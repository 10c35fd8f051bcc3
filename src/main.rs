use anyhow::{Context, Result, bail};
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use meshplot::config::{DEFAULT_IMAGE_SIZE, RenderConfig};
use meshplot::io::{dcel_to_string, load_polygon_mesh, write_dcel};
use meshplot::plot::{Variant, render_file};
use meshplot::validate::check_mesh;
use meshplot::DCEL;
use std::fs;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "meshplot")]
#[command(about = "Draw planar meshes given as polygon lists or half-edge lists")]
struct Cli {
    /// Log debug details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill every face of a polygon list, written to imgs/ by default
    Polygons(RenderArgs),
    /// Draw a polygon list as a labelled figure on cartesian axes, written to imgs/ by default
    Figure(RenderArgs),
    /// Fill the faces of a half-edge list by walking their rings, written to valid/ by default
    Dcel(RenderArgs),
    /// Check that a polygon list is a closed planar subdivision without overlaps
    Check { input: PathBuf },
    /// Convert a valid polygon list into the half-edge list format
    Convert {
        input: PathBuf,
        /// Write here instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RenderArgs {
    input: PathBuf,
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Seed for face colours; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Length of the longer image side in pixels
    #[arg(long, default_value_t = DEFAULT_IMAGE_SIZE)]
    size: u32,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn render(variant: Variant, args: RenderArgs) -> Result<ExitCode> {
    let out_dir = args
        .out_dir
        .unwrap_or_else(|| variant.default_out_dir().to_path_buf());
    let config = RenderConfig {
        size: args.size,
        seed: args.seed,
    };

    let path = render_file(variant, &args.input, &out_dir, &config)
        .with_context(|| format!("failed to render {}", args.input.display()))?;
    println!("Image saved to: {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn check(input: PathBuf) -> Result<ExitCode> {
    let mesh = load_polygon_mesh(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    match check_mesh(&mesh) {
        Ok(()) => {
            println!("valid");
            Ok(ExitCode::SUCCESS)
        }
        Err(defect) => {
            println!("{defect}");
            Ok(ExitCode::from(2))
        }
    }
}

fn convert(input: PathBuf, output: Option<PathBuf>) -> Result<ExitCode> {
    let mesh = load_polygon_mesh(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    if let Err(defect) = check_mesh(&mesh) {
        bail!("{} is not a valid planar subdivision: {defect}", input.display());
    }
    let dcel = DCEL::from_polygon_mesh(&mesh)?;

    match output {
        Some(path) => {
            let file = fs::File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_dcel(&dcel, BufWriter::new(file))?;
            log::info!("wrote DCEL to {}", path.display());
        }
        None => print!("{}", dcel_to_string(&dcel)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            println!("{}", err.render());
            return ExitCode::FAILURE;
        }
    };
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Polygons(args) => render(Variant::Polygons, args),
        Command::Figure(args) => render(Variant::Figure, args),
        Command::Dcel(args) => render(Variant::Dcel, args),
        Command::Check { input } => check(input),
        Command::Convert { input, output } => convert(input, output),
    };

    result.unwrap_or_else(|err| {
        eprintln!("Error: {err:#}");
        ExitCode::FAILURE
    })
}
