//! Native command line front end: inspect a matrix file or write a new one.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::color::{ColorScale, ConfigurationError, PixelGrid, colorize};
use crate::matrix::{MatrixError, MatrixStats, SynthesisParams, generate, load_matrix, save_matrix};

/// Everything that makes the tool exit non-zero.
#[derive(Debug, Error)]
pub enum CliError {
	/// Missing or malformed arguments; holds clap's rendered message.
	#[error("{0}")]
	Usage(String),
	/// Reading, parsing, generating or writing a matrix failed.
	#[error(transparent)]
	Matrix(#[from] MatrixError),
	/// Bad rendering options.
	#[error(transparent)]
	Configuration(#[from] ConfigurationError),
	/// The PNG snapshot could not be written.
	#[error("failed to write {}: {source}", path.display())]
	Export {
		/// Destination file.
		path: PathBuf,
		/// Underlying encoder or I/O error.
		#[source]
		source: image::ImageError,
	},
	/// Even one pixel per cell would exceed [`MAX_SNAPSHOT_PIXELS`].
	#[error("a {width}x{height} matrix is too large for a PNG snapshot")]
	SnapshotTooLarge {
		/// Columns in the matrix.
		width: usize,
		/// Rows in the matrix.
		height: usize,
	},
}

/// Upper bound on pixels in an exported snapshot (8192 x 8192).
pub const MAX_SNAPSHOT_PIXELS: u64 = 1 << 26;

impl CliError {
	/// Process exit status for this error.
	pub fn exit_code(&self) -> u8 {
		1
	}
}

/// Community-structure adjacency matrix tool.
#[derive(Debug, Parser)]
#[command(name = "community-matrix", version)]
pub struct Cli {
	/// What to do.
	#[command(subcommand)]
	pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
	/// Load a matrix file, print its statistics and optionally export a PNG.
	Run(RunArgs),
	/// Write a synthetic community matrix in the text format.
	Generate(GenerateArgs),
}

/// Options for `run`.
#[derive(Debug, Args)]
pub struct RunArgs {
	/// Whitespace-delimited square matrix, one row per line.
	pub matrix_file: PathBuf,
	/// Color scale used for the snapshot.
	#[arg(long, default_value_t = ColorScale::default().name().to_string())]
	pub colormap: String,
	/// Write a PNG snapshot here.
	#[arg(long, short)]
	pub output: Option<PathBuf>,
	/// Pixels per matrix cell in the snapshot.
	#[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=64))]
	pub cell_size: u32,
}

/// Options for `generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
	/// Rows in the matrix.
	#[arg(long, default_value_t = SynthesisParams::default().size)]
	pub size: usize,
	/// Number of equal-size communities.
	#[arg(long, default_value_t = SynthesisParams::default().num_communities)]
	pub communities: usize,
	/// Edge probability inside a community.
	#[arg(long, default_value_t = SynthesisParams::default().intra_density)]
	pub intra: f64,
	/// Edge probability between communities.
	#[arg(long, default_value_t = SynthesisParams::default().inter_density)]
	pub inter: f64,
	/// Seed for reproducible output.
	#[arg(long)]
	pub seed: Option<u64>,
	/// Destination file, `matrix_<size>.txt` by default.
	#[arg(long, short)]
	pub output: Option<PathBuf>,
}

/// Parses `args` (program name first) and runs the chosen command.
pub fn run<I, T>(args: I) -> Result<(), CliError>
where
	I: IntoIterator<Item = T>,
	T: Into<OsString> + Clone,
{
	let cli = match Cli::try_parse_from(args) {
		Ok(cli) => cli,
		Err(e) if !e.use_stderr() => {
			// --help and --version
			let _ = e.print();
			return Ok(());
		}
		Err(e) => return Err(CliError::Usage(e.render().to_string())),
	};
	match cli.command {
		Command::Run(args) => run_matrix(&args).map(drop),
		Command::Generate(args) => generate_matrix(&args).map(drop),
	}
}

/// Loads `args.matrix_file`, prints its statistics and writes the snapshot.
pub fn run_matrix(args: &RunArgs) -> Result<MatrixStats, CliError> {
	let matrix = load_matrix(&args.matrix_file)?;
	let grid = colorize(&matrix, &args.colormap)?;
	let stats = MatrixStats::compute(&matrix);
	info!("Creating visualization for {0}x{0} matrix", matrix.size());
	println!("{stats}");

	if let Some(path) = &args.output {
		let cell_size = snapshot_cell_size(grid.width, grid.height, args.cell_size).ok_or(
			CliError::SnapshotTooLarge {
				width: grid.width,
				height: grid.height,
			},
		)?;
		if cell_size < args.cell_size {
			warn!(
				"Reducing cell size from {} to {cell_size} to keep the snapshot under {MAX_SNAPSHOT_PIXELS} pixels",
				args.cell_size
			);
		}
		export_png(&grid, cell_size, path)?;
		info!("Wrote {} snapshot to {}", args.colormap, path.display());
	}
	Ok(stats)
}

/// Synthesizes a matrix from `args` and saves it; returns the path written.
pub fn generate_matrix(args: &GenerateArgs) -> Result<PathBuf, CliError> {
	let params = SynthesisParams {
		size: args.size,
		num_communities: args.communities,
		intra_density: args.intra,
		inter_density: args.inter,
	};
	let mut rng = match args.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_entropy(),
	};
	let matrix = generate(&params, &mut rng)?;
	let path = args
		.output
		.clone()
		.unwrap_or_else(|| PathBuf::from(format!("matrix_{}.txt", params.size)));
	save_matrix(&matrix, &path)?;
	println!("{}", path.display());
	Ok(path)
}

/// Largest cell size up to `requested` whose image fits [`MAX_SNAPSHOT_PIXELS`].
pub fn snapshot_cell_size(width: usize, height: usize, requested: u32) -> Option<u32> {
	let fits = |cell: u32| {
		let side = |n: usize| (n as u64).checked_mul(cell as u64).filter(|&v| v <= u32::MAX as u64);
		match (side(width), side(height)) {
			(Some(w), Some(h)) => w.checked_mul(h).is_some_and(|px| px <= MAX_SNAPSHOT_PIXELS),
			_ => false,
		}
	};
	(1..=requested).rev().find(|&cell| fits(cell))
}

fn export_png(grid: &PixelGrid, cell_size: u32, path: &Path) -> Result<(), CliError> {
	let (w, h) = (grid.width as u32 * cell_size, grid.height as u32 * cell_size);
	let img = image::RgbImage::from_fn(w, h, |x, y| {
		let px = grid.get((x / cell_size) as usize, (y / cell_size) as usize);
		image::Rgb([px.0, px.1, px.2])
	});
	img.save_with_format(path, image::ImageFormat::Png)
		.map_err(|source| CliError::Export {
			path: path.to_path_buf(),
			source,
		})
}

/// Binary entry point: sets up logging, runs, maps errors to exit status 1.
pub fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	match run(std::env::args_os()) {
		Ok(()) => ExitCode::SUCCESS,
		Err(CliError::Usage(msg)) => {
			eprint!("{msg}");
			ExitCode::from(1)
		}
		Err(e) => {
			error!("{e}");
			eprintln!("Error: {e}");
			if let CliError::Matrix(MatrixError::NotFound(_)) = e {
				eprintln!("Run `community-matrix generate` first to create a matrix file.");
			}
			ExitCode::from(e.exit_code())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn small_matrices_keep_requested_cell_size() {
		assert_eq!(snapshot_cell_size(100, 100, 4), Some(4));
		assert_eq!(snapshot_cell_size(0, 0, 4), Some(4));
	}

	#[test]
	fn cell_size_shrinks_to_fit_budget() {
		// 4096 * 2 = 8192 per side is exactly the budget.
		assert_eq!(snapshot_cell_size(4096, 4096, 64), Some(2));
		assert_eq!(snapshot_cell_size(5000, 5000, 4), Some(1));
	}

	#[test]
	fn huge_matrices_cannot_be_exported() {
		assert_eq!(snapshot_cell_size(10_000, 10_000, 4), None);
		assert_eq!(snapshot_cell_size(usize::MAX, 1, 1), None);
	}
}
