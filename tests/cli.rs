#![cfg(not(target_arch = "wasm32"))]

use std::ffi::OsString;
use std::fs;

use community_matrix::cli::{self, CliError, GenerateArgs, RunArgs};
use community_matrix::matrix::{MatrixError, load_matrix};

fn run_args(path: std::path::PathBuf) -> RunArgs {
	RunArgs {
		matrix_file: path,
		colormap: "YlOrRd".into(),
		output: None,
		cell_size: 1,
	}
}

#[test]
fn missing_argument_is_a_usage_error() {
	let err = cli::run(["community-matrix", "run"]).unwrap_err();
	assert!(matches!(err, CliError::Usage(ref msg) if msg.contains("Usage")));
	assert_eq!(err.exit_code(), 1);
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
	let err = cli::run(["community-matrix", "serve", "m.txt"]).unwrap_err();
	assert!(matches!(err, CliError::Usage(_)));
}

#[test]
fn missing_file_fails_fast() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.txt");
	let err = cli::run_matrix(&run_args(path.clone())).unwrap_err();
	assert!(matches!(err, CliError::Matrix(MatrixError::NotFound(ref p)) if *p == path));
	assert_eq!(err.exit_code(), 1);
}

#[test]
fn loads_three_by_three_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("path.txt");
	fs::write(&path, "0 1 0\n1 0 1\n0 1 0\n").unwrap();

	let matrix = load_matrix(&path).unwrap();
	assert_eq!(
		matrix.to_rows(),
		vec![
			vec![0.0, 1.0, 0.0],
			vec![1.0, 0.0, 1.0],
			vec![0.0, 1.0, 0.0]
		]
	);

	let stats = cli::run_matrix(&run_args(path)).unwrap();
	assert_eq!(stats.size, 3);
	assert_eq!(stats.total_edges, 2);
}

#[test]
fn unknown_colormap_is_rejected() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("m.txt");
	fs::write(&path, "0 1\n1 0\n").unwrap();
	let args = RunArgs {
		colormap: "rainbow".into(),
		..run_args(path)
	};
	assert!(matches!(
		cli::run_matrix(&args),
		Err(CliError::Configuration(_))
	));
}

#[test]
fn generate_then_run_writes_snapshot() {
	let dir = tempfile::tempdir().unwrap();
	let matrix_path = dir.path().join("matrix_40.txt");
	let png_path = dir.path().join("matrix_40.png");

	let written = cli::generate_matrix(&GenerateArgs {
		size: 40,
		communities: 4,
		intra: 0.7,
		inter: 0.1,
		seed: Some(11),
		output: Some(matrix_path.clone()),
	})
	.unwrap();
	assert_eq!(written, matrix_path);

	let matrix = load_matrix(&matrix_path).unwrap();
	assert_eq!(matrix.size(), 40);
	assert!(matrix.is_symmetric());

	let args: Vec<OsString> = vec![
		"community-matrix".into(),
		"run".into(),
		matrix_path.clone().into(),
		"--colormap".into(),
		"viridis".into(),
		"--cell-size".into(),
		"2".into(),
		"-o".into(),
		png_path.clone().into(),
	];
	cli::run(args).unwrap();
	let png = fs::read(&png_path).unwrap();
	assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn same_seed_gives_same_matrix() {
	let dir = tempfile::tempdir().unwrap();
	let args = |name: &str| GenerateArgs {
		size: 30,
		communities: 3,
		intra: 0.5,
		inter: 0.2,
		seed: Some(5),
		output: Some(dir.path().join(name)),
	};
	let a = cli::generate_matrix(&args("a.txt")).unwrap();
	let b = cli::generate_matrix(&args("b.txt")).unwrap();
	assert_eq!(fs::read_to_string(a).unwrap(), fs::read_to_string(b).unwrap());
}

#[test]
fn invalid_generator_parameters_fail() {
	let dir = tempfile::tempdir().unwrap();
	let err = cli::generate_matrix(&GenerateArgs {
		size: 10,
		communities: 20,
		intra: 0.7,
		inter: 0.1,
		seed: Some(1),
		output: Some(dir.path().join("bad.txt")),
	})
	.unwrap_err();
	assert!(matches!(
		err,
		CliError::Matrix(MatrixError::InvalidParameters(_))
	));
}
