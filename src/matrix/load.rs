use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::{info, warn};

use super::{AdjacencyMatrix, MatrixError};

/// Reads a whitespace-delimited square matrix from `path`.
pub fn load_matrix(path: impl AsRef<Path>) -> Result<AdjacencyMatrix, MatrixError> {
	let path = path.as_ref();
	info!("Loading matrix from {}", path.display());
	let text = fs::read_to_string(path).map_err(|source| match source.kind() {
		io::ErrorKind::NotFound => MatrixError::NotFound(path.to_path_buf()),
		_ => MatrixError::Io {
			path: path.to_path_buf(),
			source,
		},
	})?;
	let matrix = parse_matrix(&text)?;
	info!("Loaded matrix shape: ({0}, {0})", matrix.size());
	if !matrix.is_symmetric() {
		warn!("{} is not symmetric; rendering it as-is", path.display());
	}
	Ok(matrix)
}

/// Parses one row per line. Blank lines and `#` comments are skipped.
pub fn parse_matrix(text: &str) -> Result<AdjacencyMatrix, MatrixError> {
	let mut rows: Vec<(usize, Vec<f64>)> = Vec::new();
	for (idx, line) in text.lines().enumerate() {
		let content = line.split('#').next().unwrap_or_default().trim();
		if content.is_empty() {
			continue;
		}
		let row = content
			.split_whitespace()
			.enumerate()
			.map(|(col, token)| {
				token.parse::<f64>().map_err(|_| MatrixError::Parse {
					line: idx + 1,
					column: col + 1,
					token: token.to_string(),
				})
			})
			.collect::<Result<Vec<_>, _>>()?;
		rows.push((idx + 1, row));
	}

	// Report the offending source line rather than the row index.
	let size = rows.len();
	if let Some((line, row)) = rows.iter().find(|(_, row)| row.len() != size) {
		return Err(MatrixError::NotSquare {
			line: *line,
			expected: size,
			found: row.len(),
		});
	}
	AdjacencyMatrix::from_rows(rows.into_iter().map(|(_, row)| row).collect())
}

/// Writes `matrix` in the same text format [`parse_matrix`] reads.
pub fn write_matrix<W: Write>(matrix: &AdjacencyMatrix, mut out: W) -> io::Result<()> {
	for row in matrix.rows() {
		let line = row.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
		writeln!(out, "{line}")?;
	}
	out.flush()
}

/// Writes `matrix` to `path`, replacing any existing file.
pub fn save_matrix(matrix: &AdjacencyMatrix, path: impl AsRef<Path>) -> Result<(), MatrixError> {
	let path = path.as_ref();
	let io_err = |source| MatrixError::Io {
		path: path.to_path_buf(),
		source,
	};
	let file = fs::File::create(path).map_err(io_err)?;
	write_matrix(matrix, io::BufWriter::new(file)).map_err(io_err)?;
	info!("Wrote {0}x{0} matrix to {1}", matrix.size(), path.display());
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_three_by_three_path_graph() {
		let m = parse_matrix("0 1 0\n1 0 1\n0 1 0\n").unwrap();
		assert_eq!(
			m.to_rows(),
			vec![
				vec![0.0, 1.0, 0.0],
				vec![1.0, 0.0, 1.0],
				vec![0.0, 1.0, 0.0]
			]
		);
	}

	#[test]
	fn skips_blanks_and_comments_and_accepts_tabs() {
		let m = parse_matrix("# weights\n\n0\t0.5\n0.5   0 # trailing\n\n").unwrap();
		assert_eq!(m.size(), 2);
		assert_eq!(m.get(0, 1), 0.5);
	}

	#[test]
	fn reports_bad_token_position() {
		let err = parse_matrix("0 1\n1 x\n").unwrap_err();
		match err {
			MatrixError::Parse {
				line,
				column,
				token,
			} => {
				assert_eq!((line, column), (2, 2));
				assert_eq!(token, "x");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn rejects_non_square_input_with_source_line() {
		let err = parse_matrix("0 1 0\n\n1 0\n0 1 0\n").unwrap_err();
		assert!(matches!(
			err,
			MatrixError::NotSquare {
				line: 3,
				expected: 3,
				found: 2
			}
		));
	}

	#[test]
	fn rejects_empty_text() {
		assert!(matches!(parse_matrix("\n# nothing\n"), Err(MatrixError::Empty)));
	}

	#[test]
	fn written_text_parses_back() {
		let m = parse_matrix("0 1\n1 0\n").unwrap();
		let mut buf = Vec::new();
		write_matrix(&m, &mut buf).unwrap();
		assert_eq!(String::from_utf8(buf).unwrap(), "0 1\n1 0\n");
	}
}
