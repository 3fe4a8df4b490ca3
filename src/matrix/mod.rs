//! Square adjacency matrices: the data every other part of the app draws from.

mod generate;
mod load;
mod stats;

use std::path::PathBuf;

use thiserror::Error;

pub use generate::{SynthesisParams, generate};
pub use load::{load_matrix, parse_matrix, save_matrix, write_matrix};
pub use stats::MatrixStats;

/// Errors raised while building, reading or writing a matrix.
#[derive(Debug, Error)]
pub enum MatrixError {
	/// The input file does not exist.
	#[error("matrix file {} not found", .0.display())]
	NotFound(PathBuf),
	/// Any other I/O failure on `path`.
	#[error("failed to access {}: {source}", path.display())]
	Io {
		/// File being read or written.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: std::io::Error,
	},
	/// A token that is not a number.
	#[error("line {line}, column {column}: cannot parse {token:?} as a number")]
	Parse {
		/// 1-based line in the source text.
		line: usize,
		/// 1-based entry index on that line.
		column: usize,
		/// Offending token.
		token: String,
	},
	/// A row whose length differs from the row count.
	#[error("line {line}: expected {expected} entries, found {found}")]
	NotSquare {
		/// 1-based line in the source text.
		line: usize,
		/// Entries expected per row.
		expected: usize,
		/// Entries found on the row.
		found: usize,
	},
	/// The input held no rows at all.
	#[error("matrix contains no rows")]
	Empty,
	/// Synthesis parameters out of range.
	#[error("invalid synthesis parameters: {0}")]
	InvalidParameters(String),
}

/// Square matrix of edge weights, stored row-major.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjacencyMatrix {
	size: usize,
	values: Vec<f64>,
}

impl AdjacencyMatrix {
	/// An `size x size` matrix with no edges.
	pub fn zeros(size: usize) -> Self {
		Self {
			size,
			values: vec![0.0; size * size],
		}
	}

	/// Builds a matrix from rows, rejecting ragged or non-square input.
	pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
		if rows.is_empty() {
			return Err(MatrixError::Empty);
		}
		let size = rows.len();
		let mut values = Vec::with_capacity(size * size);
		for (i, row) in rows.into_iter().enumerate() {
			if row.len() != size {
				return Err(MatrixError::NotSquare {
					line: i + 1,
					expected: size,
					found: row.len(),
				});
			}
			values.extend(row);
		}
		Ok(Self { size, values })
	}

	/// Number of rows (and columns).
	pub fn size(&self) -> usize {
		self.size
	}

	/// Weight of the edge `i -> j`.
	pub fn get(&self, i: usize, j: usize) -> f64 {
		self.values[i * self.size + j]
	}

	/// Sets both `(i, j)` and `(j, i)`.
	pub fn set_symmetric(&mut self, i: usize, j: usize, value: f64) {
		self.values[i * self.size + j] = value;
		self.values[j * self.size + i] = value;
	}

	/// Row `i` as a slice.
	pub fn row(&self, i: usize) -> &[f64] {
		&self.values[i * self.size..(i + 1) * self.size]
	}

	/// Iterates rows top to bottom.
	pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
		// chunks(0) panics, so an empty matrix yields nothing.
		self.values.chunks(self.size.max(1))
	}

	/// Copies the matrix out as nested rows.
	pub fn to_rows(&self) -> Vec<Vec<f64>> {
		self.rows().map(<[f64]>::to_vec).collect()
	}

	/// Sum of every entry.
	pub fn sum(&self) -> f64 {
		self.values.iter().sum()
	}

	/// True when `M[i][j] == M[j][i]` for every pair.
	pub fn is_symmetric(&self) -> bool {
		(0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i)))
	}
}
