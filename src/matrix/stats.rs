use std::fmt;

use super::AdjacencyMatrix;

/// Rows per community assumed by the summary when none is known.
const ROWS_PER_COMMUNITY: usize = 20;

/// Summary numbers shown next to the matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixStats {
	/// Rows in the matrix.
	pub size: usize,
	/// Undirected edge count, `floor(sum / 2)`.
	pub total_edges: u64,
	/// `size * (size - 1) / 2`.
	pub max_possible_edges: u64,
	/// `total_edges / max_possible_edges`, zero for matrices under 2 rows.
	pub density: f64,
	/// Rough community count, one per twenty rows.
	pub num_communities: usize,
}

impl MatrixStats {
	/// Computes the summary for `matrix`.
	pub fn compute(matrix: &AdjacencyMatrix) -> Self {
		let size = matrix.size();
		let total_edges = (matrix.sum() / 2.0).floor().max(0.0) as u64;
		let max_possible_edges = (size as u64 * size.saturating_sub(1) as u64) / 2;
		let density = if max_possible_edges == 0 {
			0.0
		} else {
			total_edges as f64 / max_possible_edges as f64
		};
		Self {
			size,
			total_edges,
			max_possible_edges,
			density,
			num_communities: size / ROWS_PER_COMMUNITY,
		}
	}
}

fn with_thousands(n: u64) -> String {
	let digits = n.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}

impl fmt::Display for MatrixStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Matrix Size: {0}x{0}", self.size)?;
		writeln!(f, "Total Edges: {}", with_thousands(self.total_edges))?;
		writeln!(f, "Density: {:.2}%", self.density * 100.0)?;
		write!(f, "Number of Communities: {}", self.num_communities)
	}
}
