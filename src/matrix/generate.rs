use log::debug;
use rand::Rng;

use super::{AdjacencyMatrix, MatrixError};

/// Knobs for [`generate`].
#[derive(Clone, Debug, PartialEq)]
pub struct SynthesisParams {
	/// Rows in the output matrix.
	pub size: usize,
	/// Number of contiguous equal-size blocks.
	pub num_communities: usize,
	/// Edge probability for a pair inside one block.
	pub intra_density: f64,
	/// Edge probability for a pair spanning two blocks.
	pub inter_density: f64,
}

impl Default for SynthesisParams {
	fn default() -> Self {
		Self {
			size: 100,
			num_communities: 5,
			intra_density: 0.7,
			inter_density: 0.1,
		}
	}
}

impl SynthesisParams {
	/// Checks ranges before any sampling happens.
	pub fn validate(&self) -> Result<(), MatrixError> {
		if self.size == 0 {
			return Err(MatrixError::InvalidParameters("size must be at least 1".into()));
		}
		let bytes = self
			.size
			.checked_mul(self.size)
			.and_then(|cells| cells.checked_mul(size_of::<f64>()));
		if !bytes.is_some_and(|b| b <= isize::MAX as usize) {
			return Err(MatrixError::InvalidParameters(format!(
				"size {} is too large to allocate a {0}x{0} matrix",
				self.size
			)));
		}
		if self.num_communities == 0 || self.num_communities > self.size {
			return Err(MatrixError::InvalidParameters(format!(
				"num_communities must be in 1..={}, got {}",
				self.size, self.num_communities
			)));
		}
		for (name, p) in [
			("intra_density", self.intra_density),
			("inter_density", self.inter_density),
		] {
			if !(0.0..=1.0).contains(&p) {
				return Err(MatrixError::InvalidParameters(format!(
					"{name} must be in [0, 1], got {p}"
				)));
			}
		}
		Ok(())
	}

	/// Indices per community block.
	pub fn community_size(&self) -> usize {
		self.size / self.num_communities
	}
}

/// Samples a symmetric 0/1 matrix with block community structure.
///
/// Indices are split into `num_communities` blocks of `size / num_communities`.
/// Pairs inside a block get an edge with probability `intra_density`, pairs in
/// different blocks with `inter_density`. Leftover indices past the last full
/// block form one trailing partial block: it never receives intra edges but
/// takes part in inter-block sampling.
pub fn generate<R: Rng>(
	params: &SynthesisParams,
	rng: &mut R,
) -> Result<AdjacencyMatrix, MatrixError> {
	params.validate()?;
	let size = params.size;
	let block = params.community_size();
	let covered = block * params.num_communities;
	let mut matrix = AdjacencyMatrix::zeros(size);

	for i in 0..size {
		for j in (i + 1)..size {
			let p = if i / block != j / block {
				params.inter_density
			} else if j < covered {
				params.intra_density
			} else {
				continue;
			};
			if rng.gen_bool(p) {
				matrix.set_symmetric(i, j, 1.0);
			}
		}
	}

	debug!(
		"generated {size}x{size} matrix, {} communities of {block}, {} edges",
		params.num_communities,
		matrix.sum() as usize / 2
	);
	Ok(matrix)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn intra_fraction(m: &AdjacencyMatrix, params: &SynthesisParams) -> f64 {
		let block = params.community_size();
		let (mut edges, mut pairs) = (0usize, 0usize);
		for c in 0..params.num_communities {
			let start = c * block;
			for i in start..start + block {
				for j in (i + 1)..start + block {
					pairs += 1;
					if m.get(i, j) > 0.0 {
						edges += 1;
					}
				}
			}
		}
		edges as f64 / pairs as f64
	}

	#[test]
	fn generated_matrix_is_symmetric_with_empty_diagonal() {
		let mut rng = StdRng::seed_from_u64(7);
		for size in [1, 2, 17, 100] {
			let params = SynthesisParams {
				size,
				num_communities: 1.max(size / 20),
				..Default::default()
			};
			let m = generate(&params, &mut rng).unwrap();
			assert_eq!(m.size(), size);
			for i in 0..size {
				assert_eq!(m.get(i, i), 0.0);
				for j in 0..size {
					assert_eq!(m.get(i, j), m.get(j, i));
					assert!(m.get(i, j) == 0.0 || m.get(i, j) == 1.0);
				}
			}
		}
	}

	#[test]
	fn intra_block_density_tracks_parameter() {
		let params = SynthesisParams::default();
		let mut rng = StdRng::seed_from_u64(42);
		let trials = 10;
		let mean = (0..trials)
			.map(|_| intra_fraction(&generate(&params, &mut rng).unwrap(), &params))
			.sum::<f64>()
			/ trials as f64;
		assert!((mean - params.intra_density).abs() < 0.05, "mean intra density {mean}");
	}

	#[test]
	fn density_extremes_are_exact() {
		let params = SynthesisParams {
			size: 12,
			num_communities: 3,
			intra_density: 1.0,
			inter_density: 0.0,
		};
		let m = generate(&params, &mut StdRng::seed_from_u64(1)).unwrap();
		for i in 0..12 {
			for j in 0..12 {
				let expected = if i != j && i / 4 == j / 4 { 1.0 } else { 0.0 };
				assert_eq!(m.get(i, j), expected, "cell ({i}, {j})");
			}
		}
	}

	#[test]
	fn remainder_rows_only_get_inter_edges() {
		let params = SynthesisParams {
			size: 11,
			num_communities: 2,
			intra_density: 1.0,
			inter_density: 0.0,
		};
		let m = generate(&params, &mut StdRng::seed_from_u64(3)).unwrap();
		assert_eq!(m.row(10).iter().sum::<f64>(), 0.0);
		assert_eq!(m.get(0, 4), 1.0);
		assert_eq!(m.get(4, 5), 0.0);

		let all_inter = SynthesisParams {
			inter_density: 1.0,
			intra_density: 0.0,
			..params
		};
		let m = generate(&all_inter, &mut StdRng::seed_from_u64(3)).unwrap();
		assert_eq!(m.get(10, 0), 1.0);
		assert_eq!(m.get(10, 9), 1.0);
	}

	#[test]
	fn invalid_parameters_are_rejected() {
		let mut rng = StdRng::seed_from_u64(0);
		let bad = [
			SynthesisParams {
				size: 0,
				..Default::default()
			},
			SynthesisParams {
				num_communities: 0,
				..Default::default()
			},
			SynthesisParams {
				num_communities: 101,
				..Default::default()
			},
			SynthesisParams {
				intra_density: 1.5,
				..Default::default()
			},
			SynthesisParams {
				inter_density: -0.1,
				..Default::default()
			},
		];
		for params in bad {
			assert!(matches!(
				generate(&params, &mut rng),
				Err(MatrixError::InvalidParameters(_))
			));
		}
	}

	#[test]
	fn oversized_matrix_is_rejected_before_allocating() {
		let mut rng = StdRng::seed_from_u64(0);
		for size in [usize::MAX, 1 << (usize::BITS / 2)] {
			let params = SynthesisParams {
				size,
				num_communities: 1,
				..Default::default()
			};
			assert!(matches!(
				generate(&params, &mut rng),
				Err(MatrixError::InvalidParameters(_))
			));
		}
	}
}
