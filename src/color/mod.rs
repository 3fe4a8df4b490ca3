//! Turning matrix cells into pixels.

mod scale;

use thiserror::Error;

use crate::matrix::AdjacencyMatrix;

pub use scale::ColorScale;

/// Pixel drawn for cells without an edge.
pub const NO_EDGE: Rgb = Rgb(245, 245, 245);

/// Bad user-supplied rendering configuration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
	/// The requested color scale name is not one of [`ColorScale::ALL`].
	#[error("unknown color scale {0:?}")]
	UnknownColorScale(String),
}

/// An 8-bit RGB pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	/// CSS hex notation, `#rrggbb`.
	pub fn to_hex(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
	}
}

/// Row-major image, one pixel per matrix cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelGrid {
	/// Pixels per row.
	pub width: usize,
	/// Number of rows.
	pub height: usize,
	/// `width * height` pixels, top row first.
	pub pixels: Vec<Rgb>,
}

impl PixelGrid {
	/// Pixel at column `x`, row `y`.
	pub fn get(&self, x: usize, y: usize) -> Rgb {
		self.pixels[y * self.width + x]
	}

	/// Opaque RGBA bytes, the layout canvas `ImageData` expects.
	pub fn to_rgba(&self) -> Vec<u8> {
		self.pixels
			.iter()
			.flat_map(|&Rgb(r, g, b)| [r, g, b, 255])
			.collect()
	}

	/// Packed RGB bytes.
	pub fn to_rgb(&self) -> Vec<u8> {
		self.pixels.iter().flat_map(|&Rgb(r, g, b)| [r, g, b]).collect()
	}
}

/// Colors `matrix` with the scale called `scale_name`.
pub fn colorize(matrix: &AdjacencyMatrix, scale_name: &str) -> Result<PixelGrid, ConfigurationError> {
	Ok(colorize_with(matrix, scale_name.parse()?))
}

/// Colors `matrix` with `scale`.
///
/// Positive cells go through the scale with a fixed `[0, 1]` normalization, so
/// weights above one all saturate to the darkest color. Everything else is
/// drawn as [`NO_EDGE`].
pub fn colorize_with(matrix: &AdjacencyMatrix, scale: ColorScale) -> PixelGrid {
	let pixels = matrix
		.rows()
		.flatten()
		.map(|&v| if v > 0.0 { scale.sample(v) } else { NO_EDGE })
		.collect();
	PixelGrid {
		width: matrix.size(),
		height: matrix.size(),
		pixels,
	}
}
