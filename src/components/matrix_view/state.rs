use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

use crate::color::PixelGrid;

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// An explicit extent wins, then a measured one if it is positive, then
/// `fallback`.
pub fn pick_extent(explicit: Option<f64>, measured: Option<f64>, fallback: f64) -> f64 {
	explicit
		.or(measured)
		.filter(|v| v.is_finite() && *v > 0.0)
		.unwrap_or(fallback)
}

/// Screen pixels per matrix cell that make the whole matrix fit the viewport
/// at zoom 1.
pub fn fit_scale(width: f64, height: f64, cells: u32) -> f64 {
	if cells == 0 {
		return 1.0;
	}
	(width.min(height) / cells as f64).max(f64::MIN_POSITIVE)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
	canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
		.dyn_into()
		.map_err(JsValue::from)
}

/// Canvas-side state: the visible surface plus an offscreen canvas holding the
/// colorized matrix at one pixel per cell.
pub struct MatrixCanvasState {
	pub ctx: CanvasRenderingContext2d,
	pub image: HtmlCanvasElement,
	image_ctx: CanvasRenderingContext2d,
	pub cells: u32,
	pub width: f64,
	pub height: f64,
}

impl MatrixCanvasState {
	pub fn new(
		document: &Document,
		canvas: &HtmlCanvasElement,
		width: f64,
		height: f64,
	) -> Result<Self, JsValue> {
		let ctx = context_2d(canvas)?;
		let image: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
		let image_ctx = context_2d(&image)?;
		let mut state = Self {
			ctx,
			image,
			image_ctx,
			cells: 0,
			width,
			height,
		};
		state.resize(canvas, width, height);
		Ok(state)
	}

	/// Replaces the offscreen image with `grid`.
	pub fn upload(&mut self, grid: &PixelGrid) -> Result<(), JsValue> {
		let (w, h) = (grid.width as u32, grid.height as u32);
		self.image.set_width(w);
		self.image.set_height(h);
		self.cells = w.max(h);
		if w == 0 || h == 0 {
			return Ok(());
		}
		let rgba = grid.to_rgba();
		let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba.as_slice()), w, h)?;
		self.image_ctx.put_image_data(&data, 0.0, 0.0)
	}

	pub fn resize(&mut self, canvas: &HtmlCanvasElement, width: f64, height: f64) {
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);
		self.width = width;
		self.height = height;
	}

	pub fn fit_scale(&self) -> f64 {
		fit_scale(self.width, self.height, self.cells)
	}
}
