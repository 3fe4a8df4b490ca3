use wasm_bindgen::JsValue;

use super::state::MatrixCanvasState;
use crate::view::ViewState;

const BACKGROUND: &str = "#ffffff";
const FRAME: &str = "rgba(0, 0, 0, 0.15)";

pub fn render(state: &MatrixCanvasState, view: &ViewState) -> Result<(), JsValue> {
	let ctx = &state.ctx;
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	if state.cells == 0 {
		return Ok(());
	}

	let k = state.fit_scale() * view.zoom_level;
	let (px, py) = view.pan_offset;
	let half = state.cells as f64 / 2.0;

	ctx.save();
	// One matrix cell per image pixel; keep cell edges hard when scaled up.
	ctx.set_image_smoothing_enabled(false);
	ctx.translate(state.width / 2.0 + px, state.height / 2.0 + py)?;
	ctx.scale(k, k)?;
	let drawn = ctx.draw_image_with_html_canvas_element(&state.image, -half, -half);
	ctx.set_stroke_style_str(FRAME);
	ctx.set_line_width(1.0 / k);
	ctx.stroke_rect(-half, -half, 2.0 * half, 2.0 * half);
	ctx.restore();
	drawn
}
