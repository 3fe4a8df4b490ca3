use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use send_wrapper::SendWrapper;

use super::listener::WindowListener;
use super::render;
use super::state::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MatrixCanvasState, pick_extent};
use crate::color::PixelGrid;
use crate::view::{ViewEvent, Viewer};

type SharedState = Rc<RefCell<Option<MatrixCanvasState>>>;

fn measure(
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		let window = web_sys::window();
		let inner = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
		return (
			pick_extent(None, window.as_ref().and_then(|w| inner(w.inner_width())), DEFAULT_WIDTH),
			pick_extent(None, window.as_ref().and_then(|w| inner(w.inner_height())), DEFAULT_HEIGHT),
		);
	}
	let parent = canvas.parent_element();
	(
		pick_extent(width, parent.as_ref().map(|p| p.client_width() as f64), DEFAULT_WIDTH),
		pick_extent(height, parent.as_ref().map(|p| p.client_height() as f64), DEFAULT_HEIGHT),
	)
}

fn local_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn report(errors: RwSignal<Option<String>>, what: &str, err: JsValue) {
	let msg = format!("{what}: {err:?}");
	error!("{msg}");
	errors.set(Some(msg));
}

fn redraw(state: &SharedState, viewer: RwSignal<Viewer>, errors: RwSignal<Option<String>>) {
	if let Some(ref s) = *state.borrow() {
		if let Err(e) = render::render(s, &viewer.get_untracked().view) {
			report(errors, "Error drawing matrix", e);
		}
	}
}

#[component]
pub fn MatrixCanvas(
	#[prop(into)] pixels: Signal<PixelGrid>,
	viewer: RwSignal<Viewer>,
	errors: RwSignal<Option<String>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let resize: Rc<RefCell<Option<WindowListener>>> = Rc::new(RefCell::new(None));
	let (state_init, resize_init) = (state.clone(), resize.clone());

	// Unmounting drops the listener, which detaches it from the window.
	let resize_cleanup = SendWrapper::new(resize);
	on_cleanup(move || {
		resize_cleanup.take().borrow_mut().take();
	});

	// Attach on first run, then re-upload whenever the colorized image changes.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let grid = pixels.get();
		let Some(window) = web_sys::window() else {
			return;
		};

		if state_init.borrow().is_none() {
			let Some(document) = window.document() else {
				report(errors, "Error during initialization", JsValue::from_str("no document"));
				return;
			};
			let (w, h) = measure(&canvas, fullscreen, width, height);
			match MatrixCanvasState::new(&document, &canvas, w, h) {
				Ok(s) => *state_init.borrow_mut() = Some(s),
				Err(e) => {
					report(errors, "Error during initialization", e);
					return;
				}
			}

			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			let on_resize = move || {
				let (nw, nh) = measure(&canvas_resize, fullscreen, width, height);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(&canvas_resize, nw, nh);
				}
				redraw(&state_resize, viewer, errors);
			};
			match WindowListener::attach(&window, "resize", on_resize) {
				Ok(listener) => *resize_init.borrow_mut() = Some(listener),
				Err(e) => report(errors, "Error watching window size", e),
			}
		}

		if let Some(ref mut s) = *state_init.borrow_mut() {
			debug!("Uploading {}x{} matrix image", grid.width, grid.height);
			if let Err(e) = s.upload(&grid) {
				report(errors, "Error updating colormap", e);
			}
		}
		redraw(&state_init, viewer, errors);
	});

	let view_state = Memo::new(move |_| viewer.get().view);
	let state_draw = state.clone();
	Effect::new(move |_| {
		view_state.track();
		redraw(&state_draw, viewer, errors);
	});

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		if let Some((x, y)) = local_position(canvas_ref, &ev) {
			viewer.update(|v| *v = v.apply(ViewEvent::Press(x, y)));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		if !viewer.with_untracked(Viewer::is_panning) {
			return;
		}
		if let Some((x, y)) = local_position(canvas_ref, &ev) {
			viewer.update(|v| *v = v.apply(ViewEvent::Move(x, y)));
		}
	};

	let on_mouseup = move |ev: MouseEvent| {
		if ev.button() == 0 {
			viewer.update(|v| *v = v.apply(ViewEvent::Release));
		}
	};

	let on_mouseleave = move |_: MouseEvent| {
		if viewer.with_untracked(Viewer::is_panning) {
			viewer.update(|v| *v = v.apply(ViewEvent::Release));
		}
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let event = if ev.delta_y() < 0.0 {
			ViewEvent::ZoomIn
		} else if ev.delta_y() > 0.0 {
			ViewEvent::ZoomOut
		} else {
			return;
		};
		viewer.update(|v| *v = v.apply(event));
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="matrix-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style=move || {
				if viewer.get().is_panning() {
					"display: block; cursor: grabbing;"
				} else {
					"display: block; cursor: grab;"
				}
			}
		/>
	}
}
