use wasm_bindgen::prelude::*;
use web_sys::Window;

/// A callback registered on `window` for as long as this value lives.
pub struct WindowListener {
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl WindowListener {
	pub fn attach(
		window: &Window,
		event: &'static str,
		callback: impl FnMut() + 'static,
	) -> Result<Self, JsValue> {
		let callback = Closure::<dyn FnMut()>::new(callback);
		window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self { event, callback })
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			let _ = window
				.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
		}
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use wasm_bindgen_test::*;
	use web_sys::Event;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	#[wasm_bindgen_test]
	fn dropping_detaches_callback() {
		let window = web_sys::window().unwrap();
		let hits = Rc::new(Cell::new(0));
		let counter = hits.clone();
		let listener =
			WindowListener::attach(&window, "resize", move || counter.set(counter.get() + 1)).unwrap();

		window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
		assert_eq!(hits.get(), 1);

		drop(listener);
		window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
		assert_eq!(hits.get(), 1);
	}
}
