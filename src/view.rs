//! Pan and zoom state driven by pointer and toolbar events.
//!
//! Every transition consumes the current [`Viewer`] and returns the next one,
//! so the UI can keep it in a signal and compare before and after.

/// Multiplier applied per zoom step.
pub const ZOOM_FACTOR: f64 = 1.2;

/// Bounds on [`ViewState::zoom_level`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
	/// Smallest allowed zoom.
	pub min: f64,
	/// Largest allowed zoom.
	pub max: f64,
}

impl Default for ZoomLimits {
	fn default() -> Self {
		Self { min: 0.1, max: 5.0 }
	}
}

impl ZoomLimits {
	/// No bounds: zoom can grow or shrink without limit.
	pub fn unclamped() -> Self {
		Self {
			min: f64::MIN_POSITIVE,
			max: f64::INFINITY,
		}
	}

	fn clamp(self, zoom: f64) -> f64 {
		zoom.clamp(self.min, self.max)
	}
}

/// Scale and translation applied to the displayed image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
	/// Scale factor, always positive.
	pub zoom_level: f64,
	/// Translation in screen pixels.
	pub pan_offset: (f64, f64),
}

impl Default for ViewState {
	fn default() -> Self {
		Self {
			zoom_level: 1.0,
			pan_offset: (0.0, 0.0),
		}
	}
}

/// What the pointer is doing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interaction {
	/// No button held.
	#[default]
	Idle,
	/// Left button held; `anchor` is the last pointer position seen.
	Panning {
		/// Screen position the next delta is measured from.
		anchor: (f64, f64),
	},
}

/// Input the viewer reacts to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
	/// Left button pressed at a screen position.
	Press(f64, f64),
	/// Pointer moved to a screen position.
	Move(f64, f64),
	/// Left button released, or the pointer left the surface.
	Release,
	/// Wheel forward or the zoom-in trigger.
	ZoomIn,
	/// Wheel backward or the zoom-out trigger.
	ZoomOut,
	/// Back to the initial view.
	Reset,
}

/// View plus interaction mode.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewer {
	/// Current transform.
	pub view: ViewState,
	/// Current pointer mode.
	pub interaction: Interaction,
	/// Zoom bounds in force.
	pub limits: ZoomLimits,
}

impl Viewer {
	/// A viewer at the initial view with the given zoom bounds.
	pub fn with_limits(limits: ZoomLimits) -> Self {
		Self {
			limits,
			..Self::default()
		}
	}

	/// True while a drag is in progress.
	pub fn is_panning(&self) -> bool {
		matches!(self.interaction, Interaction::Panning { .. })
	}

	/// Applies one event.
	pub fn apply(self, event: ViewEvent) -> Self {
		match event {
			ViewEvent::Press(x, y) => self.press(x, y),
			ViewEvent::Move(x, y) => self.pointer_move(x, y),
			ViewEvent::Release => self.release(),
			ViewEvent::ZoomIn => self.zoom_in(),
			ViewEvent::ZoomOut => self.zoom_out(),
			ViewEvent::Reset => self.reset(),
		}
	}

	/// Starts a drag anchored at `(x, y)`.
	pub fn press(self, x: f64, y: f64) -> Self {
		Self {
			interaction: Interaction::Panning { anchor: (x, y) },
			..self
		}
	}

	/// Pans by the distance from the anchor while dragging; no-op otherwise.
	pub fn pointer_move(self, x: f64, y: f64) -> Self {
		let Interaction::Panning { anchor: (ax, ay) } = self.interaction else {
			return self;
		};
		let (px, py) = self.view.pan_offset;
		Self {
			view: ViewState {
				pan_offset: (px + (x - ax), py + (y - ay)),
				..self.view
			},
			interaction: Interaction::Panning { anchor: (x, y) },
			..self
		}
	}

	/// Ends any drag.
	pub fn release(self) -> Self {
		Self {
			interaction: Interaction::Idle,
			..self
		}
	}

	/// Multiplies zoom by [`ZOOM_FACTOR`].
	pub fn zoom_in(self) -> Self {
		self.with_zoom(self.view.zoom_level * ZOOM_FACTOR)
	}

	/// Divides zoom by [`ZOOM_FACTOR`].
	pub fn zoom_out(self) -> Self {
		self.with_zoom(self.view.zoom_level / ZOOM_FACTOR)
	}

	/// Restores zoom 1 and no pan, and drops any drag.
	pub fn reset(self) -> Self {
		Self::with_limits(self.limits)
	}

	fn with_zoom(self, zoom: f64) -> Self {
		Self {
			view: ViewState {
				zoom_level: self.limits.clamp(zoom),
				..self.view
			},
			..self
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn drag_pans_by_pointer_delta() {
		let v = Viewer::default()
			.press(10.0, 10.0)
			.pointer_move(15.0, 7.0)
			.pointer_move(20.0, 7.0)
			.release();
		assert_eq!(v.view.pan_offset, (10.0, -3.0));
		assert_eq!(v.interaction, Interaction::Idle);
	}

	#[test]
	fn move_without_press_is_ignored() {
		let v = Viewer::default().pointer_move(50.0, 50.0);
		assert_eq!(v, Viewer::default());
		let v = Viewer::default()
			.press(0.0, 0.0)
			.release()
			.pointer_move(9.0, 9.0);
		assert_eq!(v.view.pan_offset, (0.0, 0.0));
	}

	#[test]
	fn reset_restores_initial_view_from_any_history() {
		let events = [
			ViewEvent::ZoomIn,
			ViewEvent::Press(3.0, 4.0),
			ViewEvent::Move(40.0, -2.0),
			ViewEvent::ZoomOut,
			ViewEvent::ZoomOut,
			ViewEvent::ZoomOut,
		];
		let v = events.into_iter().fold(Viewer::default(), Viewer::apply);
		assert!(v.is_panning());
		let v = v.apply(ViewEvent::Reset);
		assert_eq!(v.view, ViewState::default());
		assert_eq!(v.view.zoom_level, 1.0);
		assert_eq!(v.view.pan_offset, (0.0, 0.0));
		assert!(!v.is_panning());
	}

	#[test]
	fn zoom_in_then_out_is_identity_when_unclamped() {
		let start = Viewer::with_limits(ZoomLimits::unclamped());
		for steps in [1, 3, 25] {
			let mut v = start;
			for _ in 0..steps {
				v = v.zoom_in();
			}
			for _ in 0..steps {
				v = v.zoom_out();
			}
			assert!((v.view.zoom_level - 1.0).abs() < 1e-9);
		}
	}

	#[test]
	fn default_limits_clamp_zoom() {
		let mut v = Viewer::default();
		for _ in 0..50 {
			v = v.zoom_in();
		}
		assert_eq!(v.view.zoom_level, 5.0);
		for _ in 0..100 {
			v = v.zoom_out();
			assert!(v.view.zoom_level >= 0.1);
		}
		assert_eq!(v.view.zoom_level, 0.1);
	}

	#[test]
	fn unclamped_zoom_goes_past_default_bounds() {
		let mut v = Viewer::with_limits(ZoomLimits::unclamped());
		for _ in 0..20 {
			v = v.zoom_in();
		}
		assert!(v.view.zoom_level > 5.0);
	}

	#[test]
	fn reset_keeps_limits() {
		let v = Viewer::with_limits(ZoomLimits::unclamped()).zoom_in().reset();
		assert_eq!(v.limits, ZoomLimits::unclamped());
	}
}
