use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

use crate::color::ColorScale;
use crate::matrix::{AdjacencyMatrix, SynthesisParams, generate, parse_matrix};
use crate::view::{ViewEvent, Viewer};

const APP_TITLE: &str = "Matrix Visualization";

/// Draws a fresh sample matrix with the default community layout.
pub fn sample_matrix() -> Result<AdjacencyMatrix, String> {
	generate(&SynthesisParams::default(), &mut rand::thread_rng()).map_err(|e| e.to_string())
}

/// Parses the text of an uploaded matrix file.
pub fn read_upload(name: &str, text: &str) -> Result<AdjacencyMatrix, String> {
	parse_matrix(text).map_err(|e| format!("Error loading {name}: {e}"))
}

/// Window and toolbar title, naming the loaded file if there is one.
pub fn page_title(source: Option<&str>) -> String {
	match source
		.and_then(|s| s.rsplit(['/', '\\']).next())
		.filter(|s| !s.is_empty())
	{
		Some(name) => format!("{APP_TITLE} - {name}"),
		None => APP_TITLE.to_string(),
	}
}

/// Raises `loading`, then runs `work` on the next task so the indicator is
/// painted before a slow recolor starts.
pub fn run_with_loading(loading: RwSignal<bool>, work: impl FnOnce() + 'static) {
	loading.set(true);
	set_timeout(
		move || {
			work();
			loading.set(false);
		},
		Duration::ZERO,
	);
}

#[component]
pub fn Toolbar(
	scale: RwSignal<ColorScale>,
	viewer: RwSignal<Viewer>,
	matrix: RwSignal<AdjacencyMatrix>,
	source: RwSignal<Option<String>>,
	loading: RwSignal<bool>,
	errors: RwSignal<Option<String>>,
) -> impl IntoView {
	// An unrecognized name keeps the current scale.
	let on_scale_change = move |ev: leptos::ev::Event| {
		let name = event_target_value(&ev);
		match name.parse::<ColorScale>() {
			Ok(next) => run_with_loading(loading, move || {
				info!("Switching color scale to {next}");
				errors.set(None);
				scale.set(next);
			}),
			Err(e) => {
				error!("Error updating colormap: {e}");
				errors.set(Some(e.to_string()));
			}
		}
	};

	// A file that fails to parse leaves the current matrix on screen.
	let on_file = move |ev: leptos::ev::Event| {
		let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
			return;
		};
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		// Picking the same file again should fire `change` again.
		input.set_value("");
		let name = file.name();
		loading.set(true);
		spawn_local(async move {
			let loaded = match JsFuture::from(file.text()).await {
				Ok(text) => read_upload(&name, &text.as_string().unwrap_or_default()),
				Err(e) => Err(format!("Error loading {name}: {e:?}")),
			};
			match loaded {
				Ok(m) => {
					info!("Loaded {0}x{0} matrix from {name}", m.size());
					errors.set(None);
					matrix.set(m);
					viewer.update(|v| *v = v.apply(ViewEvent::Reset));
					source.set(Some(name));
				}
				Err(e) => {
					error!("{e}");
					errors.set(Some(e));
				}
			}
			loading.set(false);
		});
	};

	let step = move |event: ViewEvent| viewer.update(|v| *v = v.apply(event));

	let regenerate = move |_: leptos::ev::MouseEvent| match sample_matrix() {
		Ok(m) => {
			info!("Regenerated {0}x{0} sample matrix", m.size());
			matrix.set(m);
			source.set(None);
		}
		Err(e) => {
			error!("Error generating matrix: {e}");
			errors.set(Some(e));
		}
	};

	view! {
		<header class="toolbar">
			<h1 class="toolbar-title">{move || page_title(source.get().as_deref())}</h1>
			<label class="toolbar-select">
				<span>"Color Scheme"</span>
				<select on:change=on_scale_change>
					{ColorScale::ALL
						.into_iter()
						.map(|s| {
							view! {
								<option value=s.name() selected=move || scale.get() == s>
									{s.label()}
								</option>
							}
						})
						.collect_view()}
				</select>
			</label>
			<span class="toolbar-spacer"></span>
			<button on:click=move |_| step(ViewEvent::ZoomIn)>"Zoom In"</button>
			<button on:click=move |_| step(ViewEvent::ZoomOut)>"Zoom Out"</button>
			<button on:click=move |_| step(ViewEvent::Reset)>"Reset View"</button>
			<label class="toolbar-file">
				"Load Matrix"
				<input type="file" accept=".txt,.dat,text/plain" on:change=on_file />
			</label>
			<button on:click=regenerate>"Regenerate"</button>
		</header>
	}
}
