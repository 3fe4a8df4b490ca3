use leptos::prelude::*;
use leptos_meta::Title;
use log::error;

use crate::color::{ColorScale, colorize_with};
use crate::components::matrix_view::MatrixCanvas;
use crate::components::side_panel::SidePanel;
use crate::components::toolbar::{Toolbar, page_title, sample_matrix};
use crate::matrix::{AdjacencyMatrix, MatrixStats};
use crate::view::Viewer;

#[component]
fn ErrorAlert(errors: RwSignal<Option<String>>) -> impl IntoView {
	move || {
		errors.get().map(|msg| {
			view! {
				<div class="alert alert-error" role="alert">
					<span>{msg}</span>
					<button class="alert-dismiss" on:click=move |_| errors.set(None)>
						"×"
					</button>
				</div>
			}
		})
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let errors = RwSignal::new(None::<String>);
	let initial = sample_matrix().unwrap_or_else(|e| {
		error!("Error during initialization: {e}");
		errors.set(Some(e));
		AdjacencyMatrix::default()
	});

	let matrix = RwSignal::new(initial);
	let scale = RwSignal::new(ColorScale::default());
	let viewer = RwSignal::new(Viewer::default());
	let source = RwSignal::new(None::<String>);
	let loading = RwSignal::new(false);

	let pixels = Memo::new(move |_| {
		let scale = scale.get();
		matrix.with(|m| colorize_with(m, scale))
	});
	let stats = Memo::new(move |_| matrix.with(MatrixStats::compute));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<Title text=move || page_title(source.get().as_deref()) />
			<div class="matrix-app">
				<Toolbar
					scale=scale
					viewer=viewer
					matrix=matrix
					source=source
					loading=loading
					errors=errors
				/>
				<ErrorAlert errors=errors />
				<div class="matrix-layout">
					<div class="matrix-stage">
						<Show when=move || loading.get()>
							<div class="loading-bar" role="progressbar" aria-label="Loading"></div>
						</Show>
						<MatrixCanvas pixels=pixels viewer=viewer errors=errors />
					</div>
					<SidePanel stats=stats scale=scale />
				</div>
			</div>
		</ErrorBoundary>
	}
}
