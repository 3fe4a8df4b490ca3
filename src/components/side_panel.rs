use leptos::prelude::*;

use crate::color::ColorScale;
use crate::matrix::MatrixStats;

const LEGEND_STOPS: usize = 9;

fn legend_gradient(scale: ColorScale) -> String {
	let stops = (0..LEGEND_STOPS)
		.map(|i| scale.sample(i as f64 / (LEGEND_STOPS - 1) as f64).to_hex())
		.collect::<Vec<_>>()
		.join(", ");
	format!("background: linear-gradient(to right, {stops}); height: 12px;")
}

#[component]
pub fn SidePanel(
	#[prop(into)] stats: Signal<MatrixStats>,
	#[prop(into)] scale: Signal<ColorScale>,
) -> impl IntoView {
	view! {
		<aside class="side-panel">
			<section class="card">
				<h2>"Matrix Statistics"</h2>
				<pre class="matrix-stats">{move || stats.get().to_string()}</pre>
			</section>
			<section class="card">
				<h2>"Color Legend"</h2>
				<div class="legend-bar" style=move || legend_gradient(scale.get())></div>
				<ul class="legend">
					<li>"Dark Color: Strong connection"</li>
					<li>"Light Color: Weak connection"</li>
					<li>"Light Gray: No connection"</li>
				</ul>
				<p class="hint">"Use mouse wheel to zoom. Click and drag to pan."</p>
			</section>
		</aside>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn gradient_spans_scale_endpoints() {
		let css = legend_gradient(ColorScale::Viridis);
		assert!(css.starts_with("background: linear-gradient(to right, #440154"));
		assert!(css.contains("#fde725)"));
	}
}
