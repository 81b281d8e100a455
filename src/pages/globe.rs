use leptos::prelude::*;

use crate::components::globe::GlobeCanvas;

#[component]
pub fn GlobePage() -> impl IntoView {
	view! {
		<div class="fullscreen-globe">
			<GlobeCanvas />
			<div class="globe-overlay">
				<h1>"Globe 3D"</h1>
				<p class="subtitle">"Drag to orbit. Scroll to zoom."</p>
			</div>
		</div>
	}
}
