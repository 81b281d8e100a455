use leptos::prelude::*;
use leptos_router::components::A;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="home">
			<h1>"Satellites"</h1>
			<ul>
				<li>
					<A href="/globe">"Globe 3D"</A>
				</li>
				<li>
					<A href="/graph">"Orbit graph"</A>
				</li>
			</ul>
		</div>
	}
}
