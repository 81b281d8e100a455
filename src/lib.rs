//! Browser-side satellite visualizations: a rotating globe and an orbit
//! network diagram, plus the Leptos client-side app that hosts them.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod animation;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
mod pages;

// Top-Level pages
use crate::pages::globe::GlobePage;
use crate::pages::graph::GraphPage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

pub use crate::error::{PayloadIssue, VizError};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the homepage, the globe and the graph, and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Satellites" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/globe") view=GlobePage />
				<Route path=path!("/graph") view=GraphPage />
			</Routes>
		</Router>
	}
}
