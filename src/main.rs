use leptos::prelude::*;
use orbit_views::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
