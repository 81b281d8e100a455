use leptos::prelude::*;

use crate::components::network::{
	EdgeRecord, NetworkCanvas, NetworkPayload, NodeRecord, page_payload,
};

const ORBIT_CLASSES: &[&str] = &["LEO", "MEO", "GEO", "HEO"];

/// Satellites linked to their orbit class, numbered from 1 the way the
/// backend numbers them.
fn sample_payload(n: usize) -> NetworkPayload {
	let mut payload = NetworkPayload::default();
	let mut orbit_ids: Vec<Option<i64>> = vec![None; ORBIT_CLASSES.len()];
	let mut next_id = 1;

	for i in 0..n {
		let class = (rand_simple(i) * ORBIT_CLASSES.len() as f64) as usize;
		let alt = match ORBIT_CLASSES[class] {
			"LEO" => 300.0 + rand_simple(i + n) * 1700.0,
			"MEO" => 2000.0 + rand_simple(i + n) * 33000.0,
			"GEO" => 35786.0,
			_ => 1000.0 + rand_simple(i + n) * 39000.0,
		};
		let sat_id = next_id;
		next_id += 1;
		let mut node = NodeRecord::new(sat_id)
			.with_label(format!("SAT-{}", i + 1))
			.with_group("satellite");
		node.title = Some(format!("alt={:.0}", alt));
		payload.nodes.push(node);

		let orbit_id = *orbit_ids[class].get_or_insert_with(|| {
			let id = next_id;
			next_id += 1;
			payload.nodes.push(
				NodeRecord::new(id)
					.with_label(ORBIT_CLASSES[class])
					.with_group("orbit"),
			);
			id
		});
		payload.edges.push(EdgeRecord::new(sat_id, orbit_id));
	}
	payload
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

#[component]
pub fn GraphPage() -> impl IntoView {
	let payload = Signal::derive(move || page_payload().unwrap_or_else(|| sample_payload(40)));

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

			<div class="fullscreen-graph">
				<NetworkCanvas payload=payload />
				<div class="graph-overlay">
					<h1>"Orbit graph"</h1>
					<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network::{ItemId, PayloadPolicy, shape_payload};

	#[test]
	fn sample_is_well_formed() {
		let payload = sample_payload(40);
		let satellites = payload
			.nodes
			.iter()
			.filter(|n| n.group.as_deref() == Some("satellite"))
			.count();
		assert_eq!(satellites, 40);
		assert_eq!(payload.edges.len(), 40);
		assert!(payload.nodes.len() <= 40 + ORBIT_CLASSES.len());

		let data = shape_payload(payload, PayloadPolicy::Strict).unwrap();
		assert_eq!(data.nodes.get(&ItemId::Int(1)).unwrap().label.as_deref(), Some("SAT-1"));
	}
}
