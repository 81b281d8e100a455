use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::options::NodeShape;
use super::state::NetworkState;

const BACKGROUND: &str = "#1a1a2e";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let line_width = 1.5 / k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let dimmed = state.has_active_highlight();
	ctx.set_stroke_style_str(&state.options.edges.color);

	state.graph.visit_edges(|n1, n2, _| {
		let highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());
		let (alpha, width) = match (dimmed, highlighted) {
			(false, _) => (1.0, line_width),
			(true, true) => (1.0, line_width * (1.0 + 0.6 * t)),
			(true, false) => (1.0 - 0.7 * t, line_width),
		};
		ctx.set_global_alpha(alpha);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
	ctx.set_global_alpha(1.0);
}

fn trace_shape(ctx: &CanvasRenderingContext2d, shape: NodeShape, x: f64, y: f64, r: f64) {
	ctx.begin_path();
	match shape {
		NodeShape::Dot => {
			let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		}
		NodeShape::Square => ctx.rect(x - r, y - r, 2.0 * r, 2.0 * r),
		NodeShape::Triangle => {
			let h = r * 3.0_f64.sqrt() / 2.0;
			ctx.move_to(x, y - r);
			ctx.line_to(x + h, y + r / 2.0);
			ctx.line_to(x - h, y + r / 2.0);
			ctx.close_path();
		}
	}
}

fn draw_node(
	state: &NetworkState,
	ctx: &CanvasRenderingContext2d,
	(x, y): (f64, f64),
	radius: f64,
	label: Option<&str>,
) {
	let style = &state.options.nodes;
	trace_shape(ctx, style.shape, x, y, radius);
	ctx.set_fill_style_str(&style.color.background);
	ctx.fill();
	ctx.set_stroke_style_str(&style.color.border);
	ctx.set_line_width(1.0 / state.transform.k);
	ctx.stroke();

	if let Some(label) = label {
		ctx.set_fill_style_str(&style.font.color);
		ctx.set_font(&format!(
			"{}px sans-serif",
			style.font.size / state.transform.k.max(0.5)
		));
		ctx.set_text_align("center");
		let _ = ctx.fill_text(label, x, y + radius + style.font.size);
	}
}

fn draw_nodes(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);
	let base = state.node_radius();

	state.graph.visit_nodes(|node| {
		if has_highlight && state.is_highlighted(node.index()) {
			return;
		}
		ctx.set_global_alpha(if has_highlight { 1.0 - 0.7 * t } else { 1.0 });
		let label = node.data.user_data.label.as_deref();
		draw_node(
			state,
			ctx,
			(node.x() as f64, node.y() as f64),
			base,
			label,
		);
	});
	ctx.set_global_alpha(1.0);

	if !has_highlight {
		return;
	}

	// highlighted nodes on top
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let radius = if state.is_hovered(idx) {
			base * (1.0 + 0.35 * t)
		} else {
			base * (1.0 + 0.2 * t)
		};
		draw_node(
			state,
			ctx,
			(x, y),
			radius,
			node.data.user_data.label.as_deref(),
		);

		if state.is_hovered(idx) && t > 0.01 {
			trace_shape(ctx, state.options.nodes.shape, x, y, radius + 3.0 / state.transform.k);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / state.transform.k);
			ctx.stroke();

			if let Some(title) = &node.data.user_data.title {
				ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", t));
				ctx.set_text_align("left");
				let _ = ctx.fill_text(title, x + radius + 6.0, y - radius - 6.0);
			}
		}
	});
}
