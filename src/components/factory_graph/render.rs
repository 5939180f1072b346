use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::{self, EdgePath, HANDLE_RADIUS, INSERT_BADGE_RADIUS, NODE_HEIGHT, node_size, source_handle, target_handle};
use super::interaction::{CanvasState, Selection, edge_path};
use super::state::FactoryGraph;
use super::types::{GraphEdge, GraphNode, MarkerKind, Position};
use crate::config::Theme;

const GRID_GAP: f64 = 20.0;
const MINIMAP_WIDTH: f64 = 180.0;
const MINIMAP_HEIGHT: f64 = 120.0;
const NAME_CHARS: usize = 22;

struct Palette {
	background: &'static str,
	grid: &'static str,
	card: &'static str,
	card_border: &'static str,
	selected: &'static str,
	text: &'static str,
	muted: &'static str,
	icon_bg: &'static str,
	target_handle: &'static str,
	source_handle: &'static str,
	minimap_bg: &'static str,
	minimap_node: &'static str,
}

const DARK: Palette = Palette {
	background: "#0f172a",
	grid: "rgba(148, 163, 184, 0.18)",
	card: "#1e293b",
	card_border: "#334155",
	selected: "#38bdf8",
	text: "#f1f5f9",
	muted: "#94a3b8",
	icon_bg: "rgba(56, 189, 248, 0.2)",
	target_handle: "#38bdf8",
	source_handle: "#34d399",
	minimap_bg: "rgba(30, 41, 59, 0.7)",
	minimap_node: "#38bdf8",
};

const LIGHT: Palette = Palette {
	background: "#f8fafc",
	grid: "rgba(100, 116, 139, 0.2)",
	card: "#ffffff",
	card_border: "#cbd5e1",
	selected: "#0284c7",
	text: "#0f172a",
	muted: "#64748b",
	icon_bg: "rgba(2, 132, 199, 0.12)",
	target_handle: "#0284c7",
	source_handle: "#059669",
	minimap_bg: "rgba(226, 232, 240, 0.8)",
	minimap_node: "#0284c7",
};

pub struct RenderOptions<'a> {
	pub theme: Theme,
	pub show_grid: bool,
	pub show_minimap: bool,
	pub selection: &'a Selection,
}

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(
	state: &CanvasState,
	graph: &FactoryGraph,
	opts: &RenderOptions<'_>,
	ctx: &CanvasRenderingContext2d,
) {
	let palette = match opts.theme {
		Theme::Dark => &DARK,
		Theme::Light => &LIGHT,
	};
	ctx.set_fill_style_str(palette.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	if opts.show_grid {
		draw_grid(state, palette, ctx);
	}

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	for edge in graph.edges() {
		draw_edge(state, graph, edge, opts.selection.edge() == Some(edge.id.as_str()), palette, ctx);
	}
	draw_pending_connection(state, graph, palette, ctx);
	for node in graph.nodes() {
		draw_node(state, node, opts.selection.node() == Some(node.id.as_str()), palette, ctx);
	}
	ctx.restore();

	if opts.show_minimap {
		draw_minimap(state, graph, palette, ctx);
	}
}

fn draw_grid(state: &CanvasState, palette: &Palette, ctx: &CanvasRenderingContext2d) {
	let gap = GRID_GAP * state.transform.k;
	if gap < 4.0 {
		return;
	}
	let (ox, oy) = (state.transform.x.rem_euclid(gap), state.transform.y.rem_euclid(gap));
	ctx.set_fill_style_str(palette.grid);
	let mut x = ox;
	while x < state.width {
		let mut y = oy;
		while y < state.height {
			ctx.fill_rect(x - 0.5, y - 0.5, 1.0, 1.0);
			y += gap;
		}
		x += gap;
	}
}

fn trace(path: &EdgePath, ctx: &CanvasRenderingContext2d) {
	ctx.begin_path();
	match path {
		EdgePath::Polyline(points) => {
			if let Some(first) = points.first() {
				ctx.move_to(first.x, first.y);
			}
			for p in points.iter().skip(1) {
				ctx.line_to(p.x, p.y);
			}
		}
		EdgePath::Cubic { from, c1, c2, to } => {
			ctx.move_to(from.x, from.y);
			ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y);
		}
	}
}

fn draw_edge(
	state: &CanvasState,
	graph: &FactoryGraph,
	edge: &GraphEdge,
	selected: bool,
	palette: &Palette,
	ctx: &CanvasRenderingContext2d,
) {
	let Some(path) = edge_path(graph, &edge.source, &edge.target, edge.kind) else {
		return;
	};
	let k = state.transform.k;
	let stroke = match (&edge.stroke, selected) {
		(_, true) => palette.selected.to_string(),
		(Some(s), false) => s.stroke.clone(),
		(None, false) => palette.muted.to_string(),
	};
	let width = edge.stroke.as_ref().map_or(2.0, |s| s.stroke_width) * if selected { 1.6 } else { 1.0 };

	ctx.set_stroke_style_str(&stroke);
	ctx.set_line_width(width);
	if edge.animated {
		let (dash, gap) = (8.0, 4.0);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(-(state.flow_time * 30.0) % (dash + gap));
	}
	trace(&path, ctx);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	if let Some(marker) = edge.marker_end {
		let (ux, uy) = path.end_direction();
		let tip = path.points().last().copied().unwrap_or_default();
		let size = 10.0_f64.max(4.0 / k);
		let (back_x, back_y) = (tip.x - ux * size, tip.y - uy * size);
		let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
		ctx.begin_path();
		ctx.move_to(back_x + px, back_y + py);
		ctx.line_to(tip.x, tip.y);
		ctx.line_to(back_x - px, back_y - py);
		match marker.kind {
			MarkerKind::ArrowClosed => {
				ctx.close_path();
				ctx.set_fill_style_str(&stroke);
				ctx.fill();
			}
			MarkerKind::Arrow => ctx.stroke(),
		}
	}

	if selected {
		let mid = path.midpoint();
		ctx.begin_path();
		let _ = ctx.arc(mid.x, mid.y, INSERT_BADGE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(palette.selected);
		ctx.fill();
		ctx.set_fill_style_str(palette.background);
		ctx.set_font("bold 14px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text("+", mid.x, mid.y + 1.0);
		ctx.set_text_align("start");
		ctx.set_text_baseline("alphabetic");
	}
}

fn draw_pending_connection(
	state: &CanvasState,
	graph: &FactoryGraph,
	palette: &Palette,
	ctx: &CanvasRenderingContext2d,
) {
	let Some(source) = state.connect.source.as_deref().and_then(|id| graph.node(id)) else {
		return;
	};
	let path = EdgePath::route(Default::default(), source_handle(source), state.connect.pointer);
	ctx.set_stroke_style_str(palette.selected);
	ctx.set_line_width(1.5);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(5.0),
		&JsValue::from_f64(5.0),
	));
	trace(&path, ctx);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn truncate(text: &str) -> String {
	if text.chars().count() <= NAME_CHARS {
		text.to_string()
	} else {
		let head: String = text.chars().take(NAME_CHARS - 1).collect();
		format!("{head}…")
	}
}

fn capitalize(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

fn draw_node(
	state: &CanvasState,
	node: &GraphNode,
	selected: bool,
	palette: &Palette,
	ctx: &CanvasRenderingContext2d,
) {
	let Position { x, y } = node.position;
	let (w, h) = node_size(node);
	let hovered = state.hover.node.as_deref() == Some(node.id.as_str());
	let t = if hovered { ease_out_cubic(state.hover.highlight_t) } else { 0.0 };

	if selected {
		ctx.set_shadow_color("rgba(56, 189, 248, 0.45)");
		ctx.set_shadow_blur(20.0);
	}
	rounded_rect(ctx, x, y, w, h, 12.0);
	ctx.set_fill_style_str(palette.card);
	ctx.fill();
	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_color("transparent");
	ctx.set_line_width(2.0);
	if selected {
		ctx.set_stroke_style_str(palette.selected);
	} else if t > 0.01 {
		ctx.set_global_alpha(0.5 + 0.5 * t);
		ctx.set_stroke_style_str(palette.selected);
	} else {
		ctx.set_stroke_style_str(palette.card_border);
	}
	ctx.stroke();
	ctx.set_global_alpha(1.0);

	let (icon_x, icon_y) = (x + 16.0, y + 12.0);
	rounded_rect(ctx, icon_x, icon_y, 40.0, 40.0, 8.0);
	ctx.set_fill_style_str(palette.icon_bg);
	ctx.fill();
	ctx.set_font("20px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(palette.selected);
	let _ = ctx.fill_text(node.data.icon_kind().glyph(), icon_x + 20.0, icon_y + 21.0);
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");

	ctx.set_fill_style_str(palette.text);
	ctx.set_font("500 14px sans-serif");
	let _ = ctx.fill_text(&truncate(&node.data.name), x + 68.0, y + 29.0);
	ctx.set_fill_style_str(palette.muted);
	ctx.set_font("12px sans-serif");
	let _ = ctx.fill_text(&capitalize(&node.data.kind), x + 68.0, y + 46.0);

	if let Some(zone) = node.data.zone.as_deref().filter(|z| !z.is_empty()) {
		ctx.set_stroke_style_str(palette.card_border);
		ctx.set_line_width(1.0);
		ctx.begin_path();
		ctx.move_to(x + 16.0, y + NODE_HEIGHT);
		ctx.line_to(x + w - 16.0, y + NODE_HEIGHT);
		ctx.stroke();
		ctx.set_fill_style_str(palette.muted);
		let _ = ctx.fill_text(&format!("Zone: {}", truncate(zone)), x + 16.0, y + NODE_HEIGHT + 15.0);
	}

	for (handle, color) in [
		(target_handle(node), palette.target_handle),
		(source_handle(node), palette.source_handle),
	] {
		ctx.begin_path();
		let _ = ctx.arc(handle.x, handle.y, HANDLE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();
		ctx.set_line_width(2.0);
		ctx.set_stroke_style_str(palette.card);
		ctx.stroke();
	}
}

fn draw_minimap(
	state: &CanvasState,
	graph: &FactoryGraph,
	palette: &Palette,
	ctx: &CanvasRenderingContext2d,
) {
	let Some((min, max)) = geometry::bounds(graph.nodes()) else {
		return;
	};
	let (left, top) = (state.width - MINIMAP_WIDTH - 16.0, state.height - MINIMAP_HEIGHT - 16.0);
	rounded_rect(ctx, left, top, MINIMAP_WIDTH, MINIMAP_HEIGHT, 8.0);
	ctx.set_fill_style_str(palette.minimap_bg);
	ctx.fill();

	// Scale so both the graph and the visible viewport fit.
	let view_min = state.screen_to_graph(0.0, 0.0);
	let view_max = state.screen_to_graph(state.width, state.height);
	let (lo_x, lo_y) = (min.x.min(view_min.x), min.y.min(view_min.y));
	let (hi_x, hi_y) = (max.x.max(view_max.x), max.y.max(view_max.y));
	let scale = ((MINIMAP_WIDTH - 16.0) / (hi_x - lo_x).max(1.0))
		.min((MINIMAP_HEIGHT - 16.0) / (hi_y - lo_y).max(1.0));
	let map = |p: Position| (left + 8.0 + (p.x - lo_x) * scale, top + 8.0 + (p.y - lo_y) * scale);

	ctx.set_fill_style_str(palette.minimap_node);
	for node in graph.nodes() {
		let (w, h) = node_size(node);
		let (mx, my) = map(node.position);
		ctx.fill_rect(mx, my, (w * scale).max(2.0), (h * scale).max(2.0));
	}
	let (vx, vy) = map(view_min);
	ctx.set_stroke_style_str(palette.muted);
	ctx.set_line_width(1.0);
	ctx.stroke_rect(
		vx,
		vy,
		(view_max.x - view_min.x) * scale,
		(view_max.y - view_min.y) * scale,
	);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn long_names_are_shortened() {
		assert_eq!(truncate("Flow Meter U1"), "Flow Meter U1");
		let short = truncate("Soda Ash Light BatchPot U1");
		assert_eq!(short.chars().count(), NAME_CHARS);
		assert!(short.ends_with('…'));
	}

	#[test]
	fn type_labels_are_capitalized() {
		assert_eq!(capitalize("batchpot"), "Batchpot");
		assert_eq!(capitalize(""), "");
	}
}
