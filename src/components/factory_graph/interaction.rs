use super::geometry::{
	self, EDGE_HIT_DISTANCE, EdgePath, HANDLE_HIT_RADIUS, INSERT_BADGE_RADIUS, node_contains, source_handle,
	target_handle,
};
use super::state::FactoryGraph;
use super::types::{EdgeStyle, Position};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;
const FIT_PADDING: f64 = 60.0;

/// What the user currently has selected on the canvas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	None,
	Node(String),
	Edge(String),
}

impl Selection {
	pub fn node(&self) -> Option<&str> {
		match self {
			Selection::Node(id) => Some(id),
			_ => None,
		}
	}

	pub fn edge(&self) -> Option<&str> {
		match self {
			Selection::Edge(id) => Some(id),
			_ => None,
		}
	}
}

/// Result of hit-testing a screen point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pick {
	SourceHandle(String),
	Node(String),
	Edge(String),
	Empty,
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_id: Option<String>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// A connection being drawn from a source handle to the pointer.
#[derive(Clone, Debug, Default)]
pub struct ConnectState {
	pub source: Option<String>,
	pub pointer: Position,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<String>,
	pub highlight_t: f64,
}

pub struct CanvasState {
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub connect: ConnectState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			connect: ConnectState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Position {
		Position::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn graph_to_screen(&self, p: Position) -> (f64, f64) {
		(
			p.x * self.transform.k + self.transform.x,
			p.y * self.transform.k + self.transform.y,
		)
	}

	/// Topmost thing under the pointer: handles, then cards, then connections.
	pub fn pick(&self, graph: &FactoryGraph, sx: f64, sy: f64) -> Pick {
		let p = self.screen_to_graph(sx, sy);
		// Hit radii are in screen space so handles stay grabbable when zoomed out.
		let handle_radius = HANDLE_HIT_RADIUS / self.transform.k;
		let nodes = graph.nodes();

		if let Some(node) = nodes
			.iter()
			.rev()
			.find(|n| geometry::distance(source_handle(n), p) <= handle_radius)
		{
			return Pick::SourceHandle(node.id.clone());
		}
		if let Some(node) = nodes.iter().rev().find(|n| node_contains(n, p)) {
			return Pick::Node(node.id.clone());
		}
		let tolerance = EDGE_HIT_DISTANCE / self.transform.k;
		graph
			.edges()
			.iter()
			.rev()
			.find(|e| {
				edge_path(graph, &e.source, &e.target, e.kind).is_some_and(|path| path.hit(p, tolerance))
			})
			.map_or(Pick::Empty, |e| Pick::Edge(e.id.clone()))
	}

	/// Node whose card or incoming handle is under the pointer, for finishing a connection.
	pub fn drop_target(&self, graph: &FactoryGraph, sx: f64, sy: f64) -> Option<String> {
		let p = self.screen_to_graph(sx, sy);
		let handle_radius = HANDLE_HIT_RADIUS / self.transform.k;
		graph
			.nodes()
			.iter()
			.rev()
			.find(|n| node_contains(n, p) || geometry::distance(target_handle(n), p) <= handle_radius)
			.map(|n| n.id.clone())
	}

	/// Whether the pointer is on the insert badge of connection `edge_id`.
	pub fn hits_insert_badge(&self, graph: &FactoryGraph, edge_id: &str, sx: f64, sy: f64) -> bool {
		let Some(edge) = graph.edge(edge_id) else {
			return false;
		};
		let p = self.screen_to_graph(sx, sy);
		edge_path(graph, &edge.source, &edge.target, edge.kind)
			.is_some_and(|path| geometry::distance(path.midpoint(), p) <= INSERT_BADGE_RADIUS)
	}

	pub fn set_hover(&mut self, node: Option<String>) {
		if self.hover.node != node {
			self.hover.node = node;
			self.hover.highlight_t = 0.0;
		}
	}

	/// Zooms by `factor` keeping the screen point (sx, sy) fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn zoom_centered(&mut self, factor: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	/// Frames every node in the viewport. An empty graph resets the view.
	pub fn fit(&mut self, graph: &FactoryGraph) {
		let Some((min, max)) = geometry::bounds(graph.nodes()) else {
			self.transform = ViewTransform::default();
			return;
		};
		let (w, h) = (max.x - min.x + 2.0 * FIT_PADDING, max.y - min.y + 2.0 * FIT_PADDING);
		let k = (self.width / w).min(self.height / h).clamp(MIN_ZOOM, 1.0);
		self.transform.k = k;
		self.transform.x = (self.width - (max.x - min.x) * k) / 2.0 - min.x * k;
		self.transform.y = (self.height - (max.y - min.y) * k) / 2.0 - min.y * k;
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * 6.0 * dt;
		if self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Route between two nodes' handles, or `None` if either node is gone.
pub fn edge_path(graph: &FactoryGraph, source: &str, target: &str, style: EdgeStyle) -> Option<EdgePath> {
	let (s, t) = (graph.node(source)?, graph.node(target)?);
	Some(EdgePath::route(style, source_handle(s), target_handle(t)))
}
