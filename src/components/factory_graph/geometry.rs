use super::types::{EdgeStyle, GraphNode, Position};

pub const NODE_WIDTH: f64 = 200.0;
pub const NODE_HEIGHT: f64 = 64.0;
pub const ZONE_ROW_HEIGHT: f64 = 22.0;
pub const HANDLE_RADIUS: f64 = 6.0;
pub const HANDLE_HIT_RADIUS: f64 = 10.0;
pub const EDGE_HIT_DISTANCE: f64 = 6.0;
/// Radius of the "+" badge drawn on a selected connection.
pub const INSERT_BADGE_RADIUS: f64 = 9.0;
const BEZIER_SAMPLES: usize = 24;

pub fn node_size(node: &GraphNode) -> (f64, f64) {
	let zone = node.data.zone.as_deref().is_some_and(|z| !z.is_empty());
	(
		NODE_WIDTH,
		if zone {
			NODE_HEIGHT + ZONE_ROW_HEIGHT
		} else {
			NODE_HEIGHT
		},
	)
}

pub fn node_contains(node: &GraphNode, p: Position) -> bool {
	let (w, h) = node_size(node);
	let Position { x, y } = node.position;
	p.x >= x && p.x <= x + w && p.y >= y && p.y <= y + h
}

/// Outgoing connection handle, centred on the right edge.
pub fn source_handle(node: &GraphNode) -> Position {
	let (w, h) = node_size(node);
	Position::new(node.position.x + w, node.position.y + h / 2.0)
}

/// Incoming connection handle, centred on the left edge.
pub fn target_handle(node: &GraphNode) -> Position {
	let (_, h) = node_size(node);
	Position::new(node.position.x, node.position.y + h / 2.0)
}

pub fn distance(a: Position, b: Position) -> f64 {
	((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

fn distance_to_segment(p: Position, a: Position, b: Position) -> f64 {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let len2 = dx * dx + dy * dy;
	if len2 < f64::EPSILON {
		return distance(p, a);
	}
	let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
	distance(p, Position::new(a.x + t * dx, a.y + t * dy))
}

#[derive(Clone, Debug, PartialEq)]
pub enum EdgePath {
	Polyline(Vec<Position>),
	Cubic {
		from: Position,
		c1: Position,
		c2: Position,
		to: Position,
	},
}

impl EdgePath {
	pub fn route(style: EdgeStyle, from: Position, to: Position) -> Self {
		match style {
			EdgeStyle::Straight => EdgePath::Polyline(vec![from, to]),
			EdgeStyle::Step => {
				let mid_x = (from.x + to.x) / 2.0;
				EdgePath::Polyline(vec![
					from,
					Position::new(mid_x, from.y),
					Position::new(mid_x, to.y),
					to,
				])
			}
			EdgeStyle::Bezier => {
				let offset = ((to.x - from.x).abs() * 0.5).max(40.0);
				EdgePath::Cubic {
					from,
					c1: Position::new(from.x + offset, from.y),
					c2: Position::new(to.x - offset, to.y),
					to,
				}
			}
		}
	}

	pub fn points(&self) -> Vec<Position> {
		match self {
			EdgePath::Polyline(points) => points.clone(),
			EdgePath::Cubic { from, c1, c2, to } => (0..=BEZIER_SAMPLES)
				.map(|i| {
					let t = i as f64 / BEZIER_SAMPLES as f64;
					let u = 1.0 - t;
					let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
					Position::new(
						a * from.x + b * c1.x + c * c2.x + d * to.x,
						a * from.y + b * c1.y + c * c2.y + d * to.y,
					)
				})
				.collect(),
		}
	}

	/// Point halfway along the path's length.
	pub fn midpoint(&self) -> Position {
		let points = self.points();
		let total: f64 = points.windows(2).map(|w| distance(w[0], w[1])).sum();
		let mut remaining = total / 2.0;
		for w in points.windows(2) {
			let len = distance(w[0], w[1]);
			if len >= remaining && len > 0.0 {
				let t = remaining / len;
				return Position::new(
					w[0].x + (w[1].x - w[0].x) * t,
					w[0].y + (w[1].y - w[0].y) * t,
				);
			}
			remaining -= len;
		}
		points.first().copied().unwrap_or_default()
	}

	pub fn hit(&self, p: Position, tolerance: f64) -> bool {
		self.points()
			.windows(2)
			.any(|w| distance_to_segment(p, w[0], w[1]) <= tolerance)
	}

	/// Direction of travel at the end of the path, as a unit vector.
	pub fn end_direction(&self) -> (f64, f64) {
		let points = self.points();
		let n = points.len();
		if n < 2 {
			return (1.0, 0.0);
		}
		let (a, b) = (points[n - 2], points[n - 1]);
		let len = distance(a, b);
		if len < f64::EPSILON {
			(1.0, 0.0)
		} else {
			((b.x - a.x) / len, (b.y - a.y) / len)
		}
	}
}

/// Axis-aligned box around every node, as (min, max).
pub fn bounds(nodes: &[GraphNode]) -> Option<(Position, Position)> {
	nodes.iter().fold(None, |acc, node| {
		let (w, h) = node_size(node);
		let lo = node.position;
		let hi = Position::new(lo.x + w, lo.y + h);
		Some(match acc {
			None => (lo, hi),
			Some((min, max)) => (
				Position::new(min.x.min(lo.x), min.y.min(lo.y)),
				Position::new(max.x.max(hi.x), max.y.max(hi.y)),
			),
		})
	})
}
