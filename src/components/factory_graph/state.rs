use std::collections::BTreeSet;

use log::{debug, info, warn};

use super::clock::{SharedClock, iso_timestamp};
use super::error::GraphError;
use super::history::History;
use super::snapshot;
use super::types::{Asset, EdgeStyle, GraphEdge, GraphNode, Position};
use crate::config::{LAYOUT_COLUMNS, LAYOUT_ORIGIN, LAYOUT_SPACING};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSnapshot {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

/// Authoritative node and edge collections plus their undo history.
///
/// Every mutating method builds the complete next state first and then
/// commits exactly one snapshot, so a refused action leaves nothing behind.
/// The set of placed assets is always derived from `nodes`.
#[derive(Clone, Debug)]
pub struct FactoryGraph {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	history: History<GraphSnapshot>,
	clock: SharedClock,
}

impl Default for FactoryGraph {
	fn default() -> Self {
		Self::new(SharedClock::default())
	}
}

impl FactoryGraph {
	pub fn new(clock: SharedClock) -> Self {
		let mut history = History::new();
		history.commit(GraphSnapshot::default());
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			history,
			clock,
		}
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
		self.edges.iter().find(|e| e.id == id)
	}

	pub fn used_asset_ids(&self) -> BTreeSet<String> {
		self.nodes.iter().map(|n| n.data.id.clone()).collect()
	}

	pub fn is_asset_used(&self, asset_id: &str) -> bool {
		self.nodes.iter().any(|n| n.data.id == asset_id)
	}

	pub fn can_undo(&self) -> bool {
		self.history.can_undo()
	}

	pub fn can_redo(&self) -> bool {
		self.history.can_redo()
	}

	/// Number of undoable steps behind the present state.
	pub fn undo_depth(&self) -> usize {
		self.history.cursor().unwrap_or_default()
	}

	fn commit(&mut self, action: &str) {
		self.history.commit(GraphSnapshot {
			nodes: self.nodes.clone(),
			edges: self.edges.clone(),
		});
		debug!(
			"{action}: {} nodes, {} edges, {} assets in use",
			self.nodes.len(),
			self.edges.len(),
			self.used_asset_ids().len()
		);
	}

	fn restore(&mut self, snapshot: GraphSnapshot) {
		self.nodes = snapshot.nodes;
		self.edges = snapshot.edges;
	}

	fn unique_edge_id(edges: &[GraphEdge], source: &str, target: &str, millis: u64) -> String {
		let base = format!("edge-{source}-{target}-{millis}");
		if !edges.iter().any(|e| e.id == base) {
			return base;
		}
		let mut n = 1;
		loop {
			let id = format!("{base}-{n}");
			if !edges.iter().any(|e| e.id == id) {
				return id;
			}
			n += 1;
		}
	}

	pub fn place_asset(&mut self, asset: Asset, position: Position) -> Result<String, GraphError> {
		if self.is_asset_used(&asset.id) {
			warn!("rejected second placement of {}", asset.id);
			return Err(GraphError::AssetAlreadyUsed(asset.id));
		}
		let id = format!("{}-{}", asset.id, self.clock.now_millis());
		self.nodes.push(GraphNode::new(id.clone(), asset, position));
		self.commit("place");
		Ok(id)
	}

	/// Adds a directed connection. Duplicates and cycles are allowed.
	pub fn connect(&mut self, source: &str, target: &str, style: EdgeStyle) -> String {
		let id = Self::unique_edge_id(&self.edges, source, target, self.clock.now_millis());
		self.edges.push(GraphEdge::new(
			id.clone(),
			source.to_string(),
			target.to_string(),
			style,
		));
		self.commit("connect");
		id
	}

	/// Splices a new node into the middle of an existing connection.
	pub fn insert_asset_on_edge(&mut self, edge_id: &str, asset: Asset) -> Result<String, GraphError> {
		let original = self
			.edge(edge_id)
			.cloned()
			.ok_or_else(|| GraphError::EdgeNotFound(edge_id.to_string()))?;
		let (Some(source), Some(target)) = (self.node(&original.source), self.node(&original.target))
		else {
			return Err(GraphError::EndpointMissing(edge_id.to_string()));
		};
		if self.is_asset_used(&asset.id) {
			return Err(GraphError::AssetAlreadyUsed(asset.id));
		}

		let position = source.position.midpoint(target.position);
		let millis = self.clock.now_millis();
		let node_id = format!("{}-{}", asset.id, millis);

		let mut edges: Vec<GraphEdge> = self.edges.iter().filter(|e| e.id != edge_id).cloned().collect();
		let upstream = original.restyled(
			Self::unique_edge_id(&edges, &original.source, &node_id, millis),
			original.source.clone(),
			node_id.clone(),
		);
		edges.push(upstream);
		let downstream = original.restyled(
			Self::unique_edge_id(&edges, &node_id, &original.target, millis),
			node_id.clone(),
			original.target.clone(),
		);
		edges.push(downstream);

		self.nodes.push(GraphNode::new(node_id.clone(), asset, position));
		self.edges = edges;
		self.commit("insert on edge");
		Ok(node_id)
	}

	/// Removes a node together with every connection touching it.
	pub fn remove_node(&mut self, node_id: &str) -> bool {
		if self.node(node_id).is_none() {
			return false;
		}
		self.nodes.retain(|n| n.id != node_id);
		self.edges.retain(|e| !e.touches(node_id));
		self.commit("remove node");
		true
	}

	pub fn remove_edge(&mut self, edge_id: &str) -> bool {
		if self.edge(edge_id).is_none() {
			return false;
		}
		self.edges.retain(|e| e.id != edge_id);
		self.commit("remove edge");
		true
	}

	/// Moves a node without recording history; used while a drag is in flight.
	pub fn move_node(&mut self, node_id: &str, position: Position) -> bool {
		match self.nodes.iter_mut().find(|n| n.id == node_id) {
			Some(node) => {
				node.position = position;
				true
			}
			None => false,
		}
	}

	/// Records the end of a drag. Commits only if the node actually moved.
	pub fn finish_move(&mut self, node_id: &str) -> bool {
		let Some(now) = self.node(node_id).map(|n| n.position) else {
			return false;
		};
		let before = self
			.history
			.current()
			.and_then(|s| s.nodes.iter().find(|n| n.id == node_id))
			.map(|n| n.position);
		if before == Some(now) {
			return false;
		}
		self.commit("move");
		true
	}

	/// Writes edited properties back into a placed node. The asset id is kept.
	pub fn update_node_asset(&mut self, node_id: &str, mut asset: Asset) -> Result<(), GraphError> {
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == node_id)
			.ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
		asset.id = node.data.id.clone();
		if node.data == asset {
			return Ok(());
		}
		node.data = asset;
		self.commit("update properties");
		Ok(())
	}

	pub fn undo(&mut self) -> Result<(), GraphError> {
		let snapshot = self.history.undo().cloned().ok_or(GraphError::NothingToUndo)?;
		self.restore(snapshot);
		debug!("undo: {} steps remain", self.undo_depth());
		Ok(())
	}

	pub fn redo(&mut self) -> Result<(), GraphError> {
		let snapshot = self.history.redo().cloned().ok_or(GraphError::NothingToRedo)?;
		self.restore(snapshot);
		debug!("redo: {} steps behind", self.undo_depth());
		Ok(())
	}

	/// Lays nodes out row by row on a fixed grid, keeping order and edges.
	pub fn reset_layout(&mut self) {
		let (origin_x, origin_y) = LAYOUT_ORIGIN;
		let (spacing_x, spacing_y) = LAYOUT_SPACING;
		for (i, node) in self.nodes.iter_mut().enumerate() {
			let (col, row) = (i % LAYOUT_COLUMNS, i / LAYOUT_COLUMNS);
			node.position = Position::new(
				origin_x + col as f64 * spacing_x,
				origin_y + row as f64 * spacing_y,
			);
		}
		self.commit("reset layout");
	}

	pub fn export_snapshot(&self) -> Result<String, GraphError> {
		let timestamp = iso_timestamp(self.clock.now_millis());
		let text = snapshot::encode(&self.nodes, &self.edges, &timestamp)?;
		info!(
			"exported {} nodes and {} edges",
			self.nodes.len(),
			self.edges.len()
		);
		Ok(text)
	}

	pub fn export_file_name(&self) -> String {
		snapshot::file_name(self.clock.now_millis())
	}

	/// Replaces the whole graph with a saved document. A document placing one
	/// asset twice is refused. On error nothing changes.
	pub fn import_snapshot(&mut self, text: &str) -> Result<(), GraphError> {
		let document = snapshot::decode(text)?;
		let duplicate = {
			let mut seen = BTreeSet::new();
			let repeated = document
				.nodes
				.iter()
				.find(|n| !seen.insert(n.data.id.as_str()))
				.map(|n| n.data.id.clone());
			repeated
		};
		if let Some(asset_id) = duplicate {
			warn!("rejected import placing {asset_id} more than once");
			return Err(GraphError::InvalidFormat(format!(
				"asset \"{asset_id}\" is placed more than once"
			)));
		}
		self.nodes = document.nodes;
		self.edges = document.edges;
		self.commit("import");
		info!(
			"imported {} nodes and {} edges",
			self.nodes.len(),
			self.edges.len()
		);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::components::catalog;
	use crate::components::factory_graph::clock::tests::StepClock;

	fn graph() -> FactoryGraph {
		FactoryGraph::new(SharedClock::new(StepClock::starting_at(1_000)))
	}

	fn asset(id: &str) -> Asset {
		catalog::find(id).unwrap_or_else(|| Asset {
			id: id.to_string(),
			name: id.to_string(),
			kind: "tank".into(),
			group: "Test".into(),
			icon: "Container".into(),
			zone: None,
			zone_in_out: None,
			tags: Vec::new(),
		})
	}

	#[test]
	fn second_placement_of_an_asset_is_rejected() {
		let mut g = graph();
		let id = g.place_asset(asset("weighbridge"), Position::new(50.0, 50.0)).unwrap();
		assert_eq!(id, "weighbridge-1000");
		assert_eq!(
			g.used_asset_ids().into_iter().collect::<Vec<_>>(),
			vec!["weighbridge".to_string()]
		);

		let err = g
			.place_asset(asset("weighbridge"), Position::new(300.0, 50.0))
			.unwrap_err();
		assert!(matches!(err, GraphError::AssetAlreadyUsed(ref a) if a == "weighbridge"));
		assert_eq!(g.nodes().len(), 1);
		assert_eq!(g.used_asset_ids().len(), 1);
		assert_eq!(g.undo_depth(), 1);
	}

	#[test]
	fn splicing_replaces_one_edge_with_two() {
		let mut g = graph();
		let a = g.place_asset(asset("labsa-tank-1"), Position::new(0.0, 0.0)).unwrap();
		let b = g.place_asset(asset("labsa-batchpot-u1"), Position::new(400.0, 200.0)).unwrap();
		let c = g.place_asset(asset("slurry-mixer-u1"), Position::new(800.0, 0.0)).unwrap();
		let ab = g.connect(&a, &b, EdgeStyle::Step);
		let bc = g.connect(&b, &c, EdgeStyle::Bezier);

		let new = g.insert_asset_on_edge(&ab, asset("flow-meter-u1")).unwrap();

		assert_eq!(g.nodes().len(), 4);
		assert_eq!(g.edges().len(), 3);
		assert!(g.edge(&ab).is_none());
		assert!(g.edge(&bc).is_some());
		let inserted = g.node(&new).unwrap();
		assert_eq!(inserted.position, Position::new(200.0, 100.0));
		assert_eq!(inserted.data.id, "flow-meter-u1");

		let upstream = g.edges().iter().find(|e| e.source == a).unwrap();
		let downstream = g.edges().iter().find(|e| e.target == b).unwrap();
		assert_eq!(upstream.target, new);
		assert_eq!(downstream.source, new);
		assert_eq!(upstream.kind, EdgeStyle::Step);
		assert_eq!(downstream.kind, EdgeStyle::Step);

		g.undo().unwrap();
		assert!(g.edge(&ab).is_some());
		assert_eq!(g.nodes().len(), 3);
	}

	#[test]
	fn splicing_reports_missing_targets() {
		let mut g = graph();
		assert!(matches!(
			g.insert_asset_on_edge("nope", asset("flow-meter-u1")),
			Err(GraphError::EdgeNotFound(_))
		));

		let a = g.place_asset(asset("cp5-tank-1"), Position::default()).unwrap();
		let dangling = g.connect(&a, "ghost", EdgeStyle::Straight);
		let depth = g.undo_depth();
		assert!(matches!(
			g.insert_asset_on_edge(&dangling, asset("flow-meter-u1")),
			Err(GraphError::EndpointMissing(_))
		));
		assert_eq!(g.undo_depth(), depth);
		assert_eq!(g.edges().len(), 1);
	}

	#[test]
	fn splicing_keeps_assets_unique() {
		let mut g = graph();
		let a = g.place_asset(asset("cp5-tank-1"), Position::default()).unwrap();
		let b = g.place_asset(asset("cp5-tank-2"), Position::default()).unwrap();
		let edge = g.connect(&a, &b, EdgeStyle::Bezier);
		assert!(matches!(
			g.insert_asset_on_edge(&edge, asset("cp5-tank-1")),
			Err(GraphError::AssetAlreadyUsed(_))
		));
		assert!(g.edge(&edge).is_some());
	}

	#[test]
	fn removing_a_node_drops_its_edges_in_one_step() {
		let mut g = graph();
		let a = g.place_asset(asset("scmc-silo-1"), Position::default()).unwrap();
		let b = g.place_asset(asset("scmc-way-hopper-u1"), Position::default()).unwrap();
		let c = g.place_asset(asset("slurry-mixer-u1"), Position::default()).unwrap();
		g.connect(&a, &b, EdgeStyle::Bezier);
		let bc = g.connect(&b, &c, EdgeStyle::Bezier);
		g.connect(&a, &b, EdgeStyle::Bezier);

		assert!(g.remove_node(&a));
		assert_eq!(g.edges().len(), 1);
		assert!(g.edge(&bc).is_some());
		assert!(!g.is_asset_used("scmc-silo-1"));

		g.undo().unwrap();
		assert_eq!(g.edges().len(), 3);
		assert!(g.is_asset_used("scmc-silo-1"));
		assert!(!g.remove_node("missing"));
	}

	#[test]
	fn drags_commit_once_on_release() {
		let mut g = graph();
		let a = g.place_asset(asset("water-batchpot-u1"), Position::new(0.0, 0.0)).unwrap();
		let depth = g.undo_depth();

		for step in 1..=10 {
			assert!(g.move_node(&a, Position::new(step as f64, step as f64)));
		}
		assert_eq!(g.undo_depth(), depth);
		assert!(g.finish_move(&a));
		assert_eq!(g.undo_depth(), depth + 1);
		assert!(!g.finish_move(&a));

		g.undo().unwrap();
		assert_eq!(g.node(&a).unwrap().position, Position::new(0.0, 0.0));
	}

	#[test]
	fn reset_layout_places_nodes_on_the_grid() {
		let mut g = graph();
		let ids: Vec<String> = ["labsa-tank-1", "labsa-tank-2", "labsa-tank-3", "cp5-tank-1", "cp5-tank-2"]
			.iter()
			.map(|id| g.place_asset(asset(id), Position::new(-7.0, 13.0)).unwrap())
			.collect();
		let edge = g.connect(&ids[0], &ids[4], EdgeStyle::Bezier);

		g.reset_layout();

		let positions: Vec<Position> = g.nodes().iter().map(|n| n.position).collect();
		assert_eq!(
			positions,
			vec![
				Position::new(100.0, 100.0),
				Position::new(400.0, 100.0),
				Position::new(700.0, 100.0),
				Position::new(1000.0, 100.0),
				Position::new(100.0, 250.0),
			]
		);
		let order: Vec<&str> = g.nodes().iter().map(|n| n.id.as_str()).collect();
		assert_eq!(order, ids.iter().map(String::as_str).collect::<Vec<_>>());
		assert!(g.edge(&edge).is_some());
	}

	#[test]
	fn export_then_import_reproduces_the_graph() {
		let mut g = graph();
		let a = g.place_asset(asset("pvd-salt-silo-1"), Position::new(10.0, 20.0)).unwrap();
		let b = g.place_asset(asset("pvd-salt-way-hopper-u1"), Position::new(30.0, 40.0)).unwrap();
		g.connect(&a, &b, EdgeStyle::Straight);
		let text = g.export_snapshot().unwrap();

		let value: serde_json::Value = serde_json::from_str(&text).unwrap();
		assert!(value["timestamp"].as_str().unwrap().starts_with("1970-01-01T00:00:01"));
		assert_eq!(value["nodes"][0]["data"]["type"], "silo");
		assert_eq!(value["edges"][0]["markerEnd"]["type"], "arrowclosed");

		let mut fresh = graph();
		fresh.import_snapshot(&text).unwrap();
		assert_eq!(fresh.nodes(), g.nodes());
		assert_eq!(fresh.edges(), g.edges());
		assert!(fresh.is_asset_used("pvd-salt-silo-1"));
	}

	#[test]
	fn bad_import_leaves_the_graph_alone() {
		let mut g = graph();
		g.place_asset(asset("moisture-qty-1"), Position::default()).unwrap();
		let depth = g.undo_depth();

		assert!(matches!(
			g.import_snapshot(r#"{"foo": 1}"#),
			Err(GraphError::InvalidFormat(_))
		));
		assert!(matches!(
			g.import_snapshot("not json"),
			Err(GraphError::ParseFailure(_))
		));
		assert_eq!(g.nodes().len(), 1);
		assert_eq!(g.undo_depth(), depth);
	}

	#[test]
	fn import_refuses_an_asset_placed_twice() {
		let mut g = graph();
		g.place_asset(asset("cp5-tank-1"), Position::default()).unwrap();
		let depth = g.undo_depth();
		let weighbridge = serde_json::to_value(asset("weighbridge")).unwrap();
		let text = serde_json::json!({
			"nodes": [
				{"id": "a", "type": "custom", "position": {"x": 0, "y": 0}, "data": weighbridge},
				{"id": "b", "type": "custom", "position": {"x": 300, "y": 0}, "data": weighbridge},
			],
			"edges": [],
		})
		.to_string();

		let err = g.import_snapshot(&text).unwrap_err();
		assert!(matches!(err, GraphError::InvalidFormat(ref m) if m.contains("weighbridge")));
		assert_eq!(g.nodes().len(), 1);
		assert!(g.is_asset_used("cp5-tank-1"));
		assert!(!g.is_asset_used("weighbridge"));
		assert_eq!(g.undo_depth(), depth);
	}

	#[test]
	fn long_sessions_undo_all_the_way_back() {
		let mut g = graph();
		let a = g.place_asset(asset("weighbridge"), Position::default()).unwrap();
		let mut committed = 1;
		for step in 1..=250 {
			g.move_node(&a, Position::new(step as f64, 0.0));
			if g.finish_move(&a) {
				committed += 1;
			}
		}
		assert_eq!(committed, 251);

		let mut undone = 0;
		while g.undo().is_ok() {
			undone += 1;
		}
		assert_eq!(undone, committed);
		assert!(g.nodes().is_empty());
		assert!(g.used_asset_ids().is_empty());

		for _ in 0..committed {
			g.redo().unwrap();
		}
		assert_eq!(g.node(&a).unwrap().position, Position::new(250.0, 0.0));
	}

	#[test]
	fn property_edits_write_back_and_keep_the_asset_id() {
		let mut g = graph();
		let a = g.place_asset(asset("caustic-tank-1"), Position::default()).unwrap();
		let mut edited = asset("caustic-tank-1");
		edited.id = "something-else".into();
		edited.zone = Some("Zone A".into());

		g.update_node_asset(&a, edited).unwrap();
		let node = g.node(&a).unwrap();
		assert_eq!(node.data.id, "caustic-tank-1");
		assert_eq!(node.data.zone.as_deref(), Some("Zone A"));

		assert!(matches!(
			g.update_node_asset("gone", asset("caustic-tank-1")),
			Err(GraphError::NodeNotFound(_))
		));
	}

	#[test]
	fn undo_and_redo_report_boundaries() {
		let mut g = graph();
		assert!(matches!(g.undo(), Err(GraphError::NothingToUndo)));
		assert!(matches!(g.redo(), Err(GraphError::NothingToRedo)));
		g.place_asset(asset("weighbridge"), Position::default()).unwrap();
		assert!(g.can_undo());
		g.undo().unwrap();
		assert!(g.nodes().is_empty());
		assert!(g.used_asset_ids().is_empty());
		g.redo().unwrap();
		assert!(g.is_asset_used("weighbridge"));
	}

	#[test]
	fn new_action_after_undo_discards_redo() {
		let mut g = graph();
		g.place_asset(asset("cp5-tank-1"), Position::default()).unwrap();
		g.place_asset(asset("cp5-tank-2"), Position::default()).unwrap();
		g.undo().unwrap();
		g.place_asset(asset("cp5-tank-3"), Position::default()).unwrap();
		assert!(!g.can_redo());
		assert!(!g.is_asset_used("cp5-tank-2"));
	}

	#[derive(Clone, Debug)]
	enum Op {
		Place(usize, i32, i32),
		Connect(usize, usize),
		Insert(usize, usize),
		RemoveNode(usize),
		RemoveEdge(usize),
		Move(usize, i32),
		Reset,
	}

	const POOL: &[&str] = &[
		"weighbridge",
		"labsa-tank-1",
		"scmc-silo-1",
		"labsa-batchpot-u1",
		"flow-meter-u1",
		"slurry-mixer-u2",
	];

	fn op() -> impl Strategy<Value = Op> {
		prop_oneof![
			(0..POOL.len(), -500..500i32, -500..500i32).prop_map(|(a, x, y)| Op::Place(a, x, y)),
			(0..8usize, 0..8usize).prop_map(|(a, b)| Op::Connect(a, b)),
			(0..8usize, 0..POOL.len()).prop_map(|(e, a)| Op::Insert(e, a)),
			(0..8usize).prop_map(Op::RemoveNode),
			(0..8usize).prop_map(Op::RemoveEdge),
			(0..8usize, -50..50i32).prop_map(|(n, d)| Op::Move(n, d)),
			Just(Op::Reset),
		]
	}

	fn node_id(g: &FactoryGraph, i: usize) -> Option<String> {
		(!g.nodes().is_empty()).then(|| g.nodes()[i % g.nodes().len()].id.clone())
	}

	fn edge_id(g: &FactoryGraph, i: usize) -> Option<String> {
		(!g.edges().is_empty()).then(|| g.edges()[i % g.edges().len()].id.clone())
	}

	fn apply(g: &mut FactoryGraph, op: &Op) {
		match *op {
			Op::Place(a, x, y) => {
				let _ = g.place_asset(asset(POOL[a]), Position::new(x as f64, y as f64));
			}
			Op::Connect(a, b) => {
				if let (Some(s), Some(t)) = (node_id(g, a), node_id(g, b)) {
					g.connect(&s, &t, EdgeStyle::Bezier);
				}
			}
			Op::Insert(e, a) => {
				if let Some(e) = edge_id(g, e) {
					let _ = g.insert_asset_on_edge(&e, asset(POOL[a]));
				}
			}
			Op::RemoveNode(n) => {
				if let Some(n) = node_id(g, n) {
					g.remove_node(&n);
				}
			}
			Op::RemoveEdge(e) => {
				if let Some(e) = edge_id(g, e) {
					g.remove_edge(&e);
				}
			}
			Op::Move(n, d) => {
				if let Some(n) = node_id(g, n) {
					let p = g.node(&n).map(|n| n.position).unwrap_or_default();
					g.move_node(&n, Position::new(p.x + d as f64, p.y));
					g.finish_move(&n);
				}
			}
			Op::Reset => g.reset_layout(),
		}
	}

	proptest! {
		#[test]
		fn no_asset_is_ever_placed_twice(ops in prop::collection::vec(op(), 0..40)) {
			let mut g = graph();
			for op in &ops {
				apply(&mut g, op);
				let ids: Vec<&str> = g.nodes().iter().map(|n| n.data.id.as_str()).collect();
				let distinct: BTreeSet<&str> = ids.iter().copied().collect();
				prop_assert_eq!(ids.len(), distinct.len());
				prop_assert_eq!(g.used_asset_ids().len(), distinct.len());
			}
		}

		#[test]
		fn undo_all_then_redo_all_round_trips(ops in prop::collection::vec(op(), 0..40)) {
			let mut g = graph();
			for op in &ops {
				apply(&mut g, op);
			}
			let steps = g.undo_depth();
			let (nodes, edges) = (g.nodes().to_vec(), g.edges().to_vec());

			for _ in 0..steps {
				prop_assert!(g.undo().is_ok());
			}
			prop_assert!(g.nodes().is_empty());
			prop_assert!(g.edges().is_empty());
			prop_assert!(g.undo().is_err());

			for _ in 0..steps {
				prop_assert!(g.redo().is_ok());
			}
			prop_assert_eq!(g.nodes(), &nodes[..]);
			prop_assert_eq!(g.edges(), &edges[..]);
			prop_assert!(g.redo().is_err());
		}

		#[test]
		fn splice_changes_counts_by_one(x in -300..300i32, y in -300..300i32) {
			let mut g = graph();
			let a = g.place_asset(asset("labsa-tank-1"), Position::default()).unwrap();
			let b = g.place_asset(asset("labsa-tank-2"), Position::new(x as f64, y as f64)).unwrap();
			let keep = g.connect(&b, &a, EdgeStyle::Bezier);
			let edge = g.connect(&a, &b, EdgeStyle::Bezier);
			g.insert_asset_on_edge(&edge, asset("flow-meter-u1")).unwrap();
			prop_assert_eq!(g.nodes().len(), 3);
			prop_assert_eq!(g.edges().len(), 3);
			prop_assert!(g.edge(&keep).is_some());
		}
	}
}
