use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Node type tag written into exported files.
pub const NODE_TYPE: &str = "custom";

pub const EDGE_STROKE: &str = "#38bdf8";
pub const EDGE_STROKE_WIDTH: f64 = 2.0;

#[derive(
	Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ZoneDirection {
	In,
	Out,
}

/// How a tag's readings are folded into the zone loss figure.
#[derive(
	Clone,
	Copy,
	Debug,
	Default,
	PartialEq,
	Eq,
	Hash,
	Serialize,
	Deserialize,
	Display,
	EnumString,
	EnumIter,
)]
pub enum CalculationType {
	#[default]
	Addition,
	Subtraction,
	Ratio,
	Average,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTag {
	pub id: String,
	pub name: String,
	pub zone_in_out: ZoneDirection,
	pub calculation_type: CalculationType,
}

/// A catalog entry, and the payload carried by every placed node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
	pub id: String,
	pub name: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub group: String,
	pub icon: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub zone: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub zone_in_out: Option<ZoneDirection>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub tags: Vec<AssetTag>,
}

impl Asset {
	pub fn icon_kind(&self) -> IconKind {
		IconKind::from_key(&self.icon)
	}
}

/// Closed set of icons an asset can ask for. Unknown keys render as `Box`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display)]
pub enum IconKind {
	Scale,
	Container,
	Cylinder,
	Beaker,
	Cone,
	Blend,
	Gauge,
	Droplet,
	Box,
}

impl IconKind {
	pub fn from_key(key: &str) -> Self {
		key.parse().unwrap_or(IconKind::Box)
	}

	pub fn glyph(self) -> &'static str {
		match self {
			IconKind::Scale => "⚖",
			IconKind::Container => "🛢",
			IconKind::Cylinder => "⛁",
			IconKind::Beaker => "⚗",
			IconKind::Cone => "⏷",
			IconKind::Blend => "⟳",
			IconKind::Gauge => "◔",
			IconKind::Droplet => "💧",
			IconKind::Box => "▣",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn midpoint(self, other: Position) -> Position {
		Position::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: String,
	#[serde(rename = "type", default = "default_node_type")]
	pub kind: String,
	pub position: Position,
	pub data: Asset,
}

fn default_node_type() -> String {
	NODE_TYPE.to_string()
}

impl GraphNode {
	pub fn new(id: String, asset: Asset, position: Position) -> Self {
		Self {
			id,
			kind: default_node_type(),
			position,
			data: asset,
		}
	}
}

/// Path shape used when drawing a connection.
#[derive(
	Clone,
	Copy,
	Debug,
	Default,
	PartialEq,
	Eq,
	Hash,
	Serialize,
	Deserialize,
	Display,
	EnumString,
	EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EdgeStyle {
	#[default]
	#[serde(rename = "default")]
	#[strum(serialize = "default")]
	Bezier,
	Straight,
	Step,
}

impl EdgeStyle {
	pub fn label(self) -> &'static str {
		match self {
			EdgeStyle::Bezier => "Curved",
			EdgeStyle::Straight => "Straight",
			EdgeStyle::Step => "Step",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
	#[default]
	ArrowClosed,
	Arrow,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMarker {
	#[serde(rename = "type")]
	pub kind: MarkerKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStroke {
	pub stroke: String,
	pub stroke_width: f64,
}

impl Default for EdgeStroke {
	fn default() -> Self {
		Self {
			stroke: EDGE_STROKE.to_string(),
			stroke_width: EDGE_STROKE_WIDTH,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	#[serde(rename = "type", default)]
	pub kind: EdgeStyle,
	#[serde(default)]
	pub animated: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub marker_end: Option<EdgeMarker>,
	#[serde(rename = "style", default, skip_serializing_if = "Option::is_none")]
	pub stroke: Option<EdgeStroke>,
}

impl GraphEdge {
	/// A fresh connection with the editor's default presentation.
	pub fn new(id: String, source: String, target: String, kind: EdgeStyle) -> Self {
		Self {
			id,
			source,
			target,
			kind,
			animated: true,
			marker_end: Some(EdgeMarker::default()),
			stroke: Some(EdgeStroke::default()),
		}
	}

	/// Copies this edge's presentation onto a new pair of endpoints.
	pub fn restyled(&self, id: String, source: String, target: String) -> Self {
		Self {
			id,
			source,
			target,
			..self.clone()
		}
	}

	pub fn touches(&self, node_id: &str) -> bool {
		self.source == node_id || self.target == node_id
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_icon_keys_fall_back_to_box() {
		assert_eq!(IconKind::from_key("Gauge"), IconKind::Gauge);
		assert_eq!(IconKind::from_key("Warehouse"), IconKind::Box);
		assert_eq!(IconKind::from_key(""), IconKind::Box);
	}

	#[test]
	fn asset_uses_drag_payload_field_names() {
		let json = r#"{"id":"weighbridge","name":"Weighbridge","type":"storage","group":"Storage & Tanks","icon":"Scale","zoneInOut":"In"}"#;
		let asset: Asset = serde_json::from_str(json).unwrap();
		assert_eq!(asset.kind, "storage");
		assert_eq!(asset.zone_in_out, Some(ZoneDirection::In));
		assert!(asset.tags.is_empty());

		let value = serde_json::to_value(&asset).unwrap();
		assert_eq!(value["type"], "storage");
		assert!(value.get("zone").is_none());
		assert!(value.get("tags").is_none());
	}

	#[test]
	fn edge_style_names_match_file_format() {
		assert_eq!(serde_json::to_value(EdgeStyle::Bezier).unwrap(), "default");
		assert_eq!(serde_json::to_value(EdgeStyle::Step).unwrap(), "step");
		assert_eq!("straight".parse::<EdgeStyle>().unwrap(), EdgeStyle::Straight);
		assert_eq!(EdgeStyle::Bezier.to_string(), "default");
	}

	#[test]
	fn restyled_edge_keeps_presentation() {
		let mut edge = GraphEdge::new("e1".into(), "a".into(), "b".into(), EdgeStyle::Step);
		edge.animated = false;
		let copy = edge.restyled("e2".into(), "a".into(), "c".into());
		assert_eq!(copy.kind, EdgeStyle::Step);
		assert!(!copy.animated);
		assert_eq!(copy.marker_end, edge.marker_end);
		assert_eq!(copy.target, "c");
	}
}
