//! Saved-configuration file format.
//!
//! A document is a JSON object with `nodes`, `edges` and an ISO-8601
//! `timestamp`. Node and edge records use the same field names as the
//! drag payload (`type`, `position`, `data`, `markerEnd`, `style`), so files
//! written by earlier versions of the editor load unchanged.

use serde::{Deserialize, Serialize};

use super::error::GraphError;
use super::types::{GraphEdge, GraphNode};

#[derive(Serialize)]
struct DocumentRef<'a> {
	nodes: &'a [GraphNode],
	edges: &'a [GraphEdge],
	timestamp: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphDocument {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
	#[serde(default)]
	pub timestamp: Option<String>,
}

pub fn encode(
	nodes: &[GraphNode],
	edges: &[GraphEdge],
	timestamp: &str,
) -> Result<String, GraphError> {
	serde_json::to_string_pretty(&DocumentRef {
		nodes,
		edges,
		timestamp,
	})
	.map_err(GraphError::Serialize)
}

pub fn decode(text: &str) -> Result<GraphDocument, GraphError> {
	let value: serde_json::Value = serde_json::from_str(text).map_err(GraphError::ParseFailure)?;
	let Some(fields) = value.as_object() else {
		return Err(GraphError::InvalidFormat("expected a JSON object".into()));
	};
	if !fields.contains_key("nodes") || !fields.contains_key("edges") {
		return Err(GraphError::InvalidFormat(
			"missing \"nodes\" or \"edges\"".into(),
		));
	}
	serde_json::from_value(value).map_err(|e| GraphError::InvalidFormat(e.to_string()))
}

pub fn file_name(millis: u64) -> String {
	format!("factory-config-{millis}.json")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_documents_without_graph_fields() {
		assert!(matches!(
			decode(r#"{"foo": 1}"#),
			Err(GraphError::InvalidFormat(_))
		));
		assert!(matches!(
			decode(r#"{"nodes": []}"#),
			Err(GraphError::InvalidFormat(_))
		));
		assert!(matches!(decode("[1, 2]"), Err(GraphError::InvalidFormat(_))));
		assert!(matches!(
			decode(r#"{"nodes": null, "edges": []}"#),
			Err(GraphError::InvalidFormat(_))
		));
	}

	#[test]
	fn rejects_text_that_is_not_json() {
		assert!(matches!(decode("nodes: []"), Err(GraphError::ParseFailure(_))));
	}

	#[test]
	fn reads_files_with_extra_fields() {
		let text = r#"{
			"nodes": [{
				"id": "weighbridge-1",
				"type": "custom",
				"position": {"x": 10, "y": 20},
				"data": {"id": "weighbridge", "name": "Weighbridge", "type": "storage",
					"group": "Storage & Tanks", "icon": "Scale"},
				"measured": {"width": 200, "height": 70}
			}],
			"edges": [{
				"id": "xy-edge__a-b",
				"source": "a",
				"target": "b",
				"sourceHandle": null
			}],
			"timestamp": "2025-01-01T00:00:00.000Z"
		}"#;
		let document = decode(text).unwrap();
		assert_eq!(document.nodes[0].position.x, 10.0);
		assert_eq!(document.edges[0].kind, Default::default());
		assert!(!document.edges[0].animated);
		assert_eq!(document.timestamp.as_deref(), Some("2025-01-01T00:00:00.000Z"));
	}

	#[test]
	fn file_name_carries_the_instant() {
		assert_eq!(file_name(42), "factory-config-42.json");
	}
}
