//! Dataset loading.

use std::collections::HashSet;

use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::graph::model::{GraphData, Link, Node};

#[derive(Debug, Error)]
pub enum DataError {
	#[error("Failed to fetch data: {0}")]
	Network(String),
	#[error("Failed to fetch data (HTTP {0})")]
	Status(u16),
	#[error("Malformed dataset: {0}")]
	Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct RawGraph {
	#[serde(default)]
	nodes: Vec<Value>,
	#[serde(default)]
	links: Vec<Value>,
}

/// Decodes a `{ nodes, links }` document.
///
/// Only a document that is not an object at all is an error. Individual
/// records that fail to decode are dropped, as are links whose endpoints
/// name no known node.
pub fn parse_graph_data(text: &str) -> Result<GraphData, DataError> {
	let raw: RawGraph = serde_json::from_str(text)?;

	let nodes: Vec<Node> = raw
		.nodes
		.into_iter()
		.enumerate()
		.filter_map(|(i, value)| match serde_json::from_value(value) {
			Ok(node) => Some(node),
			Err(err) => {
				warn!("dropping node #{i}: {err}");
				None
			}
		})
		.collect();

	let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	if ids.len() != nodes.len() {
		warn!("{} duplicate node ids; later records win", nodes.len() - ids.len());
	}

	let links: Vec<Link> = raw
		.links
		.into_iter()
		.enumerate()
		.filter_map(|(i, value)| match serde_json::from_value::<Link>(value) {
			Ok(link) if ids.contains(link.source.as_str()) && ids.contains(link.target.as_str()) => {
				Some(link)
			}
			Ok(link) => {
				warn!("dropping link #{i}: {} -> {} is dangling", link.source, link.target);
				None
			}
			Err(err) => {
				warn!("dropping link #{i}: {err}");
				None
			}
		})
		.collect();

	info!("dataset loaded: {} nodes, {} links", nodes.len(), links.len());
	Ok(GraphData { nodes, links })
}

fn js_error(value: JsValue) -> DataError {
	let message = match value.dyn_ref::<js_sys::Error>() {
		Some(err) => String::from(err.message()),
		None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
	};
	DataError::Network(message)
}

/// Fetches and decodes the dataset at `url`.
pub async fn fetch_graph_data(url: &str) -> Result<GraphData, DataError> {
	let window = web_sys::window().ok_or_else(|| DataError::Network("no window".into()))?;
	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(js_error)?;
	let response: Response = response.dyn_into().map_err(js_error)?;
	if !response.ok() {
		return Err(DataError::Status(response.status()));
	}
	let body = JsFuture::from(response.text().map_err(js_error)?)
		.await
		.map_err(js_error)?;
	let text = body
		.as_string()
		.ok_or_else(|| DataError::Network("response body is not text".into()))?;
	parse_graph_data(&text)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::NodeKind;

	#[test]
	fn bad_records_are_dropped_not_fatal() {
		let data = parse_graph_data(
			r#"{
				"nodes": [
					{"id": "a", "type": "People", "name": "Ada"},
					{"id": "b", "type": "Robots", "name": "R2"},
					{"id": "c", "type": "Projects"},
					{"id": "d", "type": "Projects", "name": "Delta"}
				],
				"links": [
					{"source": "a", "target": "d", "relationship": "leads", "strength": 4},
					{"source": "a", "target": "b"},
					{"target": "d"}
				]
			}"#,
		)
		.unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[1].kind(), NodeKind::Projects);
		assert_eq!(data.links.len(), 1);
		assert_eq!(data.links[0].line_width(), 4.0);
	}

	#[test]
	fn empty_document_is_an_empty_graph() {
		assert_eq!(parse_graph_data("{}").unwrap(), GraphData::default());
	}

	#[test]
	fn non_object_is_a_decode_error() {
		assert!(matches!(parse_graph_data("42"), Err(DataError::Decode(_))));
	}

	#[test]
	fn status_error_reads_like_the_ui_message() {
		assert_eq!(
			DataError::Status(404).to_string(),
			"Failed to fetch data (HTTP 404)"
		);
	}
}
