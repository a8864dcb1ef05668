//! View state of the relationship canvas.
//!
//! `NetworkView` owns the current dataset and display parameters and derives
//! a `Scene` from them. `update` rebuilds the scene from scratch, so calling
//! it twice in a row yields the same picture.

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::api::types::RelationshipData;
use crate::dendrogram::build_dendrogram;
use crate::layout::{ClusterLayout, Cooling, LogScale, Point, Simulation, springs_for};

use crate::components::theme::NetworkStyle;

/// Alpha target held while a node is being dragged.
const DRAG_ALPHA_TARGET: f64 = 0.3;

/// How the relationship data is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisMode {
	/// Force-directed graph, link length by E-value.
	#[default]
	Network,
	/// Nodes on a ring, links as arcs.
	Chord,
	/// Circular single-linkage dendrogram.
	Tree,
}

impl VisMode {
	/// Modes in radio order.
	pub const ALL: [VisMode; 3] = [VisMode::Network, VisMode::Chord, VisMode::Tree];

	/// Value of the mode's radio input.
	pub fn as_str(self) -> &'static str {
		match self {
			VisMode::Network => "network",
			VisMode::Chord => "chord",
			VisMode::Tree => "tree",
		}
	}

	/// Text next to the mode's radio input.
	pub fn label(self) -> &'static str {
		match self {
			VisMode::Network => "Network",
			VisMode::Chord => "Chord",
			VisMode::Tree => "Tree",
		}
	}

	/// Mode for a radio value.
	pub fn parse(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|m| m.as_str() == value)
	}
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
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

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<usize>,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// A link between two scene node indices.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
	pub source: usize,
	pub target: usize,
	pub value: f64,
}

/// Nodes driven by a force simulation (network mode) or anchored on a ring
/// (chord mode).
pub struct GraphScene {
	/// Node positions.
	pub simulation: Simulation,
	/// Display name per node.
	pub labels: Vec<String>,
	/// Links drawn between nodes.
	pub edges: Vec<SceneEdge>,
}

impl GraphScene {
	pub fn position(&self, index: usize) -> Option<Point> {
		self.simulation.position(index)
	}
}

/// What the canvas currently draws.
pub enum Scene {
	Empty,
	Graph(GraphScene),
	Tree(ClusterLayout),
}

/// The relationship view: dataset, display parameters and derived scene.
pub struct NetworkView {
	pub width: f64,
	pub height: f64,
	pub style: NetworkStyle,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hovered: Option<usize>,
	mode: VisMode,
	threshold: Option<f64>,
	data: Option<RelationshipData>,
	scene: Scene,
}

impl NetworkView {
	/// An empty view for a `width` x `height` canvas.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			style: NetworkStyle::default(),
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			mode: VisMode::default(),
			threshold: None,
			data: None,
			scene: Scene::Empty,
		}
	}

	/// Current display mode.
	pub fn mode(&self) -> VisMode {
		self.mode
	}

	pub fn threshold(&self) -> Option<f64> {
		self.threshold
	}

	/// Scene built by the last `update`.
	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	/// Canvas size changed. Call `update` to lay the scene out again.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Replace the dataset; call `update` to redraw.
	pub fn set_data(&mut self, data: Option<RelationshipData>) {
		self.data = data;
	}

	/// Switch mode and drop the current scene; call `update` to redraw.
	pub fn set_mode(&mut self, mode: VisMode) {
		self.mode = mode;
		self.scene = Scene::Empty;
	}

	/// Only links with `value < threshold` are shown; `None` shows all.
	pub fn set_threshold(&mut self, threshold: Option<f64>) {
		self.threshold = threshold;
	}

	/// Rebuild the scene from the current dataset, mode and threshold.
	pub fn update(&mut self) {
		self.drag = DragState::default();
		self.hovered = None;
		self.transform = ViewTransform {
			x: self.width / 2.0,
			y: self.height / 2.0,
			k: 1.0,
		};

		self.scene = match &self.data {
			None => Scene::Empty,
			Some(data) => match self.mode {
				VisMode::Network => {
					Scene::Graph(force_scene(data, self.threshold, self.width, self.height))
				}
				VisMode::Chord => {
					Scene::Graph(chord_scene(data, self.threshold, self.width, self.height))
				}
				VisMode::Tree => Scene::Tree(tree_scene(data, self.width, self.height)),
			},
		};
	}

	/// Advance the layout by one animation frame.
	pub fn tick(&mut self) {
		if let Scene::Graph(graph) = &mut self.scene {
			graph.simulation.step();
		}
	}

	/// Canvas pixel to layout coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the screen position, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let Scene::Graph(graph) = &self.scene else {
			return None;
		};
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let hit = Point::new(gx, gy);
		graph
			.simulation
			.nodes()
			.iter()
			.enumerate()
			.rev()
			.find(|(_, p)| p.distance(hit) <= self.style.node_radius)
			.map(|(i, _)| i)
	}

	/// Pin `index` under the pointer and keep the simulation warm.
	/// Only the force-directed mode is draggable.
	pub fn begin_drag(&mut self, index: usize) -> bool {
		if self.mode != VisMode::Network {
			return false;
		}
		let Scene::Graph(graph) = &mut self.scene else {
			return false;
		};
		let Some(p) = graph.position(index) else {
			return false;
		};
		graph.simulation.set_alpha_target(DRAG_ALPHA_TARGET);
		graph.simulation.restart();
		graph.simulation.pin(index, p.x, p.y);
		self.drag = DragState {
			active: true,
			node: Some(index),
		};
		true
	}

	/// Move the dragged node under the pointer.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		if let (Some(index), Scene::Graph(graph)) = (self.drag.node, &mut self.scene) {
			graph.simulation.pin(index, gx, gy);
		}
	}

	/// Release the dragged node and let the layout cool.
	pub fn end_drag(&mut self) {
		if let (Some(index), Scene::Graph(graph)) = (self.drag.node, &mut self.scene) {
			graph.simulation.set_alpha_target(0.0);
			graph.simulation.unpin(index);
		}
		self.drag = DragState::default();
	}
}

/// Links passing the threshold whose endpoints are both known, as indices.
pub fn visible_edges(data: &RelationshipData, threshold: Option<f64>) -> Vec<SceneEdge> {
	let index: HashMap<&str, usize> = data
		.nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.accession.as_str(), i))
		.collect();

	data.links
		.iter()
		.filter(|link| threshold.is_none_or(|t| link.value < t))
		.filter_map(|link| {
			Some(SceneEdge {
				source: *index.get(link.source.as_str())?,
				target: *index.get(link.target.as_str())?,
				value: link.value,
			})
		})
		.collect()
}

fn labels(data: &RelationshipData) -> Vec<String> {
	data.nodes
		.iter()
		.map(|n| n.display_name().to_string())
		.collect()
}

/// Links are springs; the lower the E-value, the shorter the log-scaled rest
/// distance and the more parallel springs pull the pair together. The view
/// transform puts the origin at the canvas centre.
fn force_scene(
	data: &RelationshipData,
	threshold: Option<f64>,
	width: f64,
	height: f64,
) -> GraphScene {
	let edges = visible_edges(data, threshold);
	let (near, far) = (50.0, width.min(height) / 2.0);
	let scale = LogScale::from_values(edges.iter().map(|e| e.value), (near, far));

	let springs: Vec<(usize, usize, usize)> = edges
		.iter()
		.map(|e| {
			let distance = scale.map_or(near, |s| s.apply(e.value));
			(e.source, e.target, springs_for(distance, near, far))
		})
		.collect();

	GraphScene {
		simulation: Simulation::new(data.nodes.len(), Cooling::default()).with_links(springs),
		labels: labels(data),
		edges,
	}
}

/// Evenly spaced points on a circle of `radius`, starting at the top.
pub fn ring_positions(count: usize, radius: f64) -> Vec<Point> {
	(0..count)
		.map(|i| {
			let angle = i as f64 * 2.0 * PI / count as f64 - PI / 2.0;
			Point::new(radius * angle.cos(), radius * angle.sin())
		})
		.collect()
}

fn chord_scene(
	data: &RelationshipData,
	threshold: Option<f64>,
	width: f64,
	height: f64,
) -> GraphScene {
	let radius = width.min(height) / 3.0;
	GraphScene {
		simulation: Simulation::fixed(ring_positions(data.nodes.len(), radius)),
		labels: labels(data),
		edges: visible_edges(data, threshold),
	}
}

/// The dendrogram always uses every link; the threshold only filters drawing
/// in the graph modes.
fn tree_scene(data: &RelationshipData, width: f64, height: f64) -> ClusterLayout {
	let outer_radius = width.min(height) / 2.0;
	let inner_radius = (outer_radius - 100.0).max(0.0);
	ClusterLayout::new(&build_dendrogram(&data.nodes, &data.links), inner_radius)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::types::{Edge, Node};
	use crate::layout::simulation::MAX_SPRINGS;

	fn sample() -> RelationshipData {
		RelationshipData {
			nodes: vec![
				Node::new("PF00001", Some("7tm_1")),
				Node::new("PF00002", None),
				Node::new("PF00003", None),
			],
			links: vec![
				Edge::new("PF00001", "PF00002", 1e-30),
				Edge::new("PF00002", "PF00003", 1e-3),
				Edge::new("PF00001", "PF09999", 1e-40),
			],
		}
	}

	fn view(mode: VisMode) -> NetworkView {
		let mut view = NetworkView::new(800.0, 480.0);
		view.set_data(Some(sample()));
		view.set_mode(mode);
		view.update();
		view
	}

	fn positions(view: &NetworkView) -> Vec<(f64, f64)> {
		match view.scene() {
			Scene::Graph(g) => g.simulation.nodes().iter().map(|p| (p.x, p.y)).collect(),
			_ => panic!("expected a graph scene"),
		}
	}

	#[test]
	fn mode_names_round_trip_through_radio_values() {
		for mode in VisMode::ALL {
			assert_eq!(VisMode::parse(mode.as_str()), Some(mode));
		}
		assert_eq!(VisMode::parse("sankey"), None);
	}

	#[test]
	fn threshold_is_strict_and_unknown_nodes_are_dropped() {
		let data = sample();
		assert_eq!(visible_edges(&data, None).len(), 2);
		let strict = visible_edges(&data, Some(1e-3));
		assert_eq!(strict.len(), 1);
		assert_eq!((strict[0].source, strict[0].target), (0, 1));
	}

	#[test]
	fn update_is_idempotent() {
		let mut view = view(VisMode::Network);
		let first = positions(&view);
		view.update();
		assert_eq!(positions(&view), first);
	}

	#[test]
	fn network_layout_cools_down_centred_on_canvas() {
		let mut view = view(VisMode::Network);
		assert_eq!((view.transform.x, view.transform.y), (400.0, 240.0));
		for _ in 0..400 {
			view.tick();
		}
		let Scene::Graph(graph) = view.scene() else {
			panic!("expected a graph scene");
		};
		assert!(!graph.simulation.is_running());
		assert_eq!(graph.labels[0], "7tm_1");
		assert_eq!(graph.labels[1], "PF00002");
	}

	#[test]
	fn stronger_link_gets_more_springs() {
		let view = view(VisMode::Network);
		let Scene::Graph(graph) = view.scene() else {
			panic!("expected a graph scene");
		};
		// 1e-30 maps to the near end of the scale, 1e-3 to the far end.
		assert_eq!(graph.simulation.spring_count(), MAX_SPRINGS + 1);
	}

	#[test]
	fn chord_nodes_sit_on_a_ring() {
		let view = view(VisMode::Chord);
		let radius = 480.0 / 3.0;
		for (x, y) in positions(&view) {
			assert!(((x * x + y * y).sqrt() - radius).abs() < 1e-9);
		}
		assert!((positions(&view)[0].1 + radius).abs() < 1e-9);
	}

	#[test]
	fn resize_recentres_on_next_update() {
		let mut view = view(VisMode::Chord);
		view.resize(1000.0, 600.0);
		view.update();
		assert_eq!((view.transform.x, view.transform.y), (500.0, 300.0));
		let (x, y) = positions(&view)[0];
		assert!(x.abs() < 1e-9);
		assert!((y + 200.0).abs() < 1e-9);
	}

	#[test]
	fn chord_mode_is_centred_and_keeps_filtered_edges() {
		let mut view = NetworkView::new(800.0, 480.0);
		view.set_data(Some(sample()));
		view.set_threshold(Some(1e-10));
		view.set_mode(VisMode::Chord);
		view.update();
		assert_eq!(view.transform.x, 400.0);
		let Scene::Graph(graph) = view.scene() else {
			panic!("expected a graph scene");
		};
		assert_eq!(graph.edges.len(), 1);
	}

	#[test]
	fn tree_mode_ignores_threshold() {
		let mut view = NetworkView::new(800.0, 480.0);
		view.set_data(Some(sample()));
		view.set_threshold(Some(1e-35));
		view.set_mode(VisMode::Tree);
		view.update();
		let Scene::Tree(layout) = view.scene() else {
			panic!("expected a tree scene");
		};
		assert_eq!(layout.nodes.iter().filter(|n| n.is_leaf()).count(), 3);
		assert_eq!(layout.inner_radius, 140.0);
		// The unknown-endpoint link sorts first and keeps index 0.
		assert_eq!(layout.nodes[0].name, "2");
	}

	#[test]
	fn set_mode_clears_scene_until_update() {
		let mut view = view(VisMode::Network);
		view.set_mode(VisMode::Chord);
		assert!(matches!(view.scene(), Scene::Empty));
	}

	#[test]
	fn no_data_means_empty_scene() {
		let mut view = NetworkView::new(800.0, 480.0);
		view.update();
		assert!(matches!(view.scene(), Scene::Empty));
		assert_eq!(view.node_at_position(400.0, 240.0), None);
	}

	#[test]
	fn hit_test_finds_node_under_pointer() {
		let view = view(VisMode::Network);
		let (x, y) = positions(&view)[2];
		let (sx, sy) = (x + view.transform.x, y + view.transform.y);
		assert_eq!(view.node_at_position(sx + 3.0, sy - 3.0), Some(2));
	}

	#[test]
	fn dragging_pins_node_to_pointer() {
		let mut view = view(VisMode::Network);
		assert!(view.begin_drag(1));
		view.drag_to(523.0, 145.0);
		view.tick();
		assert_eq!(positions(&view)[1], (123.0, -95.0));
		view.end_drag();
		assert!(!view.drag.active);
		let Scene::Graph(graph) = view.scene() else {
			panic!("expected a graph scene");
		};
		assert!(!graph.simulation.is_pinned(1));
	}

	#[test]
	fn chord_nodes_are_not_draggable() {
		let mut view = view(VisMode::Chord);
		assert!(!view.begin_drag(0));
	}
}
