//! Force layout on top of `force_graph`, run for a bounded number of ticks.
//!
//! `force_graph` supplies the physics: pairwise charge, springs along edges
//! and anchored nodes that the solver leaves in place. Its springs all share
//! one stiffness, so a short rest distance is expressed as several parallel
//! springs between the same pair.
//!
//! Ticks follow a cooling schedule: `alpha` decays geometrically towards
//! `alpha_target` and scales the time step, and the simulation stops once
//! `alpha` falls below `alpha_min` (about 300 ticks from a cold start).
//! Dragging a node raises `alpha_target` so the layout keeps responding
//! until release.

use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::Point;

/// Seconds of physics per animation frame at full heat.
const FRAME_DT: f32 = 0.016;

/// Most parallel springs between one pair of nodes.
pub const MAX_SPRINGS: usize = 4;

/// Tunables of the cooling schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cooling {
	/// Starting heat.
	pub alpha: f64,
	/// Heat below which ticking stops.
	pub alpha_min: f64,
	/// Fraction of the gap to `alpha_target` closed each tick.
	pub alpha_decay: f64,
}

impl Default for Cooling {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			alpha: 1.0,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
		}
	}
}

fn parameters() -> SimulationParameters {
	SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

/// Parallel springs for a link of rest `distance` on a `near..=far` scale:
/// `MAX_SPRINGS` at `near`, one at `far`.
pub fn springs_for(distance: f64, near: f64, far: f64) -> usize {
	if far <= near || !distance.is_finite() {
		return 1;
	}
	let closeness = ((far - distance) / (far - near)).clamp(0.0, 1.0);
	1 + (closeness * (MAX_SPRINGS - 1) as f64).round() as usize
}

/// Node positions driven by `force_graph` under a cooling schedule.
pub struct Simulation {
	graph: ForceGraph<usize, ()>,
	indices: Vec<DefaultNodeIdx>,
	positions: Vec<Point>,
	pinned: Vec<bool>,
	springs: usize,
	alpha: f64,
	alpha_min: f64,
	alpha_decay: f64,
	alpha_target: f64,
	running: bool,
}

impl Simulation {
	fn from_points(points: Vec<Point>, anchored: bool, cooling: Cooling) -> Self {
		let mut graph = ForceGraph::new(parameters());
		let indices = points
			.iter()
			.enumerate()
			.map(|(i, p)| {
				graph.add_node(NodeData {
					x: p.x as f32,
					y: p.y as f32,
					mass: 10.0,
					is_anchor: anchored,
					user_data: i,
				})
			})
			.collect();

		Self {
			graph,
			indices,
			pinned: vec![anchored; points.len()],
			positions: points,
			springs: 0,
			alpha: cooling.alpha,
			alpha_min: cooling.alpha_min,
			alpha_decay: cooling.alpha_decay,
			alpha_target: 0.0,
			running: !anchored,
		}
	}

	/// `count` free nodes seeded on a phyllotaxis spiral around the origin.
	pub fn new(count: usize, cooling: Cooling) -> Self {
		let initial_angle = PI * (3.0 - 5.0_f64.sqrt());
		let points = (0..count)
			.map(|i| {
				let radius = 10.0 * (0.5 + i as f64).sqrt();
				let angle = i as f64 * initial_angle;
				Point::new(radius * angle.cos(), radius * angle.sin())
			})
			.collect();
		Self::from_points(points, false, cooling)
	}

	/// Nodes anchored at `points`. Nothing moves until a node is unpinned.
	pub fn fixed(points: Vec<Point>) -> Self {
		Self::from_points(points, true, Cooling::default())
	}

	/// Attach links `(source, target, springs)`. Out-of-range indices are
	/// dropped; `springs` is clamped to `1..=MAX_SPRINGS`.
	pub fn with_links(mut self, links: impl IntoIterator<Item = (usize, usize, usize)>) -> Self {
		for (source, target, springs) in links {
			let (Some(&s), Some(&t)) = (self.indices.get(source), self.indices.get(target)) else {
				continue;
			};
			for _ in 0..springs.clamp(1, MAX_SPRINGS) {
				self.graph.add_edge(s, t, EdgeData::default());
				self.springs += 1;
			}
		}
		self
	}

	/// Node positions, by input index.
	pub fn nodes(&self) -> &[Point] {
		&self.positions
	}

	/// Position of one node.
	pub fn position(&self, index: usize) -> Option<Point> {
		self.positions.get(index).copied()
	}

	/// Springs attached, parallel ones counted separately.
	pub fn spring_count(&self) -> usize {
		self.springs
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Whether `step` still moves anything.
	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn is_pinned(&self, index: usize) -> bool {
		self.pinned.get(index).copied().unwrap_or(false)
	}

	/// Resume ticking (after a drag starts, for instance).
	pub fn restart(&mut self) {
		self.running = true;
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Anchor `index` at `(x, y)`.
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		self.set_anchor(index, Some(Point::new(x, y)));
	}

	pub fn unpin(&mut self, index: usize) {
		self.set_anchor(index, None);
	}

	fn set_anchor(&mut self, index: usize, at: Option<Point>) {
		let Some(&idx) = self.indices.get(index) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				if let Some(p) = at {
					node.data.x = p.x as f32;
					node.data.y = p.y as f32;
				}
				node.data.is_anchor = at.is_some();
			}
		});
		self.pinned[index] = at.is_some();
		if let Some(p) = at {
			self.positions[index] = p;
		}
	}

	/// Advance one tick if the simulation has not cooled down.
	pub fn step(&mut self) {
		if !self.running {
			return;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		self.graph.update(FRAME_DT * self.alpha as f32);
		self.sync_positions();
		if self.alpha < self.alpha_min {
			self.running = false;
		}
	}

	/// Step until cooled, bounded by `max_ticks`. Returns ticks taken.
	#[cfg(test)]
	pub fn run(&mut self, max_ticks: usize) -> usize {
		let mut ticks = 0;
		while self.running && ticks < max_ticks {
			self.step();
			ticks += 1;
		}
		ticks
	}

	fn sync_positions(&mut self) {
		let positions = &mut self.positions;
		self.graph.visit_nodes(|node| {
			if let Some(p) = positions.get_mut(node.data.user_data) {
				*p = Point::new(node.x() as f64, node.y() as f64);
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cools_down_in_about_three_hundred_ticks() {
		let mut sim = Simulation::new(3, Cooling::default());
		let ticks = sim.run(10_000);
		assert!((299..=302).contains(&ticks), "took {ticks} ticks");
		assert!(!sim.is_running());
		assert!(sim.alpha() < 0.001);
	}

	#[test]
	fn settled_simulation_does_not_move() {
		let mut sim = Simulation::new(2, Cooling::default());
		sim.run(1_000);
		let before = sim.nodes().to_vec();
		sim.step();
		assert_eq!(sim.nodes(), before.as_slice());
	}

	#[test]
	fn seeds_follow_the_spiral() {
		let sim = Simulation::new(2, Cooling::default());
		let first = sim.nodes()[0];
		assert!((first.x - 10.0 * 0.5_f64.sqrt()).abs() < 1e-9);
		assert_eq!(first.y, 0.0);
	}

	#[test]
	fn charge_pushes_unlinked_nodes_apart() {
		let mut sim = Simulation::new(2, Cooling::default());
		let start = sim.nodes()[0].distance(sim.nodes()[1]);
		sim.run(50);
		assert!(sim.nodes()[0].distance(sim.nodes()[1]) > start);
	}

	#[test]
	fn closer_links_get_more_springs() {
		assert_eq!(springs_for(50.0, 50.0, 240.0), MAX_SPRINGS);
		assert_eq!(springs_for(240.0, 50.0, 240.0), 1);
		assert_eq!(springs_for(145.0, 50.0, 240.0), 3);
		assert_eq!(springs_for(80.0, 50.0, 50.0), 1);
	}

	#[test]
	fn links_to_missing_nodes_are_dropped() {
		let sim = Simulation::new(2, Cooling::default()).with_links([(0, 1, 2), (0, 7, 1)]);
		assert_eq!(sim.spring_count(), 2);
	}

	#[test]
	fn fixed_nodes_stay_put() {
		let points = vec![Point::new(10.0, 0.0), Point::new(-10.0, 0.0)];
		let mut sim = Simulation::fixed(points.clone());
		assert!(!sim.is_running());
		sim.step();
		assert_eq!(sim.nodes(), points.as_slice());
	}

	#[test]
	fn pinned_node_holds_position_until_released() {
		let mut sim = Simulation::new(3, Cooling::default());
		sim.pin(1, 42.0, -7.0);
		sim.step();
		assert_eq!(sim.position(1), Some(Point::new(42.0, -7.0)));
		assert!(sim.is_pinned(1));
		sim.unpin(1);
		assert!(!sim.is_pinned(1));
	}

	#[test]
	fn alpha_target_keeps_simulation_warm() {
		let mut sim = Simulation::new(2, Cooling::default());
		sim.run(1_000);
		sim.set_alpha_target(0.3);
		sim.restart();
		for _ in 0..500 {
			sim.step();
		}
		assert!(sim.is_running());
		assert!((sim.alpha() - 0.3).abs() < 0.01);
	}
}
