//! Circular dendrogram layout.
//!
//! Leaves are spread evenly around the circle in left-to-right order, all at
//! the same (outer) radius. A parent sits at the mean angle of its children,
//! one level further in than its tallest child, so the root ends up at the
//! centre.

use crate::dendrogram::HierarchyNode;

/// A positioned dendrogram node. `angle` is in degrees, `[0, 360)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterNode {
	pub name: String,
	pub angle: f64,
	pub radius: f64,
	pub parent: Option<usize>,
	pub children: Vec<usize>,
}

impl ClusterNode {
	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}
}

/// Parent-to-child link drawn as an arc at the parent's radius followed by a
/// radial segment out to the child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterLink {
	pub start_angle: f64,
	pub start_radius: f64,
	pub end_angle: f64,
	pub end_radius: f64,
}

impl ClusterLink {
	pub fn to_path(&self) -> String {
		let (a0, a1) = (
			(self.start_angle - 90.0).to_radians(),
			(self.end_angle - 90.0).to_radians(),
		);
		let (r0, r1) = (self.start_radius, self.end_radius);
		let (c0, s0, c1, s1) = (a0.cos(), a0.sin(), a1.cos(), a1.sin());

		let mut path = format!("M{},{}", r0 * c0, r0 * s0);
		if a1 != a0 {
			path.push_str(&format!(
				"A{},{} 0 0 {} {},{}",
				r0,
				r0,
				u8::from(a1 > a0),
				r0 * c1,
				r0 * s1
			));
		}
		path.push_str(&format!("L{},{}", r1 * c1, r1 * s1));
		path
	}
}

/// Placement of a leaf label: rotate, push out to the ring, flip on the left.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafLabel {
	pub text: String,
	pub rotation: f64,
	pub offset: f64,
	pub flipped: bool,
}

/// Circular dendrogram: every node at an angle and a radius.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterLayout {
	/// Nodes in pre-order; index 0 is the root when non-empty.
	pub nodes: Vec<ClusterNode>,
	pub inner_radius: f64,
}

impl ClusterLayout {
	/// Lay `root` out with leaves on a circle of `inner_radius`.
	pub fn new(root: &HierarchyNode, inner_radius: f64) -> Self {
		let mut nodes = flatten(root);
		if nodes.is_empty() {
			return Self {
				nodes,
				inner_radius,
			};
		}

		// Unnormalised x: leaf rank or mean child x. y: height above leaves.
		let mut x = vec![0.0; nodes.len()];
		let mut y = vec![0.0; nodes.len()];

		let mut rank = 0.0;
		for (i, node) in nodes.iter().enumerate() {
			if node.is_leaf() {
				x[i] = rank;
				rank += 1.0;
			}
		}
		// Children always follow their parent in pre-order.
		for i in (0..nodes.len()).rev() {
			let children = &nodes[i].children;
			if children.is_empty() {
				continue;
			}
			x[i] = children.iter().map(|&c| x[c]).sum::<f64>() / children.len() as f64;
			y[i] = 1.0 + children.iter().map(|&c| y[c]).fold(0.0, f64::max);
		}

		let leaf_count = rank;
		let (x0, x1) = (-0.5, leaf_count - 0.5);
		let root_height = y[0];
		for (i, node) in nodes.iter_mut().enumerate() {
			node.angle = (x[i] - x0) * 360.0 / (x1 - x0);
			let depth = if root_height > 0.0 {
				y[i] / root_height
			} else {
				1.0
			};
			node.radius = (1.0 - depth) * inner_radius;
		}

		Self {
			nodes,
			inner_radius,
		}
	}

	/// One link per parent and child pair.
	pub fn links(&self) -> Vec<ClusterLink> {
		self.nodes
			.iter()
			.filter_map(|child| {
				let parent = &self.nodes[child.parent?];
				Some(ClusterLink {
					start_angle: parent.angle,
					start_radius: parent.radius,
					end_angle: child.angle,
					end_radius: child.radius,
				})
			})
			.collect()
	}

	/// Label placement for every leaf.
	pub fn leaf_labels(&self) -> Vec<LeafLabel> {
		self.nodes
			.iter()
			.filter(|n| n.is_leaf())
			.map(|n| LeafLabel {
				text: n.name.clone(),
				rotation: n.angle - 90.0,
				offset: self.inner_radius,
				flipped: n.angle >= 180.0,
			})
			.collect()
	}
}

fn flatten(root: &HierarchyNode) -> Vec<ClusterNode> {
	let mut nodes: Vec<ClusterNode> = Vec::new();
	let mut stack: Vec<(&HierarchyNode, Option<usize>)> = vec![(root, None)];

	while let Some((node, parent)) = stack.pop() {
		let index = nodes.len();
		nodes.push(ClusterNode {
			name: node.name().to_string(),
			angle: 0.0,
			radius: 0.0,
			parent,
			children: Vec::new(),
		});
		if let Some(p) = parent {
			nodes[p].children.push(index);
		}
		for child in node.children().iter().rev() {
			stack.push((child, Some(index)));
		}
	}

	nodes
}
