//! Single-linkage dendrogram over a weighted relationship list.
//!
//! Edges are consumed in ascending weight order (stable for ties). Each edge
//! whose endpoints still live in different components merges the two
//! component roots under a new cluster whose id is the edge's position in the
//! sorted sequence. Components left unmerged at the end hang off a synthetic
//! `"root"` node: surviving merge clusters first, in creation order, then
//! unmerged leaves in input order.
//!
//! Root lookup walks the parent chain on every call, without path
//! compression. Merge ids and the resulting shape are observable output, so
//! the walk is kept exactly as is.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::api::types::{Edge, Node};

/// Name of the synthetic node joining disconnected components.
pub const FOREST_ROOT_NAME: &str = "root";

/// Identity of a forest member. Leaves and merge clusters live in disjoint
/// namespaces, so an accession can never alias a merge index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClusterId {
	/// Original node, by position in the input node list.
	Leaf(usize),
	/// Merge cluster, by position of its edge in the weight-sorted sequence.
	Merge(usize),
}

/// A dendrogram node.
#[derive(Clone, Debug, PartialEq)]
pub enum HierarchyNode {
	/// An input node.
	Leaf {
		/// Display name: the node's name, or its accession.
		name: String,
		accession: String,
	},
	/// A merge of two clusters.
	Internal {
		/// Position of the merging edge in the weight-sorted sequence.
		id: usize,
		/// `id` as text.
		name: String,
		children: Box<[HierarchyNode; 2]>,
	},
	/// Synthetic root over components that never merged.
	Forest { children: Vec<HierarchyNode> },
}

impl HierarchyNode {
	/// Label drawn for the node; `"root"` for the synthetic forest root.
	pub fn name(&self) -> &str {
		match self {
			HierarchyNode::Leaf { name, .. } | HierarchyNode::Internal { name, .. } => name.as_str(),
			HierarchyNode::Forest { .. } => FOREST_ROOT_NAME,
		}
	}

	/// Direct children, empty for leaves.
	pub fn children(&self) -> &[HierarchyNode] {
		match self {
			HierarchyNode::Leaf { .. } => &[],
			HierarchyNode::Internal { children, .. } => children.as_slice(),
			HierarchyNode::Forest { children } => children,
		}
	}

	/// Whether this is an input node.
	pub fn is_leaf(&self) -> bool {
		matches!(self, HierarchyNode::Leaf { .. })
	}

	/// Leaves in left-to-right order.
	pub fn leaves(&self) -> Vec<&HierarchyNode> {
		let mut out = Vec::new();
		let mut stack = vec![self];
		while let Some(node) = stack.pop() {
			if node.is_leaf() {
				out.push(node);
			}
			stack.extend(node.children().iter().rev());
		}
		out
	}
}

/// One merge that actually happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Merge {
	/// Position of the merging edge in the weight-sorted edge sequence.
	pub id: usize,
	/// Root of the source endpoint's component before the merge.
	pub left: ClusterId,
	/// Root of the target endpoint's component before the merge.
	pub right: ClusterId,
	/// Weight of the merging edge.
	pub value: f64,
}

/// Result of clustering: the tree plus the merge log that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Dendrogram {
	/// The tree, or a forest root over disconnected components.
	pub root: HierarchyNode,
	/// Merges in the order they happened.
	pub merges: Vec<Merge>,
}

/// Parent links of every forest member, in discovery order.
#[derive(Default)]
struct Forest {
	parent: HashMap<ClusterId, Option<ClusterId>>,
	order: Vec<ClusterId>,
}

impl Forest {
	fn insert_root(&mut self, id: ClusterId) {
		self.parent.insert(id, None);
		self.order.push(id);
	}

	fn find_root(&self, mut id: ClusterId) -> ClusterId {
		while let Some(Some(parent)) = self.parent.get(&id) {
			id = *parent;
		}
		id
	}

	/// Surviving merges in creation order, then unmerged leaves in input
	/// order.
	fn roots(&self) -> impl Iterator<Item = ClusterId> + '_ {
		let merges = self
			.order
			.iter()
			.copied()
			.filter(|id| matches!(id, ClusterId::Merge(_)));
		let leaves = self
			.order
			.iter()
			.copied()
			.filter(|id| matches!(id, ClusterId::Leaf(_)));
		merges
			.chain(leaves)
			.filter(move |id| matches!(self.parent.get(id), Some(None)))
	}
}

/// Build the dendrogram tree for `nodes` from `edges`.
pub fn build_dendrogram(nodes: &[Node], edges: &[Edge]) -> HierarchyNode {
	cluster(nodes, edges).root
}

/// Cluster `nodes` by `edges`, returning the tree and the merge log.
///
/// Edges naming an accession missing from `nodes` are skipped, as are edges
/// whose endpoints already share a root. A duplicated accession keeps the
/// position of its first occurrence and the name of its last.
pub fn cluster(nodes: &[Node], edges: &[Edge]) -> Dendrogram {
	let mut sorted: Vec<&Edge> = edges.iter().collect();
	// Stable, and `-0.0` ties with `0.0`.
	sorted.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));

	let mut forest = Forest::default();
	let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
	let mut labels: HashMap<ClusterId, HierarchyNode> = HashMap::with_capacity(nodes.len());

	for (i, node) in nodes.iter().enumerate() {
		if let Some(&first) = index.get(node.accession.as_str()) {
			if let Some(HierarchyNode::Leaf { name, .. }) = labels.get_mut(&ClusterId::Leaf(first)) {
				*name = node.display_name().to_string();
			}
			continue;
		}
		index.insert(node.accession.as_str(), i);
		let id = ClusterId::Leaf(i);
		forest.insert_root(id);
		labels.insert(
			id,
			HierarchyNode::Leaf {
				name: node.display_name().to_string(),
				accession: node.accession.clone(),
			},
		);
	}

	let mut merges = Vec::new();
	for (i, edge) in sorted.iter().enumerate() {
		let (Some(&a), Some(&b)) = (
			index.get(edge.source.as_str()),
			index.get(edge.target.as_str()),
		) else {
			continue;
		};

		let left = forest.find_root(ClusterId::Leaf(a));
		let right = forest.find_root(ClusterId::Leaf(b));
		if left == right {
			continue;
		}

		let id = ClusterId::Merge(i);
		forest.parent.insert(left, Some(id));
		forest.parent.insert(right, Some(id));
		forest.insert_root(id);

		// Both roots carry a label: every root gets one on insertion and
		// loses it only when merged away here.
		if let (Some(l), Some(r)) = (labels.remove(&left), labels.remove(&right)) {
			labels.insert(
				id,
				HierarchyNode::Internal {
					id: i,
					name: i.to_string(),
					children: Box::new([l, r]),
				},
			);
		}
		merges.push(Merge {
			id: i,
			left,
			right,
			value: edge.value,
		});
	}

	let roots: Vec<ClusterId> = forest.roots().collect();
	let mut children: Vec<HierarchyNode> = roots
		.into_iter()
		.filter_map(|id| labels.remove(&id))
		.collect();

	let root = if children.len() == 1 {
		children.remove(0)
	} else {
		HierarchyNode::Forest { children }
	};

	Dendrogram { root, merges }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nodes(ids: &[&str]) -> Vec<Node> {
		ids.iter().map(|id| Node::new(*id, None)).collect()
	}

	fn leaf(name: &str) -> HierarchyNode {
		HierarchyNode::Leaf {
			name: name.to_string(),
			accession: name.to_string(),
		}
	}

	fn internal(id: usize, left: HierarchyNode, right: HierarchyNode) -> HierarchyNode {
		HierarchyNode::Internal {
			id,
			name: id.to_string(),
			children: Box::new([left, right]),
		}
	}

	fn leaf_names(tree: &HierarchyNode) -> Vec<String> {
		tree.leaves().iter().map(|n| n.name().to_string()).collect()
	}

	fn assert_internal_nodes_binary(tree: &HierarchyNode) {
		if let HierarchyNode::Internal { children, .. } = tree {
			assert_eq!(children.len(), 2);
		}
		for child in tree.children() {
			assert_internal_nodes_binary(child);
		}
	}

	#[test]
	fn no_edges_gives_flat_forest_in_input_order() {
		let tree = build_dendrogram(&nodes(&["A", "B", "C"]), &[]);
		assert_eq!(
			tree,
			HierarchyNode::Forest {
				children: vec![leaf("A"), leaf("B"), leaf("C")]
			}
		);
		assert_eq!(tree.name(), "root");
	}

	#[test]
	fn chain_merges_in_weight_order() {
		let edges = vec![Edge::new("A", "B", 1.0), Edge::new("B", "C", 2.0)];
		let tree = build_dendrogram(&nodes(&["A", "B", "C"]), &edges);
		assert_eq!(tree, internal(1, internal(0, leaf("A"), leaf("B")), leaf("C")));
	}

	#[test]
	fn edges_are_sorted_before_merging() {
		let edges = vec![Edge::new("B", "C", 2.0), Edge::new("A", "B", 1.0)];
		let result = cluster(&nodes(&["A", "B", "C"]), &edges);
		assert_eq!(
			result.root,
			internal(1, internal(0, leaf("A"), leaf("B")), leaf("C"))
		);
		assert_eq!(result.merges[0].value, 1.0);
	}

	#[test]
	fn unknown_endpoint_is_dropped() {
		let edges = vec![Edge::new("A", "X", 1.0)];
		let result = cluster(&nodes(&["A", "B", "C"]), &edges);
		assert!(result.merges.is_empty());
		assert_eq!(leaf_names(&result.root), vec!["A", "B", "C"]);
	}

	#[test]
	fn cycle_edges_are_skipped_but_keep_their_index() {
		let edges = vec![
			Edge::new("A", "B", 1.0),
			Edge::new("B", "A", 1.5),
			Edge::new("B", "C", 2.0),
		];
		let result = cluster(&nodes(&["A", "B", "C"]), &edges);
		let ids: Vec<usize> = result.merges.iter().map(|m| m.id).collect();
		assert_eq!(ids, vec![0, 2]);
		assert_eq!(
			result.root,
			internal(2, internal(0, leaf("A"), leaf("B")), leaf("C"))
		);
	}

	#[test]
	fn equal_weights_merge_in_input_order() {
		let edges = vec![Edge::new("C", "D", 1.0), Edge::new("A", "B", 1.0)];
		let result = cluster(&nodes(&["A", "B", "C", "D"]), &edges);
		assert_eq!(result.merges[0].left, ClusterId::Leaf(2));
		assert_eq!(result.merges[0].right, ClusterId::Leaf(3));
		assert_eq!(result.merges[1].left, ClusterId::Leaf(0));
		assert_eq!(
			result.root,
			HierarchyNode::Forest {
				children: vec![
					internal(0, leaf("C"), leaf("D")),
					internal(1, leaf("A"), leaf("B")),
				]
			}
		);
	}

	#[test]
	fn clusters_precede_leftover_leaves_under_forest_root() {
		let edges = vec![Edge::new("B", "C", 3.0)];
		let tree = build_dendrogram(&nodes(&["A", "B", "C"]), &edges);
		assert_eq!(
			tree,
			HierarchyNode::Forest {
				children: vec![internal(0, leaf("B"), leaf("C")), leaf("A")]
			}
		);
		assert_eq!(leaf_names(&tree), vec!["B", "C", "A"]);
	}

	#[test]
	fn forest_lists_clusters_by_creation_then_leaves_by_input() {
		let edges = vec![Edge::new("D", "E", 2.0), Edge::new("B", "C", 1.0)];
		let tree = build_dendrogram(&nodes(&["A", "B", "C", "D", "E", "F"]), &edges);
		let names: Vec<&str> = tree.children().iter().map(HierarchyNode::name).collect();
		assert_eq!(names, vec!["0", "1", "A", "F"]);
	}

	#[test]
	fn negative_zero_ties_with_zero() {
		let edges = vec![Edge::new("A", "B", 0.0), Edge::new("C", "D", -0.0)];
		let result = cluster(&nodes(&["A", "B", "C", "D"]), &edges);
		assert_eq!(result.merges[0].left, ClusterId::Leaf(0));
		assert_eq!(result.merges[1].left, ClusterId::Leaf(2));
	}

	#[test]
	fn accession_that_looks_like_a_merge_id_does_not_collide() {
		let edges = vec![Edge::new("1", "0", 1.0), Edge::new("0", "2", 2.0)];
		let tree = build_dendrogram(&nodes(&["0", "1", "2"]), &edges);
		assert_eq!(tree, internal(1, internal(0, leaf("1"), leaf("0")), leaf("2")));
	}

	#[test]
	fn names_fall_back_to_accession() {
		let input = vec![Node::new("PF1", Some("Kinase")), Node::new("PF2", None)];
		let tree = build_dendrogram(&input, &[Edge::new("PF1", "PF2", 0.1)]);
		assert_eq!(leaf_names(&tree), vec!["Kinase", "PF2"]);
	}

	#[test]
	fn single_node_is_its_own_tree() {
		let tree = build_dendrogram(&nodes(&["A"]), &[]);
		assert_eq!(tree, leaf("A"));
	}

	#[test]
	fn empty_input_gives_empty_forest() {
		let tree = build_dendrogram(&[], &[]);
		assert_eq!(tree, HierarchyNode::Forest { children: vec![] });
	}

	#[test]
	fn duplicate_accessions_appear_once() {
		let input = vec![
			Node::new("A", None),
			Node::new("A", Some("again")),
			Node::new("B", None),
		];
		let tree = build_dendrogram(&input, &[Edge::new("A", "B", 1.0)]);
		assert_eq!(leaf_names(&tree), vec!["again", "B"]);
		let HierarchyNode::Internal { children, .. } = &tree else {
			panic!("expected a single merge");
		};
		assert_eq!(
			children[0],
			HierarchyNode::Leaf {
				name: "again".to_string(),
				accession: "A".to_string(),
			}
		);
	}

	#[test]
	fn every_leaf_appears_once_and_merges_are_monotonic() {
		let ids: Vec<String> = (0..12).map(|i| format!("PF{i:05}")).collect();
		let input: Vec<Node> = ids.iter().map(|id| Node::new(id.as_str(), None)).collect();
		let mut edges = Vec::new();
		for i in 0..ids.len() {
			for j in (i + 1)..ids.len() {
				let value = ((i * 7 + j * 13) % 11) as f64;
				edges.push(Edge::new(ids[i].as_str(), ids[j].as_str(), value));
			}
		}
		edges.push(Edge::new("PF00000", "missing", 0.0));

		let result = cluster(&input, &edges);
		let mut names = leaf_names(&result.root);
		names.sort();
		assert_eq!(names, ids);
		assert_eq!(result.merges.len(), ids.len() - 1);
		assert!(result.merges.windows(2).all(|w| w[0].value <= w[1].value));
		assert!(result.merges.windows(2).all(|w| w[0].id < w[1].id));
		assert_internal_nodes_binary(&result.root);

		assert_eq!(cluster(&input, &edges), result);
	}
}
