//! Response shapes returned by the sets API.

use serde::Deserialize;

/// A member-database signature (family, domain, ...) identified by accession.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
	/// Stable identifier, unique within a response.
	pub accession: String,
	/// Optional human-readable name.
	#[serde(default)]
	pub name: Option<String>,
}

impl Node {
	/// Node with an optional name.
	pub fn new(accession: impl Into<String>, name: Option<&str>) -> Self {
		Self {
			accession: accession.into(),
			name: name.map(str::to_string),
		}
	}

	/// Name when present and non-empty, otherwise the accession.
	pub fn display_name(&self) -> &str {
		display_name(self.name.as_deref(), &self.accession)
	}
}

/// Label fallback shared by every entity carrying an optional name.
pub fn display_name<'a>(name: Option<&'a str>, accession: &'a str) -> &'a str {
	match name {
		Some(name) if !name.is_empty() => name,
		_ => accession,
	}
}

/// A weighted pairwise relationship. Lower values mean "more related".
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Edge {
	/// Accession of one endpoint.
	pub source: String,
	pub target: String,
	/// E-value of the relationship.
	pub value: f64,
}

impl Edge {
	/// Edge between two accessions.
	pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			value,
		}
	}
}

/// Nodes and links of a set's relationship graph.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RelationshipData {
	/// Set members.
	pub nodes: Vec<Node>,
	/// Relationships between members, unordered.
	pub links: Vec<Edge>,
}

/// Payload of `/api/set/{acc}/relationships/`.
#[derive(Clone, Debug, Deserialize)]
pub struct RelationshipResponse {
	pub accession: String,
	pub data: RelationshipData,
}

/// Payload of `/api/set/{acc}/similarity/`: a square matrix over `methods`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SimilarityResponse {
	pub accession: String,
	/// Row and column labels of `data`.
	pub methods: Vec<Node>,
	/// Similarity scores; `None` where there is no score.
	pub data: Vec<Vec<Option<f64>>>,
}

impl SimilarityResponse {
	/// Row-major flattening used by the heatmap cells.
	pub fn cells(&self) -> Vec<Option<f64>> {
		self.data.iter().flatten().copied().collect()
	}
}

/// A member database that defines sets (Pfam, CDD, ...).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Database {
	pub id: String,
	pub name: String,
}

/// One set of a member database, with its member count.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SetSummary {
	pub accession: String,
	/// Members in the set.
	pub count: u32,
}

/// A signature belonging to a set, with counts of its scan targets.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SetMember {
	pub accession: String,
	#[serde(default)]
	pub name: Option<String>,
	pub targets: u32,
	/// Targets belonging to no set.
	pub targets_without_set: u32,
	/// Targets belonging to another set.
	pub targets_other_set: u32,
}

impl SetMember {
	pub fn display_name(&self) -> &str {
		display_name(self.name.as_deref(), &self.accession)
	}
}

/// Payload of `/api/entry/{acc}/targets/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EntryTargets {
	pub accession: String,
	#[serde(default)]
	pub name: Option<String>,
	/// Representative sequence the domains are aligned to.
	#[serde(default)]
	pub sequence: Option<String>,
	#[serde(default)]
	pub set: Option<String>,
	#[serde(default)]
	pub targets: Vec<Target>,
}

impl EntryTargets {
	pub fn display_name(&self) -> &str {
		display_name(self.name.as_deref(), &self.accession)
	}

	pub fn sequence_len(&self) -> usize {
		self.sequence.as_deref().map_or(0, str::len)
	}
}

/// A signature hit by a profile-profile scan of the entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Target {
	pub accession: String,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub set: Option<String>,
	/// E-value of the whole hit.
	pub evalue: f64,
	#[serde(default)]
	pub domains: Vec<Domain>,
}

impl Target {
	pub fn display_name(&self) -> &str {
		display_name(self.name.as_deref(), &self.accession)
	}
}

/// An aligned region between the entry and a target.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Domain {
	pub query: String,
	pub target: String,
	/// Independent E-value; some scan methods do not report one.
	#[serde(default)]
	pub ievalue: Option<f64>,
	/// First aligned position, 1-based.
	pub start: u32,
	/// Last aligned position, inclusive.
	pub end: u32,
}
