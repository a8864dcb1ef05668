//! Client for the sets REST API.
//!
//! All endpoints answer `GET` with JSON. Failures are reported once to the
//! caller; there is no retry.

pub mod tasks;
pub mod types;

use gloo_net::http::Request;
use log::debug;
use serde::de::DeserializeOwned;
use web_sys::AbortSignal;

use crate::error::ApiError;

use types::{
	Database, EntryTargets, RelationshipResponse, SetMember, SetSummary, SimilarityResponse,
};

/// Builds endpoint URLs against a base and fetches them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiClient {
	base_url: String,
}

impl ApiClient {
	/// `base_url` is prepended verbatim; empty means same origin.
	pub fn new(base_url: impl Into<String>) -> Self {
		let mut base_url = base_url.into();
		while base_url.ends_with('/') {
			base_url.pop();
		}
		Self { base_url }
	}

	/// Absolute URL of an endpoint path.
	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	/// Every member database.
	pub fn databases_path() -> String {
		"/api/databases/".to_string()
	}

	/// Sets of one database.
	pub fn database_path(id: &str) -> String {
		format!("/api/database/{id}/")
	}

	/// Members of a set.
	pub fn set_members_path(accession: &str) -> String {
		format!("/api/set/{accession}/")
	}

	/// Scan targets of an entry.
	pub fn entry_targets_path(accession: &str) -> String {
		format!("/api/entry/{accession}/targets/")
	}

	/// Relationship graph of a set.
	pub fn relationships_path(accession: &str) -> String {
		format!("/api/set/{accession}/relationships/")
	}

	/// Similarity matrix of a set.
	pub fn similarity_path(accession: &str) -> String {
		format!("/api/set/{accession}/similarity/")
	}

	/// GET `path` and decode the body as `T`.
	pub async fn get_json<T: DeserializeOwned>(
		&self,
		path: &str,
		signal: Option<&AbortSignal>,
	) -> Result<T, ApiError> {
		let url = self.url(path);
		debug!("interpro-sets: GET {url}");

		let response = Request::get(&url)
			.abort_signal(signal)
			.send()
			.await
			.map_err(|e| ApiError::Network {
				url: url.clone(),
				message: e.to_string(),
			})?;

		if !response.ok() {
			return Err(ApiError::Status {
				url,
				status: response.status(),
			});
		}

		let body = response.text().await.map_err(|e| ApiError::Network {
			url: url.clone(),
			message: e.to_string(),
		})?;
		Ok(serde_json::from_str(&body)?)
	}

	/// Member databases.
	pub async fn databases(&self, signal: Option<&AbortSignal>) -> Result<Vec<Database>, ApiError> {
		self.get_json(&Self::databases_path(), signal).await
	}

	/// Sets defined by database `id`.
	pub async fn database_sets(
		&self,
		id: &str,
		signal: Option<&AbortSignal>,
	) -> Result<Vec<SetSummary>, ApiError> {
		self.get_json(&Self::database_path(id), signal).await
	}

	/// Members of a set.
	pub async fn set_members(
		&self,
		accession: &str,
		signal: Option<&AbortSignal>,
	) -> Result<Vec<SetMember>, ApiError> {
		self.get_json(&Self::set_members_path(accession), signal)
			.await
	}

	/// An entry with its scan targets.
	pub async fn entry_targets(
		&self,
		accession: &str,
		signal: Option<&AbortSignal>,
	) -> Result<EntryTargets, ApiError> {
		self.get_json(&Self::entry_targets_path(accession), signal)
			.await
	}

	/// Relationship graph of a set.
	pub async fn relationships(
		&self,
		accession: &str,
		signal: Option<&AbortSignal>,
	) -> Result<RelationshipResponse, ApiError> {
		self.get_json(&Self::relationships_path(accession), signal)
			.await
	}

	/// Similarity matrix of a set.
	pub async fn similarity(
		&self,
		accession: &str,
		signal: Option<&AbortSignal>,
	) -> Result<SimilarityResponse, ApiError> {
		self.get_json(&Self::similarity_path(accession), signal)
			.await
	}
}
