//! Error types for API access and user input.

use thiserror::Error;

/// Failure of a single request against the sets API.
#[derive(Debug, Error)]
pub enum ApiError {
	/// The request never produced a response (offline, CORS, aborted).
	#[error("request to {url} failed: {message}")]
	Network { url: String, message: String },

	/// The server answered with a non-success status.
	#[error("request to {url} returned HTTP {status}")]
	Status { url: String, status: u16 },

	/// The body was not the JSON shape we expected.
	#[error("could not decode response: {0}")]
	Decode(#[from] serde_json::Error),
}

/// Rejected value typed into a numeric input field.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
	#[error("'{0}' is not a number")]
	NotANumber(String),

	#[error("'{0}' is not a finite number")]
	NotFinite(String),
}
