//! Runtime configuration embedded in the host page.
//!
//! The page may carry `<script id="app-config" type="application/json">`
//! with `{ "api_base": "https://..." }`. Missing or malformed config falls
//! back to same-origin requests.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

const CONFIG_ELEMENT_ID: &str = "app-config";

/// Settings read from the host page.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Prefix for every API path; empty means the page's own origin.
	pub api_base: String,
}

impl AppConfig {
	/// Parse the config element's text.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Read the config element from the current document.
	pub fn load() -> Self {
		let Some(text) = config_text() else {
			return Self::default();
		};
		match Self::from_json(&text) {
			Ok(config) => {
				info!("interpro-sets: api base '{}'", config.api_base);
				config
			}
			Err(e) => {
				warn!("interpro-sets: ignoring malformed config: {}", e);
				Self::default()
			}
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_fields_use_defaults() {
		assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
	}

	#[test]
	fn api_base_is_read() {
		let config = AppConfig::from_json(r#"{"api_base": "https://www.ebi.ac.uk/sets"}"#).unwrap();
		assert_eq!(config.api_base, "https://www.ebi.ac.uk/sets");
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(AppConfig::from_json("{api_base:").is_err());
	}
}
