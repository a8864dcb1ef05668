//! Pages of the application and the route that selects one.

mod index;
mod set;

pub use index::IndexPage;
pub use set::{SetPage, Tab, parse_threshold};

use log::warn;

/// Page addressed by a location path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
	/// `/`: sets of every member database.
	Index,
	/// `/set/{accession}` with an optional trailing slash.
	Set(String),
	/// Anything else, with the path that missed.
	NotFound(String),
}

impl Route {
	/// Route for a location path; the `/set/` prefix is case-insensitive.
	pub fn from_path(path: &str) -> Self {
		if path.is_empty() || path == "/" {
			return Route::Index;
		}

		const PREFIX: &str = "/set/";
		let accession = path
			.get(..PREFIX.len())
			.filter(|head| head.eq_ignore_ascii_case(PREFIX))
			.map(|_| &path[PREFIX.len()..])
			.map(|rest| rest.strip_suffix('/').unwrap_or(rest));

		match accession {
			Some(accession) if !accession.is_empty() => Route::Set(accession.to_string()),
			_ => Route::NotFound(path.to_string()),
		}
	}
}

/// Route of the page the browser is showing.
pub fn current_route() -> Route {
	let path = web_sys::window().map(|w| w.location().pathname());
	match path {
		Some(Ok(path)) => Route::from_path(&path),
		Some(Err(e)) => {
			warn!("interpro-sets: could not read location: {:?}", e);
			Route::Index
		}
		None => Route::Index,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn root_is_index() {
		assert_eq!(Route::from_path("/"), Route::Index);
		assert_eq!(Route::from_path(""), Route::Index);
	}

	#[test]
	fn set_paths_carry_accession() {
		assert_eq!(Route::from_path("/set/CL0001/"), Route::Set("CL0001".to_string()));
		assert_eq!(Route::from_path("/set/cd00001"), Route::Set("cd00001".to_string()));
		assert_eq!(Route::from_path("/SET/PTHR10000"), Route::Set("PTHR10000".to_string()));
	}

	#[test]
	fn only_one_trailing_slash_is_dropped() {
		assert_eq!(Route::from_path("/set/a//"), Route::Set("a/".to_string()));
	}

	#[test]
	fn other_paths_are_not_found() {
		assert_eq!(Route::from_path("/set/"), Route::NotFound("/set/".to_string()));
		assert_eq!(Route::from_path("/entry/PF1"), Route::NotFound("/entry/PF1".to_string()));
		assert_eq!(Route::from_path("/se"), Route::NotFound("/se".to_string()));
	}
}
