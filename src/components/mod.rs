//! Leptos views used by the pages.

pub mod banner;
pub mod domains;
pub mod heatmap;
pub mod members;
pub mod network;
pub mod search;
pub mod theme;

pub use banner::ErrorBanner;
pub use domains::TargetsView;
pub use heatmap::Heatmap;
pub use members::MemberList;
pub use network::{NetworkCanvas, VisMode};
pub use search::SearchBox;

/// Width assumed for a container that has not been laid out yet.
pub const FALLBACK_WIDTH: f64 = 800.0;

/// Width of a container from its measured `client_width`. Hidden containers
/// measure 0 and get `FALLBACK_WIDTH` instead.
pub fn container_width(measured: i32) -> f64 {
	if measured > 0 {
		measured as f64
	} else {
		FALLBACK_WIDTH
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hidden_container_falls_back() {
		assert_eq!(container_width(0), FALLBACK_WIDTH);
		assert_eq!(container_width(-1), FALLBACK_WIDTH);
		assert_eq!(container_width(640), 640.0);
	}
}
