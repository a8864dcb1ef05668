//! Geometry for the relationship views: scales, the force simulation, chord
//! arcs and the circular dendrogram.
//!
//! Everything here is plain data in, plain data out. Drawing happens in the
//! components, which turn the SVG path strings produced here into canvas
//! `Path2d` objects.

pub mod cluster;
pub mod radial;
pub mod scale;
pub mod simulation;

pub use cluster::{ClusterLayout, ClusterLink, LeafLabel};
pub use radial::{ChordArc, Point};
pub use scale::{BandScale, LinearScale, LogScale, ThresholdScale, evalue_shade};
pub use simulation::{Cooling, Simulation, springs_for};

/// Format like JavaScript's `Number.prototype.toExponential`: `1.0e-5`,
/// `1.2e+1`. `digits = None` keeps as many digits as needed.
pub fn format_exponential(value: f64, digits: Option<usize>) -> String {
	let formatted = match digits {
		Some(d) => format!("{value:.d$e}"),
		None => format!("{value:e}"),
	};
	match formatted.split_once('e') {
		Some((mantissa, exponent)) if !exponent.starts_with('-') => {
			format!("{mantissa}e+{exponent}")
		}
		_ => formatted,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exponential_matches_javascript_style() {
		assert_eq!(format_exponential(1e-5, Some(1)), "1.0e-5");
		assert_eq!(format_exponential(12.0, Some(1)), "1.2e+1");
		assert_eq!(format_exponential(3.2e-150, None), "3.2e-150");
		assert_eq!(format_exponential(0.0, None), "0e+0");
	}
}
