//! Chord-style arcs between nodes placed around the origin.

/// Point in layout coordinates (origin at the view centre).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance.
	pub fn distance(self, other: Point) -> f64 {
		((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
	}
}

/// Circular arc from `start` to `end`, described as an SVG path segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChordArc {
	pub start: Point,
	pub end: Point,
	pub radius: f64,
	pub sweep: bool,
}

impl ChordArc {
	/// Arc between two node positions. Endpoints are ordered left to right so
	/// the curvature only depends on which half-plane the midpoint sits in:
	/// arcs in the upper half bow one way, those in the lower half the other.
	pub fn between(a: Point, b: Point) -> Self {
		let (start, end) = if a.x <= b.x { (a, b) } else { (b, a) };
		let mid_y = (a.y + b.y) / 2.0;
		Self {
			start,
			end,
			radius: a.distance(b),
			sweep: mid_y > 0.0,
		}
	}

	/// SVG path data for the arc.
	pub fn to_path(&self) -> String {
		format!(
			"M {} {} A {} {} 0 0 {} {} {}",
			self.start.x,
			self.start.y,
			self.radius,
			self.radius,
			u8::from(self.sweep),
			self.end.x,
			self.end.y
		)
	}
}
