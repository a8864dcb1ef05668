//! Colours and sizes shared by the views.
//!
//! Provides the colour type, the relationship canvas style, the heatmap
//! palette and the domain palettes.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	/// Opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS colour string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Visual style of nodes, edges and labels in every relationship mode.
#[derive(Clone, Debug)]
pub struct NetworkStyle {
	/// Node circle radius in world units.
	pub node_radius: f64,
	pub node_color: Color,
	/// Darkening applied to the node under the pointer.
	pub hover_darken: f64,
	pub edge_color: Color,
	pub edge_width: f64,
	/// Colour of the E-value printed at edge midpoints (network mode only).
	pub edge_label_color: Color,
	pub label_color: Color,
	pub label_font: String,
	pub edge_label_font: String,
}

impl Default for NetworkStyle {
	fn default() -> Self {
		Self {
			node_radius: 10.0,
			node_color: Color::rgb(0x00, 0xa9, 0x9d),
			hover_darken: 0.25,
			edge_color: Color::rgb(0xcc, 0xcc, 0xcc),
			edge_width: 1.0,
			edge_label_color: Color::rgb(0xcc, 0xcc, 0xcc),
			label_color: Color::rgb(0x33, 0x33, 0x33),
			label_font: "12px sans-serif".to_string(),
			edge_label_font: "10px sans-serif".to_string(),
		}
	}
}

/// Fills and geometry of the similarity heatmap.
#[derive(Clone, Debug)]
pub struct HeatmapStyle {
	pub margin_left: f64,
	pub margin_top: f64,
	/// Upper bound on a cell's side length.
	pub max_item_size: f64,
	/// Pair without a score.
	pub missing: Color,
	/// Score above the user cutoff.
	pub above_cutoff: Color,
	pub similar: Color,
	/// Rotation of the column labels, in degrees.
	pub label_angle: f64,
	pub transition_ms: u32,
}

impl Default for HeatmapStyle {
	fn default() -> Self {
		Self {
			margin_left: 100.0,
			margin_top: 100.0,
			max_item_size: 30.0,
			missing: Color::rgb(0xe5, 0xf5, 0xe0),
			above_cutoff: Color::rgb(0xa1, 0xd9, 0x9b),
			similar: Color::rgb(0x31, 0xa3, 0x54),
			label_angle: -65.0,
			transition_ms: 500,
		}
	}
}

/// Three shades, weakest to strongest hit.
pub type Shades = [Color; 3];

/// Domain colours by how a target's set relates to the entry's set.
#[derive(Clone, Debug)]
pub struct DomainPalette {
	/// Target in the same set as the entry (greens).
	pub same: Shades,
	/// Target not in any set (blues).
	pub unassigned: Shades,
	/// Target in another set (reds).
	pub other: Shades,
	/// Horizontal guide line behind each track.
	pub track: Color,
}

impl Default for DomainPalette {
	fn default() -> Self {
		Self {
			same: [
				Color::rgb(0x81, 0xc7, 0x84),
				Color::rgb(0x4c, 0xaf, 0x50),
				Color::rgb(0x38, 0x8e, 0x3c),
			],
			unassigned: [
				Color::rgb(0x64, 0xb5, 0xf6),
				Color::rgb(0x21, 0x96, 0xf3),
				Color::rgb(0x19, 0x76, 0xd2),
			],
			other: [
				Color::rgb(0xe5, 0x73, 0x73),
				Color::rgb(0xf4, 0x43, 0x36),
				Color::rgb(0xd3, 0x2f, 0x2f),
			],
			track: Color::rgb(0xd7, 0xd7, 0xd7),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_colors_render_as_hex() {
		assert_eq!(Color::rgb(0x00, 0xa9, 0x9d).to_css(), "#00a99d");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}

	#[test]
	fn default_palettes_match_hex_values() {
		let palette = DomainPalette::default();
		assert_eq!(palette.same[0].to_css(), "#81c784");
		assert_eq!(palette.other[2].to_css(), "#d32f2f");
		assert_eq!(HeatmapStyle::default().similar.to_css(), "#31a354");
	}

	#[test]
	fn darken_scales_channels() {
		assert_eq!(Color::rgb(200, 100, 50).darken(0.5), Color::rgb(100, 50, 25));
	}
}
