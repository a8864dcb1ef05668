//! Pairwise similarity heatmap of a set's members.
//!
//! `HeatmapLayout` is the geometry: one square cell per matrix entry, laid out
//! row-major, plus rotated column labels and right-aligned row labels. The
//! component renders it as SVG and lets CSS animate fill changes, so moving
//! the cutoff recolours cells in place.

use std::f64::consts::PI;

use leptos::prelude::*;

use crate::api::types::SimilarityResponse;
use crate::layout::BandScale;

use super::container_width;
use super::theme::{Color, HeatmapStyle};

/// One matrix entry.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapCell {
	pub x: f64,
	pub y: f64,
	/// `None` on the diagonal and for pairs without a score.
	pub value: Option<f64>,
}

/// Cell geometry and labels for a similarity matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapLayout {
	/// Side length of the whole square chart, margins included.
	pub width: f64,
	/// Side length of one cell.
	pub item_size: f64,
	/// Member labels, shared by both axes.
	pub axis: BandScale,
	/// Offsets applied to each rotated column label.
	pub label_dx: f64,
	pub label_dy: f64,
	pub cells: Vec<HeatmapCell>,
}

/// Fill for a cell: missing, above the cutoff, or within it.
pub fn cell_fill(value: Option<f64>, cutoff: Option<f64>, style: &HeatmapStyle) -> Color {
	match (value, cutoff) {
		(None, _) => style.missing,
		(Some(v), Some(c)) if v > c => style.above_cutoff,
		_ => style.similar,
	}
}

impl HeatmapLayout {
	/// Lay out `data` in a chart `width` pixels wide.
	pub fn new(width: f64, data: &SimilarityResponse, style: &HeatmapStyle) -> Self {
		let n = data.methods.len();
		let item_size = if n == 0 {
			0.0
		} else {
			((width - style.margin_left) / n as f64)
				.floor()
				.clamp(0.0, style.max_item_size)
		};

		let angle = (style.label_angle * PI / 180.0).abs();
		let adj = angle.cos() * item_size;
		let opp = angle.sin() * item_size;

		let labels = data
			.methods
			.iter()
			.map(|m| m.display_name().to_string())
			.collect();

		let cells = if n == 0 {
			Vec::new()
		} else {
			data.cells()
				.into_iter()
				.enumerate()
				.map(|(i, value)| HeatmapCell {
					x: (i % n) as f64 * item_size,
					y: (i / n) as f64 * item_size,
					value,
				})
				.collect()
		};

		Self {
			width,
			item_size,
			axis: BandScale::new(labels, item_size),
			label_dx: (opp / 3.0).floor(),
			label_dy: (adj / 3.0).floor(),
			cells,
		}
	}

	/// Fill of every cell, in cell order.
	pub fn fills(&self, cutoff: Option<f64>, style: &HeatmapStyle) -> Vec<Color> {
		self.cells
			.iter()
			.map(|c| cell_fill(c.value, cutoff, style))
			.collect()
	}
}

/// Similarity heatmap. Cells scoring above `cutoff` get the lighter fill.
///
/// The chart is a square as wide as its container, measured whenever new data
/// arrives or the chart becomes `visible`. Only a new matrix or a new width
/// rebuilds the cells; a cutoff change just recolours them.
#[component]
pub fn Heatmap(
	#[prop(into)] data: Signal<Option<SimilarityResponse>>,
	#[prop(into)] cutoff: Signal<Option<f64>>,
	#[prop(into)] visible: Signal<bool>,
) -> impl IntoView {
	let style = StoredValue::new(HeatmapStyle::default());
	let container = NodeRef::<leptos::html::Div>::new();
	let width = RwSignal::new(None::<f64>);

	Effect::new(move |_| {
		data.track();
		if !visible.get() {
			return;
		}
		if let Some(div) = container.get() {
			width.set(Some(container_width(div.client_width())));
		}
	});

	let layout = Memo::new(move |_| {
		let w = width.get()?;
		data.with(|d| {
			d.as_ref()
				.map(|d| style.with_value(|s| HeatmapLayout::new(w, d, s)))
		})
	});

	let fills = Memo::new(move |_| {
		let cutoff = cutoff.get();
		layout.with(|l| {
			l.as_ref()
				.map(|l| style.with_value(|s| l.fills(cutoff, s)))
				.unwrap_or_default()
		})
	});

	let (left, top, angle, transition) = style.with_value(|s| {
		(
			s.margin_left,
			s.margin_top,
			s.label_angle,
			format!("fill {}ms", s.transition_ms),
		)
	});

	let chart = move || {
		let layout = layout.get()?;
		let size = layout.item_size;
		let ticks = layout
			.axis
			.labels
			.iter()
			.enumerate()
			.map(|(i, label)| (layout.axis.center(i), label.clone()))
			.collect::<Vec<_>>();
		let (dx, dy) = (layout.label_dx, layout.label_dy);

		let column_labels = ticks
			.iter()
			.map(|(offset, text)| {
				view! {
					<g transform={format!("translate({offset},0)")}>
						<text
							y="-3"
							dx={format!("{dx}px")}
							dy={format!("{dy}px")}
							transform={format!("rotate({angle})")}
						>
							{text.clone()}
						</text>
					</g>
				}
			})
			.collect_view();

		let row_labels = ticks
			.iter()
			.map(|(offset, text)| {
				view! {
					<g transform={format!("translate(0,{offset})")}>
						<text x="-3" dy="0.32em">{text.clone()}</text>
					</g>
				}
			})
			.collect_view();

		let transition = transition.clone();
		let cells = layout
			.cells
			.into_iter()
			.enumerate()
			.map(|(i, cell)| {
				let fill = move || fills.with(|f| f.get(i).map(|c| c.to_css()).unwrap_or_default());
				view! {
					<rect
						x=cell.x
						y=cell.y
						width=size
						height=size
						style:transition={transition.clone()}
						style:fill=fill
					/>
				}
			})
			.collect_view();

		Some(view! {
			<svg width=layout.width height=layout.width>
				<g transform={format!("translate({left},{top})")}>
					<g class="x axis" text-anchor="start">{column_labels}</g>
					<g class="y axis" text-anchor="end">{row_labels}</g>
					{cells}
				</g>
			</svg>
		})
	};

	view! { <div class="chart" node_ref=container>{chart}</div> }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::types::Node;

	fn matrix(n: usize) -> SimilarityResponse {
		SimilarityResponse {
			accession: "CL0001".to_string(),
			methods: (0..n)
				.map(|i| Node::new(format!("PF{i:05}"), None))
				.collect(),
			data: (0..n)
				.map(|r| {
					(0..n)
						.map(|c| if r == c { None } else { Some((r + c) as f64) })
						.collect()
				})
				.collect(),
		}
	}

	#[test]
	fn item_size_is_capped() {
		let layout = HeatmapLayout::new(1000.0, &matrix(3), &HeatmapStyle::default());
		assert_eq!(layout.item_size, 30.0);
		assert_eq!(layout.axis.extent(), 90.0);
	}

	#[test]
	fn item_size_is_floored_to_fit() {
		let layout = HeatmapLayout::new(400.0, &matrix(20), &HeatmapStyle::default());
		assert_eq!(layout.item_size, 15.0);
	}

	#[test]
	fn cells_are_row_major() {
		let layout = HeatmapLayout::new(1000.0, &matrix(3), &HeatmapStyle::default());
		assert_eq!(layout.cells.len(), 9);
		let cell = &layout.cells[5];
		assert_eq!((cell.x, cell.y), (60.0, 30.0));
		assert_eq!(cell.value, Some(3.0));
	}

	#[test]
	fn fills_follow_cutoff() {
		let style = HeatmapStyle::default();
		assert_eq!(cell_fill(None, Some(1.0), &style), style.missing);
		assert_eq!(cell_fill(Some(2.0), Some(1.0), &style), style.above_cutoff);
		assert_eq!(cell_fill(Some(1.0), Some(1.0), &style), style.similar);
		assert_eq!(cell_fill(Some(2.0), None, &style), style.similar);
	}

	#[test]
	fn fills_cover_every_cell() {
		let style = HeatmapStyle::default();
		let layout = HeatmapLayout::new(1000.0, &matrix(2), &style);
		let fills = layout.fills(Some(0.5), &style);
		assert_eq!(
			fills,
			vec![style.missing, style.above_cutoff, style.above_cutoff, style.missing]
		);
	}

	#[test]
	fn label_offsets_use_rotation() {
		let layout = HeatmapLayout::new(1000.0, &matrix(3), &HeatmapStyle::default());
		// sin(65deg) * 30 / 3 = 9.06, cos(65deg) * 30 / 3 = 4.23
		assert_eq!((layout.label_dx, layout.label_dy), (9.0, 4.0));
		assert_eq!(layout.axis.center(1), 45.0);
	}

	#[test]
	fn unmeasured_chart_still_gets_cells() {
		let layout = HeatmapLayout::new(container_width(0), &matrix(3), &HeatmapStyle::default());
		assert_eq!(layout.width, 800.0);
		assert_eq!(layout.item_size, 30.0);
		assert!(layout.cells.iter().all(|c| c.x >= 0.0));
	}

	#[test]
	fn empty_matrix_has_no_cells() {
		let layout = HeatmapLayout::new(
			500.0,
			&SimilarityResponse::default(),
			&HeatmapStyle::default(),
		);
		assert_eq!(layout.item_size, 0.0);
		assert!(layout.cells.is_empty());
	}
}
