//! Canvas rendering for the relationship view.
//!
//! Layout code produces SVG path data; it is handed to the canvas through
//! `Path2d`, so arcs look identical to their SVG counterparts.
//! Rendering order per frame:
//! 1. Clear (screen space)
//! 2. Edges and edge labels (world space)
//! 3. Nodes and node labels on top

use std::f64::consts::PI;

use log::warn;
use web_sys::{CanvasRenderingContext2d, Path2d};

use crate::layout::{ChordArc, ClusterLayout, format_exponential};

use super::state::{GraphScene, NetworkView, Scene, VisMode};
use crate::components::theme::NetworkStyle;

/// Renders the complete view to the canvas.
pub fn render(view: &NetworkView, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, view.width, view.height);

	ctx.save();
	let _ = ctx.translate(view.transform.x, view.transform.y);
	let _ = ctx.scale(view.transform.k, view.transform.k);
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	match view.scene() {
		Scene::Empty => {}
		Scene::Graph(graph) => {
			match view.mode() {
				VisMode::Chord => draw_chord_edges(graph, ctx, &view.style),
				_ => draw_straight_edges(graph, ctx, &view.style),
			}
			draw_nodes(graph, ctx, &view.style, view.hovered);
		}
		Scene::Tree(layout) => draw_tree(layout, ctx, &view.style),
	}

	ctx.restore();
}

fn stroke_svg_path(ctx: &CanvasRenderingContext2d, d: &str) {
	match Path2d::new_with_path_string(d) {
		Ok(path) => ctx.stroke_with_path(&path),
		Err(_) => warn!("interpro-sets: rejected path data '{}'", d),
	}
}

fn draw_straight_edges(graph: &GraphScene, ctx: &CanvasRenderingContext2d, style: &NetworkStyle) {
	ctx.set_stroke_style_str(&style.edge_color.to_css());
	ctx.set_line_width(style.edge_width);

	for edge in &graph.edges {
		let (Some(a), Some(b)) = (graph.position(edge.source), graph.position(edge.target)) else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}

	ctx.set_fill_style_str(&style.edge_label_color.to_css());
	ctx.set_font(&style.edge_label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for edge in &graph.edges {
		let (Some(a), Some(b)) = (graph.position(edge.source), graph.position(edge.target)) else {
			continue;
		};
		let _ = ctx.fill_text(
			&format_exponential(edge.value, Some(1)),
			(a.x + b.x) / 2.0,
			(a.y + b.y) / 2.0,
		);
	}
}

fn draw_chord_edges(graph: &GraphScene, ctx: &CanvasRenderingContext2d, style: &NetworkStyle) {
	ctx.set_stroke_style_str(&style.edge_color.to_css());
	ctx.set_line_width(style.edge_width);

	for edge in &graph.edges {
		let (Some(a), Some(b)) = (graph.position(edge.source), graph.position(edge.target)) else {
			continue;
		};
		stroke_svg_path(ctx, &ChordArc::between(a, b).to_path());
	}
}

fn draw_nodes(
	graph: &GraphScene,
	ctx: &CanvasRenderingContext2d,
	style: &NetworkStyle,
	hovered: Option<usize>,
) {
	let radius = style.node_radius;
	ctx.set_font(&style.label_font);
	ctx.set_text_align("start");
	ctx.set_text_baseline("middle");

	for (i, node) in graph.simulation.nodes().iter().enumerate() {
		let color = if hovered == Some(i) {
			style.node_color.darken(style.hover_darken)
		} else {
			style.node_color
		};
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&color.to_css());
		ctx.fill();

		if let Some(label) = graph.labels.get(i) {
			ctx.set_fill_style_str(&style.label_color.to_css());
			let _ = ctx.fill_text(label, node.x + radius, node.y);
		}
	}
}

fn draw_tree(layout: &ClusterLayout, ctx: &CanvasRenderingContext2d, style: &NetworkStyle) {
	ctx.set_stroke_style_str(&style.edge_color.to_css());
	ctx.set_line_width(style.edge_width);
	for link in layout.links() {
		stroke_svg_path(ctx, &link.to_path());
	}

	ctx.set_fill_style_str(&style.label_color.to_css());
	ctx.set_font(&style.label_font);
	ctx.set_text_baseline("middle");
	for label in layout.leaf_labels() {
		ctx.save();
		let _ = ctx.rotate(label.rotation.to_radians());
		let _ = ctx.translate(label.offset, 0.0);
		if label.flipped {
			let _ = ctx.rotate(PI);
			ctx.set_text_align("end");
		} else {
			ctx.set_text_align("start");
		}
		let _ = ctx.fill_text(&label.text, 0.0, 0.0);
		ctx.restore();
	}
}
