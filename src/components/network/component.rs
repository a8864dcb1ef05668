//! Leptos component wrapping the relationship canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, and zooming. An animation loop runs via
//! `requestAnimationFrame`, stepping the layout and redrawing each frame.
//! Changes to the data, mode or threshold signals feed the view and trigger
//! `NetworkView::update`.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::api::types::RelationshipData;
use crate::components::container_width;

use super::render;
use super::state::{NetworkView, VisMode};

/// Height of the canvas relative to its width.
const ASPECT: f64 = 0.6;

/// Bundles the view state with the canvas it draws on.
struct CanvasContext {
	view: NetworkView,
	ctx: CanvasRenderingContext2d,
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Renders the relationship data of a set on a canvas.
///
/// The canvas takes its parent's width and 60% of it as height. It is sized
/// the first time it is `visible` and resized when it is shown again at a
/// different width. `threshold` hides links whose value is not below it
/// (network and chord modes only).
#[component]
pub fn NetworkCanvas(
	#[prop(into)] data: Signal<Option<RelationshipData>>,
	#[prop(into)] mode: Signal<VisMode>,
	#[prop(into)] threshold: Signal<Option<f64>>,
	#[prop(into)] visible: Signal<bool>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	// Size the canvas once it is laid out, then start the animation loop.
	let context_size = context.clone();
	Effect::new(move |_| {
		if !visible.get() {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let w = container_width(canvas.parent_element().map_or(0, |p| p.client_width()));
		let h = w * ASPECT;

		let mut slot = context_size.borrow_mut();
		match slot.as_mut() {
			Some(c) if c.view.width == w => return,
			Some(c) => {
				info!("interpro-sets: resizing relationship canvas to {w}px");
				canvas.set_width(w as u32);
				canvas.set_height(h as u32);
				c.view.resize(w, h);
				c.view.update();
				return;
			}
			None => {}
		}

		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let Some(ctx) = context_2d(&canvas) else {
			return;
		};
		let mut view = NetworkView::new(w, h);
		view.set_mode(mode.get_untracked());
		view.set_threshold(threshold.get_untracked());
		view.set_data(data.get_untracked());
		view.update();
		*slot = Some(CanvasContext { view, ctx });
		drop(slot);

		let (context_anim, animate_inner) = (context_size.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.view.tick();
				render::render(&c.view, &c.ctx);
			}
			if let (Some(cb), Some(window)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(window)) = (&*animate.borrow(), web_sys::window()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Feed data and display parameters into an already sized view.
	let context_data = context.clone();
	Effect::new(move |_| {
		let data = data.get();
		let mode = mode.get();
		let threshold = threshold.get();
		if let Some(ref mut c) = *context_data.borrow_mut() {
			if let Some(d) = &data {
				info!(
					"interpro-sets: drawing {} nodes, {} links as {}",
					d.nodes.len(),
					d.links.len(),
					mode.as_str()
				);
			}
			if c.view.mode() != mode {
				c.view.set_mode(mode);
			}
			c.view.set_threshold(threshold);
			c.view.set_data(data);
			c.view.update();
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			let dragged = c
				.view
				.node_at_position(x, y)
				.is_some_and(|idx| c.view.begin_drag(idx));
			if !dragged {
				c.view.pan.active = true;
				c.view.pan.start_x = x;
				c.view.pan.start_y = y;
				c.view.pan.transform_start_x = c.view.transform.x;
				c.view.pan.transform_start_y = c.view.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.view.drag.active {
				c.view.drag_to(x, y);
			} else {
				c.view.hovered = c.view.node_at_position(x, y);
				if c.view.pan.active {
					c.view.transform.x = c.view.pan.transform_start_x + (x - c.view.pan.start_x);
					c.view.transform.y = c.view.pan.transform_start_y + (y - c.view.pan.start_y);
				}
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if c.view.drag.active {
				c.view.end_drag();
			}
			c.view.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			if c.view.drag.active {
				c.view.end_drag();
			}
			c.view.pan.active = false;
			c.view.hovered = None;
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let t = &mut c.view.transform;
			let new_k = (t.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / t.k;
			t.x = x - (x - t.x) * ratio;
			t.y = y - (y - t.y) * ratio;
			t.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="network-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
