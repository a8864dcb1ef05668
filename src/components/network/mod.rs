//! Relationship view of a set: force-directed network, chord ring or
//! circular dendrogram, drawn on a canvas.
//!
//! - `state` holds the view state and builds a scene per mode
//! - `render` draws a scene each animation frame
//! - `component` wires the canvas into Leptos (drag, pan, zoom, hover)

mod component;
mod render;
pub mod state;

pub use component::NetworkCanvas;
pub use state::{NetworkView, VisMode};
