//! interpro-sets: browse the sets of InterPro member databases.
//!
//! A client-side rendered WASM application with two pages: an index of every
//! database's sets, and a set page showing member scan targets, the
//! relationship network (force-directed, chord or dendrogram) and the
//! pairwise similarity heatmap. The single-linkage dendrogram is built by
//! [`dendrogram::build_dendrogram`].

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;
pub mod dendrogram;
pub mod error;
pub mod layout;
pub mod pages;

pub use api::ApiClient;
pub use config::AppConfig;
pub use dendrogram::{HierarchyNode, build_dendrogram};
pub use pages::Route;

use pages::{IndexPage, SetPage};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("interpro-sets: logging initialized");
}

/// Main application component.
/// Reads the embedded config and renders the page addressed by the URL.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::load();
	provide_context(ApiClient::new(config.api_base));

	let page = match pages::current_route() {
		Route::Index => view! { <IndexPage /> }.into_any(),
		Route::Set(accession) => view! { <SetPage accession=accession /> }.into_any(),
		Route::NotFound(path) => view! {
			<div class="card-panel">
				<p>"No page at " <code>{path}</code> "."</p>
			</div>
		}
		.into_any(),
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="container">{page}</main>
	}
}
