//! Landing page: every member database with its sets.

use futures::future::try_join_all;
use leptos::prelude::*;
use leptos_meta::Title;
use log::{info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::api::types::{Database, SetSummary};
use crate::components::SearchBox;
use crate::error::ApiError;

/// A database and the sets it defines.
#[derive(Clone, Debug, PartialEq)]
pub struct DatabaseColumn {
	pub database: Database,
	/// Sets of `database`, as the API lists them.
	pub sets: Vec<SetSummary>,
}

/// Grid class giving each of `columns` databases an equal share of 12.
pub fn column_class(columns: usize) -> String {
	format!("col s{}", 12 / columns.max(1))
}

/// All databases, then the sets of every database fetched concurrently.
/// Columns keep the database order; any failure fails the whole load.
async fn load_columns(client: &ApiClient) -> Result<Vec<DatabaseColumn>, ApiError> {
	let databases = client.databases(None).await?;
	try_join_all(databases.into_iter().map(|database| async move {
		let sets = client.database_sets(&database.id, None).await?;
		Ok::<_, ApiError>(DatabaseColumn { database, sets })
	}))
	.await
}

fn column_view(column: DatabaseColumn, class: String) -> impl IntoView {
	let count = column.sets.len();
	let items = column
		.sets
		.into_iter()
		.map(|set| {
			let href = format!("/set/{}/", set.accession);
			view! {
				<a href=href class="collection-item">
					<span class="badge">{set.count}</span>
					{set.accession}
				</a>
			}
		})
		.collect_view();

	view! {
		<div class=class>
			<h3 class="header">
				{column.database.name}
				<span class="subheader">{format!("{count} sets")}</span>
			</h3>
			<div class="collection">{items}</div>
		</div>
	}
}

/// Landing page listing every database's sets.
#[component]
pub fn IndexPage() -> impl IntoView {
	let client = use_context::<ApiClient>().unwrap_or_default();
	let columns = RwSignal::new(None::<Vec<DatabaseColumn>>);

	spawn_local(async move {
		match load_columns(&client).await {
			Ok(loaded) => {
				info!("interpro-sets: loaded {} databases", loaded.len());
				columns.set(Some(loaded));
			}
			Err(e) => {
				warn!("interpro-sets: could not list databases: {}", e);
				columns.set(Some(Vec::new()));
			}
		}
	});

	let content = move || match columns.get() {
		None => view! {
			<div class="preloader-wrapper active">
				<div class="spinner-layer" />
			</div>
		}
		.into_any(),
		Some(loaded) => {
			let class = column_class(loaded.len());
			loaded
				.into_iter()
				.map(|column| column_view(column, class.clone()))
				.collect_view()
				.into_any()
		}
	};

	view! {
		<Title text="InterPro sets" />
		<SearchBox />
		<div class="row" id="databases">{content}</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn columns_share_the_grid() {
		assert_eq!(column_class(1), "col s12");
		assert_eq!(column_class(4), "col s3");
		assert_eq!(column_class(5), "col s2");
	}

	#[test]
	fn no_columns_does_not_divide_by_zero() {
		assert_eq!(column_class(0), "col s12");
	}
}
