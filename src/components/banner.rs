//! Error card shown when a fetch fails.

use leptos::prelude::*;

/// Text of the banner for a failed lookup of `accession`.
pub fn failure_message(accession: &str) -> String {
	format!("Could not get results for {accession}.")
}

/// Hidden while `failed` is `None`; otherwise names the accession that
/// could not be loaded.
#[component]
pub fn ErrorBanner(#[prop(into)] failed: Signal<Option<String>>) -> impl IntoView {
	view! {
		<div
			id="error"
			class="card-panel red lighten-4"
			style:display={move || if failed.with(Option::is_some) { "block" } else { "none" }}
		>
			<p>
				{move || {
					failed
						.get()
						.map(|accession| {
							view! { "Could not get results for " <strong>{accession}</strong> "." }
						})
				}}
			</p>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn message_names_accession() {
		assert_eq!(failure_message("CL0001"), "Could not get results for CL0001.");
	}
}
