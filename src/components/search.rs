//! Accession search box present on every page.

use leptos::prelude::*;
use log::warn;

/// Page for a search; `None` when the box is blank.
pub fn search_target(text: &str) -> Option<String> {
	let accession = text.trim();
	(!accession.is_empty()).then(|| format!("/set/{accession}"))
}

/// Text input that navigates to the typed set on Enter.
#[component]
pub fn SearchBox(#[prop(into, optional)] initial: String) -> impl IntoView {
	let label_class = if initial.is_empty() { "" } else { "active" };

	let on_keyup = move |ev: leptos::ev::KeyboardEvent| {
		if ev.key() != "Enter" {
			return;
		}
		let Some(target) = search_target(&event_target_value(&ev)) else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Err(e) = window.location().set_href(&target) {
			warn!("interpro-sets: could not navigate to {}: {:?}", target, e);
		}
	};

	view! {
		<div class="input-field">
			<input id="search" type="text" value=initial on:keyup=on_keyup />
			<label for="search" class=label_class>"Search a set"</label>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_input_is_ignored() {
		assert_eq!(search_target("   "), None);
		assert_eq!(search_target(""), None);
	}

	#[test]
	fn accession_is_trimmed() {
		assert_eq!(search_target("  CL0001 \n"), Some("/set/CL0001".to_string()));
	}
}
