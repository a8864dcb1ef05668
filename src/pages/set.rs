//! Set page: members and their scan targets, the relationship view and the
//! similarity heatmap, one tab each.
//!
//! Each tab fetches its data when it becomes active. Fetches go through
//! `FetchSlots`, so a tab shown twice in quick succession only ever applies
//! the newest response and aborts the older request.

use std::future::Future;

use leptos::prelude::*;
use leptos_meta::Title;
use log::{debug, info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::AbortSignal;

use crate::api::ApiClient;
use crate::api::tasks::{FetchSlots, FetchTicket, ViewKey};
use crate::api::types::{
	EntryTargets, RelationshipData, RelationshipResponse, SetMember, SimilarityResponse,
};
use crate::components::banner::failure_message;
use crate::components::{
	ErrorBanner, Heatmap, MemberList, NetworkCanvas, SearchBox, TargetsView, VisMode,
};
use crate::error::{ApiError, InputError};

/// Tabs of the set page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
	/// Members and their profile-profile scan targets.
	#[default]
	Hmmscan,
	/// Relationship network, chord diagram or dendrogram.
	Network,
	/// Pairwise similarity heatmap.
	Heatmap,
}

impl Tab {
	/// Tabs in display order.
	pub const ALL: [Tab; 3] = [Tab::Hmmscan, Tab::Network, Tab::Heatmap];

	/// Anchor id of the tab's section.
	pub fn id(self) -> &'static str {
		match self {
			Tab::Hmmscan => "hmmscan",
			Tab::Network => "network",
			Tab::Heatmap => "heatmap",
		}
	}

	/// Text of the tab header.
	pub fn label(self) -> &'static str {
		match self {
			Tab::Hmmscan => "Members",
			Tab::Network => "Relationships",
			Tab::Heatmap => "Similarity",
		}
	}

	/// Slot of the fetch that fills the tab.
	pub fn view_key(self) -> ViewKey {
		match self {
			Tab::Hmmscan => ViewKey::Members,
			Tab::Network => ViewKey::Relationships,
			Tab::Heatmap => ViewKey::Similarity,
		}
	}
}

/// Parse a threshold or cutoff field. Blank means no limit.
pub fn parse_threshold(text: &str) -> Result<Option<f64>, InputError> {
	let text = text.trim();
	if text.is_empty() {
		return Ok(None);
	}
	let value: f64 = text
		.parse()
		.map_err(|_| InputError::NotANumber(text.to_string()))?;
	if !value.is_finite() {
		return Err(InputError::NotFinite(text.to_string()));
	}
	Ok(Some(value))
}

/// Slots live in thread-local storage; abort controllers are not `Send`.
type Slots = StoredValue<FetchSlots<ViewKey>, LocalStorage>;

/// A fetch to start: the slot it runs in and the accession it asks about,
/// which is also the accession named by the error banner if it fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchJob {
	/// Slot the fetch runs in.
	pub key: ViewKey,
	/// Accession requested and reported on failure.
	pub subject: String,
}

impl FetchJob {
	/// The fetch filling `tab` for the set `accession`.
	pub fn tab(tab: Tab, accession: &str) -> Self {
		Self {
			key: tab.view_key(),
			subject: accession.to_string(),
		}
	}

	/// The scan targets of one set member.
	pub fn targets(member: &str) -> Self {
		Self {
			key: ViewKey::Targets,
			subject: member.to_string(),
		}
	}
}

/// Everything a fetch needs to report back to the page.
#[derive(Clone)]
struct Fetcher {
	client: ApiClient,
	slots: Slots,
	failed: RwSignal<Option<String>>,
}

impl Fetcher {
	/// Start `request` for `job.subject` in the job's slot and hand its result
	/// to `apply` if no newer fetch for the same slot was started meanwhile.
	fn spawn<T, F, Fut>(&self, job: FetchJob, request: F, apply: impl FnOnce(T) + 'static)
	where
		T: 'static,
		F: FnOnce(ApiClient, String, Option<AbortSignal>) -> Fut,
		Fut: Future<Output = Result<T, ApiError>> + 'static,
	{
		let Some(ticket) = self.slots.try_update_value(|slots| slots.begin(job.key)) else {
			return;
		};
		self.failed.set(None);
		let future = request(
			self.client.clone(),
			job.subject.clone(),
			ticket.signal().cloned(),
		);
		let this = self.clone();
		spawn_local(async move {
			let result = future.await;
			this.settle(&ticket, &job.subject, result, apply);
		});
	}

	fn settle<T>(
		&self,
		ticket: &FetchTicket<ViewKey>,
		subject: &str,
		result: Result<T, ApiError>,
		apply: impl FnOnce(T),
	) {
		if !self.slots.try_update_value(|slots| slots.finish(ticket)).unwrap_or(false) {
			debug!("interpro-sets: dropping superseded {:?} response", ticket.key());
			return;
		}
		match result {
			Ok(value) => apply(value),
			Err(e) => {
				warn!("interpro-sets: {} {}", failure_message(subject), e);
				self.failed.set(Some(subject.to_string()));
			}
		}
	}
}

/// Page state shared by the tab loaders.
#[derive(Clone, Copy)]
struct SetData {
	members: RwSignal<Vec<SetMember>>,
	selected: RwSignal<Option<String>>,
	targets: RwSignal<Option<EntryTargets>>,
	relationships: RwSignal<Option<RelationshipData>>,
	similarity: RwSignal<Option<SimilarityResponse>>,
}

impl SetData {
	fn new() -> Self {
		Self {
			members: RwSignal::new(Vec::new()),
			selected: RwSignal::new(None),
			targets: RwSignal::new(None),
			relationships: RwSignal::new(None),
			similarity: RwSignal::new(None),
		}
	}
}

fn load_targets(fetcher: &Fetcher, data: SetData, member: String) {
	let job = FetchJob::targets(&member);
	data.selected.set(Some(member));
	fetcher.spawn(
		job,
		|client, member, signal| async move {
			client.entry_targets(&member, signal.as_ref()).await
		},
		move |entry: EntryTargets| data.targets.set(Some(entry)),
	);
}

fn load_tab(fetcher: &Fetcher, data: SetData, tab: Tab, accession: &str) {
	let job = FetchJob::tab(tab, accession);
	match tab {
		Tab::Hmmscan => {
			let next = fetcher.clone();
			fetcher.spawn(
				job,
				|client, accession, signal| async move {
					client.set_members(&accession, signal.as_ref()).await
				},
				move |members: Vec<SetMember>| {
					info!("interpro-sets: {} members", members.len());
					let first = members.first().map(|m| m.accession.clone());
					data.members.set(members);
					if let Some(first) = first {
						load_targets(&next, data, first);
					}
				},
			);
		}
		Tab::Network => fetcher.spawn(
			job,
			|client, accession, signal| async move {
				client.relationships(&accession, signal.as_ref()).await
			},
			move |response: RelationshipResponse| {
				info!(
					"interpro-sets: {} relationships between {} nodes",
					response.data.links.len(),
					response.data.nodes.len()
				);
				data.relationships.set(Some(response.data));
			},
		),
		Tab::Heatmap => fetcher.spawn(
			job,
			|client, accession, signal| async move {
				client.similarity(&accession, signal.as_ref()).await
			},
			move |response: SimilarityResponse| data.similarity.set(Some(response)),
		),
	}
}

/// Numeric field applied on Enter. Rejected input is flagged `invalid`
/// and leaves `value` untouched.
#[component]
fn ThresholdInput(
	id: &'static str,
	label: &'static str,
	value: RwSignal<Option<f64>>,
) -> impl IntoView {
	let invalid = RwSignal::new(false);

	let on_keyup = move |ev: leptos::ev::KeyboardEvent| {
		if ev.key() != "Enter" {
			return;
		}
		match parse_threshold(&event_target_value(&ev)) {
			Ok(parsed) => {
				invalid.set(false);
				value.set(parsed);
			}
			Err(e) => {
				debug!("interpro-sets: {}: {}", id, e);
				invalid.set(true);
			}
		}
	};

	view! {
		<div class="input-field">
			<input id=id type="text" class:invalid={move || invalid.get()} on:keyup=on_keyup />
			<label for=id>{label}</label>
		</div>
	}
}

/// Radio group switching the relationship view mode.
#[component]
fn VisModeSelect(mode: RwSignal<VisMode>) -> impl IntoView {
	VisMode::ALL
		.into_iter()
		.map(|m| {
			let id = format!("vis-{}", m.as_str());
			let on_change = move |ev: leptos::ev::Event| {
				if let Some(parsed) = VisMode::parse(&event_target_value(&ev)) {
					mode.set(parsed);
				}
			};
			view! {
				<p>
					<label for={id.clone()}>
						<input
							id=id.clone()
							type="radio"
							name="vis-type"
							value={m.as_str()}
							prop:checked={move || mode.get() == m}
							on:change=on_change
						/>
						<span>{m.label()}</span>
					</label>
				</p>
			}
		})
		.collect_view()
}

/// Page of one set: tabs for members, relationships and similarity.
#[component]
pub fn SetPage(accession: String) -> impl IntoView {
	let client = use_context::<ApiClient>().unwrap_or_default();
	let failed = RwSignal::new(None::<String>);
	let fetcher = Fetcher {
		client,
		slots: StoredValue::new_local(FetchSlots::new()),
		failed,
	};
	let data = SetData::new();

	let tab = RwSignal::new(Tab::default());
	let mode = RwSignal::new(VisMode::default());
	let threshold = RwSignal::new(None::<f64>);
	let cutoff = RwSignal::new(None::<f64>);

	load_tab(&fetcher, data, tab.get_untracked(), &accession);

	let tabs = Tab::ALL
		.into_iter()
		.map(|t| {
			let fetcher = fetcher.clone();
			let accession = accession.clone();
			let on_click = move |ev: leptos::ev::MouseEvent| {
				ev.prevent_default();
				if tab.get_untracked() == t {
					return;
				}
				tab.set(t);
				load_tab(&fetcher, data, t, &accession);
			};
			view! {
				<li class="tab">
					<a href={format!("#{}", t.id())} class:active={move || tab.get() == t} on:click=on_click>
						{t.label()}
					</a>
				</li>
			}
		})
		.collect_view();

	let shown = move |t: Tab| if tab.get() == t { "block" } else { "none" };
	let network_visible = Signal::derive(move || tab.get() == Tab::Network);
	let heatmap_visible = Signal::derive(move || tab.get() == Tab::Heatmap);

	let select_fetcher = fetcher.clone();
	let on_select = Callback::new(move |member: String| {
		load_targets(&select_fetcher, data, member);
	});

	view! {
		<Title text={format!("{accession} | InterPro")} />
		<SearchBox initial={accession.clone()} />
		<h2 id="accession">{accession.clone()}</h2>
		<ErrorBanner failed=failed />
		<ul class="tabs">{tabs}</ul>

		<section id="hmmscan" class:active={move || tab.get() == Tab::Hmmscan} style:display={move || shown(Tab::Hmmscan)}>
			<div class="row">
				<div class="col s3">
					<MemberList
						members=data.members
						selected=data.selected
						on_select=on_select
					/>
				</div>
				<div class="col s9">
					<TargetsView entry=data.targets />
				</div>
			</div>
		</section>

		<section id="network" class:active={move || tab.get() == Tab::Network} style:display={move || shown(Tab::Network)}>
			<div class="row">
				<div class="col s3">
					<ThresholdInput id="rel-threshold" label="E-value threshold" value=threshold />
					<VisModeSelect mode=mode />
				</div>
				<div class="col s9 chart">
					<NetworkCanvas
						data=data.relationships
						mode=mode
						threshold=threshold
						visible=network_visible
					/>
				</div>
			</div>
		</section>

		<section id="heatmap" class:active={move || tab.get() == Tab::Heatmap} style:display={move || shown(Tab::Heatmap)}>
			<ThresholdInput id="sim-input" label="Similarity cutoff" value=cutoff />
			<Heatmap data=data.similarity cutoff=cutoff visible=heatmap_visible />
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_threshold_means_no_limit() {
		assert_eq!(parse_threshold(""), Ok(None));
		assert_eq!(parse_threshold("   "), Ok(None));
	}

	#[test]
	fn numeric_thresholds_are_accepted() {
		assert_eq!(parse_threshold("1e-5"), Ok(Some(1e-5)));
		assert_eq!(parse_threshold(" 0.25 "), Ok(Some(0.25)));
	}

	#[test]
	fn garbage_is_rejected() {
		assert_eq!(
			parse_threshold("abc"),
			Err(InputError::NotANumber("abc".to_string()))
		);
		assert_eq!(
			parse_threshold("inf"),
			Err(InputError::NotFinite("inf".to_string()))
		);
		assert_eq!(
			parse_threshold("NaN"),
			Err(InputError::NotFinite("NaN".to_string()))
		);
	}

	#[test]
	fn member_targets_name_the_member_on_failure() {
		let job = FetchJob::targets("PF00001");
		assert_eq!(job.key, ViewKey::Targets);
		assert_eq!(job.subject, "PF00001");
		assert_eq!(
			failure_message(&job.subject),
			"Could not get results for PF00001."
		);
	}

	#[test]
	fn tab_fetches_name_the_set() {
		let job = FetchJob::tab(Tab::Heatmap, "CL0192");
		assert_eq!(job.key, ViewKey::Similarity);
		assert_eq!(job.subject, "CL0192");
	}

	#[test]
	fn tabs_map_to_fetch_slots() {
		assert_eq!(Tab::default(), Tab::Hmmscan);
		assert_eq!(Tab::Network.view_key(), ViewKey::Relationships);
		assert_eq!(
			Tab::ALL.map(Tab::id),
			["hmmscan", "network", "heatmap"]
		);
	}
}
