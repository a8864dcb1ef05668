//! Scan targets of an entry and their aligned domains.
//!
//! An overview diagram stacks one 20px row per target under the entry's
//! sequence; each target card then repeats its own track at full width.
//! Domains are coloured by how the target's set relates to the entry's set,
//! darker for stronger independent E-values.

use leptos::prelude::*;

use crate::api::types::{Domain, EntryTargets, Target};
use crate::layout::{LinearScale, evalue_shade, format_exponential};

use super::container_width;
use super::theme::{Color, DomainPalette, Shades};

/// Height of one target row in the overview.
pub const ROW_HEIGHT: f64 = 20.0;
/// Space left of the overview tracks for target names.
pub const LABEL_WIDTH: f64 = 100.0;
/// Height of a per-target track.
pub const TRACK_HEIGHT: f64 = 50.0;
/// Horizontal inset of a track inside its SVG.
const TRACK_INSET: f64 = 5.0;
/// Horizontal padding of a target card.
const CARD_PADDING: f64 = 48.0;

/// How a target's set compares with the entry's set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetRelation {
	Same,
	/// The target belongs to no set.
	Unassigned,
	Other,
}

impl SetRelation {
	/// Equal sets (both absent included) count as the same set.
	pub fn of(entry_set: Option<&str>, target_set: Option<&str>) -> Self {
		match target_set {
			t if t == entry_set => SetRelation::Same,
			None => SetRelation::Unassigned,
			Some(_) => SetRelation::Other,
		}
	}

	/// Class of the set badge on a target card.
	pub fn badge_class(self) -> &'static str {
		match self {
			SetRelation::Same => "green badge label",
			SetRelation::Unassigned => "blue badge label",
			SetRelation::Other => "red badge label",
		}
	}
}

impl DomainPalette {
	/// Light to dark shades for targets with this relation.
	pub fn shades(&self, relation: SetRelation) -> &Shades {
		match relation {
			SetRelation::Same => &self.same,
			SetRelation::Unassigned => &self.unassigned,
			SetRelation::Other => &self.other,
		}
	}
}

/// Pixel extent of an aligned domain on a track.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainBox {
	pub x: f64,
	pub width: f64,
	pub start: u32,
	pub end: u32,
	pub color: Color,
}

/// Maps sequence positions onto a track `width` pixels wide.
pub fn sequence_scale(sequence_len: usize, width: f64) -> LinearScale {
	LinearScale::new(
		(0.0, sequence_len as f64),
		(TRACK_INSET, width - TRACK_INSET),
	)
}

/// Shade for an independent E-value; a missing value counts as 0.
pub fn domain_color(shades: &Shades, ievalue: Option<f64>) -> Color {
	shades[evalue_shade().apply(ievalue.unwrap_or(0.0))]
}

/// Boxes spanning `start - 1 ..= end` for each domain.
pub fn domain_boxes(domains: &[Domain], scale: &LinearScale, shades: &Shades) -> Vec<DomainBox> {
	domains
		.iter()
		.map(|d| {
			let x = scale.apply(d.start.saturating_sub(1) as f64);
			DomainBox {
				x,
				width: scale.apply(d.end as f64) - x,
				start: d.start,
				end: d.end,
				color: domain_color(shades, d.ievalue),
			}
		})
		.collect()
}

fn format_ievalue(ievalue: Option<f64>) -> String {
	ievalue.map_or_else(|| "N/A".to_string(), |v| format_exponential(v, None))
}

fn domain_group(b: DomainBox, dy: f64) -> impl IntoView {
	view! {
		<g class="domain" transform={format!("translate({},{})", b.x, dy)}>
			<rect x="0" y="20" width=b.width height="10" fill={b.color.to_css()} />
			<text x="0" y="18" text-anchor="end">{b.start}</text>
			<text x=b.width y="18">{b.end}</text>
		</g>
	}
}

fn set_badge(relation: SetRelation, set: Option<String>) -> impl IntoView {
	let class = relation.badge_class();
	match set {
		Some(set) if relation != SetRelation::Unassigned => {
			let href = format!("/set/{set}");
			view! {
				<span class=class>
					<a href=href>{set}</a>
				</span>
			}
			.into_any()
		}
		_ => view! { <span class=class>"N/A"</span> }.into_any(),
	}
}

fn target_card(
	target: Target,
	relation: SetRelation,
	palette: &DomainPalette,
	track_width: f64,
	sequence_len: usize,
) -> impl IntoView + use<> {
	let scale = sequence_scale(sequence_len, track_width);
	let boxes = domain_boxes(&target.domains, &scale, palette.shades(relation));
	let track = palette.track.to_css();
	let domain_count = target.domains.len();
	let name = target.display_name().to_string();

	let alignments = target
		.domains
		.into_iter()
		.map(|d| {
			view! {
				<div class="row">
					<div class="col s2 valign-wrapper">
						<div class="statistic">
							<span class="label">"i-Evalue"</span>
							{format_ievalue(d.ievalue)}
						</div>
					</div>
					<div class="col s10 valign-wrapper">
						<pre>{d.query}<br />{d.target}</pre>
					</div>
				</div>
			}
		})
		.collect_view();

	view! {
		<div class="card-panel">
			<div class="row">
				<div class="col s6 valign-wrapper">
					<h5 class="header">
						{name}
						<span class="subheader">{target.accession}</span>
					</h5>
				</div>
				<div class="col s2 valign-wrapper">
					<div class="statistic">
						<span class="label">"Set"</span>
						{set_badge(relation, target.set)}
					</div>
				</div>
				<div class="col s2 valign-wrapper">
					<div class="statistic">
						<span class="label">"E-value"</span>
						{format_exponential(target.evalue, None)}
					</div>
				</div>
				<div class="col s2 valign-wrapper">
					<div class="statistic">
						<span class="label">"Domains"</span>
						{domain_count}
					</div>
				</div>
			</div>
			<svg width=track_width height=TRACK_HEIGHT>
				<line x1="0" y1="25" x2=track_width y2="25" stroke=track />
				{boxes.into_iter().map(|b| domain_group(b, 0.0)).collect_view()}
			</svg>
			{alignments}
		</div>
	}
}

fn targets_panel(entry: EntryTargets, width: f64) -> impl IntoView {
	let palette = DomainPalette::default();
	let sequence_len = entry.sequence_len();
	let overview_scale = sequence_scale(sequence_len, width - LABEL_WIDTH);
	let overview_height = (entry.targets.len() + 1) as f64 * ROW_HEIGHT;
	let track = palette.track.to_css();
	let name = entry.display_name().to_string();
	let entry_set = entry.set.clone();

	let relations: Vec<SetRelation> = entry
		.targets
		.iter()
		.map(|t| SetRelation::of(entry_set.as_deref(), t.set.as_deref()))
		.collect();

	let labels = entry
		.targets
		.iter()
		.enumerate()
		.map(|(i, t)| {
			let y = ROW_HEIGHT * i as f64 + 25.0;
			view! {
				<text x={LABEL_WIDTH - 5.0} y=y text-anchor="end">
					{t.display_name().to_string()}
				</text>
			}
		})
		.collect_view();

	let rows = entry
		.targets
		.iter()
		.zip(&relations)
		.enumerate()
		.map(|(i, (t, relation))| {
			let y = 5.0 + ROW_HEIGHT * (i + 1) as f64;
			let boxes = domain_boxes(&t.domains, &overview_scale, palette.shades(*relation));
			let dy = ROW_HEIGHT * i as f64;
			view! {
				<line x1="0" y1=y x2=width y2=y stroke={track.clone()} />
				{boxes.into_iter().map(|b| domain_group(b, dy)).collect_view()}
			}
		})
		.collect_view();

	let card_width = (width - CARD_PADDING).max(0.0);
	let cards = entry
		.targets
		.into_iter()
		.zip(relations)
		.map(|(t, relation)| target_card(t, relation, &palette, card_width, sequence_len))
		.collect_view();

	view! {
		<h4>
			{name}
			<div class="subheader">{entry.accession}</div>
		</h4>
		<pre class="wrap">{entry.sequence.unwrap_or_default()}</pre>
		<svg width=width height=overview_height>
			<g class="domains" transform={format!("translate({LABEL_WIDTH})")}>{rows}</g>
			<g class="labels">{labels}</g>
		</svg>
		{cards}
	}
}

/// Targets of the selected set member, with domain diagrams.
#[component]
pub fn TargetsView(#[prop(into)] entry: Signal<Option<EntryTargets>>) -> impl IntoView {
	let container = NodeRef::<leptos::html::Div>::new();
	let width = RwSignal::new(super::FALLBACK_WIDTH);

	Effect::new(move |_| {
		entry.track();
		if let Some(div) = container.get() {
			width.set(container_width(div.client_width()));
		}
	});

	view! {
		<div id="hits" node_ref=container>
			{move || entry.get().map(|e| targets_panel(e, width.get()))}
		</div>
	}
}
