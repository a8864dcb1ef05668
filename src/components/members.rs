//! Members of a set with their scan target counts.

use leptos::prelude::*;

use crate::api::types::SetMember;

/// Warning attached to a member's target count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberFlag {
	/// Some targets belong to another set.
	OtherSet,
	/// Some targets belong to no set.
	Unassigned,
	None,
}

impl MemberFlag {
	/// Another set outranks a missing one.
	pub fn of(member: &SetMember) -> Self {
		if member.targets_other_set > 0 {
			MemberFlag::OtherSet
		} else if member.targets_without_set > 0 {
			MemberFlag::Unassigned
		} else {
			MemberFlag::None
		}
	}

	fn badge_class(self) -> &'static str {
		match self {
			MemberFlag::OtherSet => "badge red-text text-darken-2",
			MemberFlag::Unassigned | MemberFlag::None => "badge",
		}
	}
}

/// Clickable member collection. `selected` highlights one accession;
/// clicking an item reports it through `on_select`.
#[component]
pub fn MemberList(
	#[prop(into)] members: Signal<Vec<SetMember>>,
	#[prop(into)] selected: Signal<Option<String>>,
	#[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
	let items = move || {
		members
			.get()
			.into_iter()
			.map(|member| {
				let flag = MemberFlag::of(&member);
				let accession = member.accession.clone();
				let name = member.display_name().to_string();
				let is_active = {
					let accession = accession.clone();
					move || selected.get().as_deref() == Some(accession.as_str())
				};
				let on_click = move |ev: leptos::ev::MouseEvent| {
					ev.prevent_default();
					on_select.run(accession.clone());
				};

				view! {
					<a href="#!" class="collection-item" class:active=is_active on:click=on_click>
						<span class={flag.badge_class()}>
							{(flag != MemberFlag::None)
								.then(|| view! { <i class="material-icons">"error_outline"</i> "\u{a0}" })}
							{member.targets}
						</span>
						{name}
					</a>
				}
			})
			.collect_view()
	};

	view! { <div class="collection" id="members">{items}</div> }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn member(other: u32, without: u32) -> SetMember {
		SetMember {
			accession: "PF00001".to_string(),
			name: None,
			targets: 12,
			targets_without_set: without,
			targets_other_set: other,
		}
	}

	#[test]
	fn other_set_takes_precedence() {
		assert_eq!(MemberFlag::of(&member(1, 3)), MemberFlag::OtherSet);
		assert_eq!(MemberFlag::of(&member(0, 3)), MemberFlag::Unassigned);
		assert_eq!(MemberFlag::of(&member(0, 0)), MemberFlag::None);
	}

	#[test]
	fn only_other_set_is_red() {
		assert_eq!(MemberFlag::OtherSet.badge_class(), "badge red-text text-darken-2");
		assert_eq!(MemberFlag::Unassigned.badge_class(), "badge");
	}
}
