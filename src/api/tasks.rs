//! Keyed, cancellable fetch slots.
//!
//! Every view owns a slot. Starting a fetch for a slot supersedes the fetch
//! already running there: its request is aborted and its ticket goes stale, so
//! a slow earlier response can never overwrite a newer one.

use std::collections::HashMap;
use std::hash::Hash;

use web_sys::{AbortController, AbortSignal};

/// Which view a fetch feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKey {
	/// Members of the set.
	Members,
	/// Scan targets of the selected member.
	Targets,
	/// Relationship graph of the set.
	Relationships,
	/// Similarity matrix of the set.
	Similarity,
}

/// Proof that a fetch was started, checked before its result is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket<K> {
	key: K,
	generation: u64,
	signal: Option<AbortSignal>,
}

impl<K> FetchTicket<K> {
	/// Slot the fetch runs in.
	pub fn key(&self) -> &K {
		&self.key
	}

	/// Abort signal to hand to the request, if the slot has a controller.
	pub fn signal(&self) -> Option<&AbortSignal> {
		self.signal.as_ref()
	}
}

#[derive(Default)]
struct Slot {
	generation: u64,
	controller: Option<AbortController>,
}

/// Generation counters and abort handles per key.
pub struct FetchSlots<K> {
	slots: HashMap<K, Slot>,
	abortable: bool,
}

impl<K: Copy + Eq + Hash> FetchSlots<K> {
	/// Slots that abort superseded requests through `AbortController`.
	pub fn new() -> Self {
		Self {
			slots: HashMap::new(),
			abortable: true,
		}
	}

	/// Slots that only track generations; superseded requests run to
	/// completion and their results are dropped.
	#[cfg(test)]
	pub fn without_abort() -> Self {
		Self {
			slots: HashMap::new(),
			abortable: false,
		}
	}

	/// Start a fetch for `key`, superseding the one in flight.
	pub fn begin(&mut self, key: K) -> FetchTicket<K> {
		let slot = self.slots.entry(key).or_default();
		if let Some(previous) = slot.controller.take() {
			previous.abort();
		}
		slot.generation += 1;

		if self.abortable {
			slot.controller = AbortController::new().ok();
		}

		FetchTicket {
			key,
			generation: slot.generation,
			signal: slot.controller.as_ref().map(AbortController::signal),
		}
	}

	/// Whether `ticket` is still the latest fetch for its key.
	pub fn is_current(&self, ticket: &FetchTicket<K>) -> bool {
		self.slots
			.get(&ticket.key)
			.is_some_and(|slot| slot.generation == ticket.generation)
	}

	/// Release the slot's controller once the current fetch has resolved.
	pub fn finish(&mut self, ticket: &FetchTicket<K>) -> bool {
		match self.slots.get_mut(&ticket.key) {
			Some(slot) if slot.generation == ticket.generation => {
				slot.controller = None;
				true
			}
			_ => false,
		}
	}
}

impl<K: Copy + Eq + Hash> Default for FetchSlots<K> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn newer_ticket_supersedes_older_for_same_key() {
		let mut slots = FetchSlots::without_abort();
		let first = slots.begin(ViewKey::Relationships);
		let second = slots.begin(ViewKey::Relationships);
		assert!(!slots.is_current(&first));
		assert!(slots.is_current(&second));
	}

	#[test]
	fn keys_are_independent() {
		let mut slots = FetchSlots::without_abort();
		let network = slots.begin(ViewKey::Relationships);
		let heatmap = slots.begin(ViewKey::Similarity);
		assert!(slots.is_current(&network));
		assert!(slots.is_current(&heatmap));
	}

	#[test]
	fn finish_only_accepts_current_ticket() {
		let mut slots = FetchSlots::without_abort();
		let stale = slots.begin(ViewKey::Targets);
		let fresh = slots.begin(ViewKey::Targets);
		assert!(!slots.finish(&stale));
		assert!(slots.finish(&fresh));
		assert!(slots.is_current(&fresh));
	}

	#[test]
	fn tickets_without_abort_carry_no_signal() {
		let mut slots = FetchSlots::without_abort();
		let ticket = slots.begin(ViewKey::Members);
		assert!(ticket.signal().is_none());
		assert_eq!(ticket.key(), &ViewKey::Members);
	}
}
