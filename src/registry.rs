//! Ordered registration storage
//!
//! The registry is the leaf component: it knows nothing about resolution.
//! Entries live in an `IndexMap` because registration order is an
//! observable contract (`lookup_all` and `resolve_all` return entries in
//! the order they were registered; overwriting keeps the original slot).

use std::any::{Any, TypeId};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::ResolutionError;
use crate::key::ServiceKey;
use crate::lifecycle::Lifecycle;
use crate::registration::Dependency;
use crate::resolver::Resolver;

/// Type-erased resolved instance.
pub(crate) type Shared = Arc<dyn Any + Send + Sync>;

/// Type-erased factory; recurses through the resolver it is handed.
pub(crate) type FactoryFn =
	Arc<dyn Fn(&mut Resolver<'_>) -> Result<Shared, ResolutionError> + Send + Sync>;

pub(crate) struct RegistryEntry {
	pub factory: FactoryFn,
	pub lifecycle: Lifecycle,
	/// Present only for singletons that resolved at least once.
	pub cached: Option<Shared>,
	pub dependencies: Vec<Dependency>,
}

#[derive(Default)]
pub(crate) struct Registry {
	entries: IndexMap<ServiceKey, RegistryEntry>,
}

impl Registry {
	/// Inserts or replaces the entry for `key`. Returns `true` when a prior
	/// entry (and with it any cached singleton) was dropped.
	pub fn insert(&mut self, key: ServiceKey, entry: RegistryEntry) -> bool {
		self.entries.insert(key, entry).is_some()
	}

	pub fn get(&self, key: &ServiceKey) -> Option<&RegistryEntry> {
		self.entries.get(key)
	}

	pub fn get_mut(&mut self, key: &ServiceKey) -> Option<&mut RegistryEntry> {
		self.entries.get_mut(key)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&ServiceKey, &RegistryEntry)> {
		self.entries.iter()
	}

	/// Every key registered for `type_id`, in registration order.
	pub fn keys_for(&self, type_id: TypeId) -> Vec<ServiceKey> {
		self.entries
			.keys()
			// qualified call: `Any` is in scope here, and on the iterator's
			// double reference `key.type_id()` would pick `Any::type_id`
			.filter(|key| ServiceKey::type_id(key) == type_id)
			.cloned()
			.collect()
	}

	/// The qualifiers registered for `type_id`, in registration order;
	/// the unqualified slot does not contribute.
	pub fn qualifiers_for(&self, type_id: TypeId) -> Vec<String> {
		self.entries
			.keys()
			.filter(|key| ServiceKey::type_id(key) == type_id)
			.filter_map(|key| key.qualifier().map(str::to_owned))
			.collect()
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Read-only view of one registration slot, as returned by
/// [`Container::lookup`](crate::Container::lookup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInfo {
	type_name: &'static str,
	qualifier: Option<String>,
	lifecycle: Lifecycle,
	resolved: bool,
}

impl RegistrationInfo {
	pub(crate) fn from_entry(key: &ServiceKey, entry: &RegistryEntry) -> Self {
		Self {
			type_name: key.type_name(),
			qualifier: key.qualifier().map(str::to_owned),
			lifecycle: entry.lifecycle,
			resolved: entry.cached.is_some(),
		}
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn qualifier(&self) -> Option<&str> {
		self.qualifier.as_deref()
	}

	pub fn lifecycle(&self) -> Lifecycle {
		self.lifecycle
	}

	/// Whether a singleton instance is currently cached for this slot.
	pub fn resolved(&self) -> bool {
		self.resolved
	}
}
