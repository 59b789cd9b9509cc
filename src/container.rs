//! The container: shared registry plus resolution entry points

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{RegistrationError, ResolutionError};
use crate::graph::DependencyGraph;
use crate::key::ServiceKey;
use crate::registration::Registration;
use crate::registry::{Registry, RegistrationInfo, RegistryEntry};
use crate::resolver::{Resolver, downcast};

/// Thread-safe dependency container.
///
/// The container is an explicitly constructed context object: build one,
/// pass it around (or hold it in an `Arc`), and [`reset`](Self::reset) it
/// between tests. All registry access, including the singleton
/// check-cache → invoke-factory → store-cache sequence, runs under one
/// internal lock, so concurrent resolves of the same unresolved singleton
/// invoke its factory exactly once.
///
/// # Examples
///
/// ```
/// use wirebox::{Container, Registration, Resolver};
/// use std::sync::Arc;
///
/// struct Greeter {
/// 	greeting: String,
/// }
///
/// let container = Container::new();
/// container.register(Registration::factory(|_: &mut Resolver<'_>| {
/// 	Ok(Greeter {
/// 		greeting: "hello".to_string(),
/// 	})
/// }))?;
///
/// let a = container.resolve::<Greeter>()?;
/// let b = container.resolve::<Greeter>()?;
/// assert!(Arc::ptr_eq(&a, &b)); // singleton by default
/// assert_eq!(a.greeting, "hello");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Container {
	registry: Mutex<Registry>,
}

impl Container {
	pub fn new() -> Self {
		Self {
			registry: Mutex::new(Registry::default()),
		}
	}

	/// Inserts or replaces the entry for the registration's `(type,
	/// qualifier)` key. Replacing drops any cached singleton for that key.
	///
	/// Fails only on an empty-string qualifier; use an unqualified
	/// registration for the default slot instead.
	pub fn register(&self, registration: Registration) -> Result<(), RegistrationError> {
		if registration.key.qualifier() == Some("") {
			return Err(RegistrationError::EmptyQualifier {
				type_name: registration.key.type_name(),
			});
		}

		let Registration {
			key,
			lifecycle,
			factory,
			dependencies,
		} = registration;
		let entry = RegistryEntry {
			factory,
			lifecycle,
			cached: None,
			dependencies,
		};

		let replaced = self.registry.lock().insert(key.clone(), entry);
		if replaced {
			debug!(key = %key, lifecycle = %lifecycle, "registration replaced, cached instance dropped");
		} else {
			debug!(key = %key, lifecycle = %lifecycle, "registered");
		}
		Ok(())
	}

	/// Resolves the unqualified slot for `T`, recursively wiring its
	/// dependency graph.
	///
	/// When only qualified registrations of `T` exist, a lone one is used
	/// as the fallback; several produce an
	/// [`Ambiguous`](crate::ResolutionErrorKind::Ambiguous) error.
	pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolutionError> {
		let mut registry = self.registry.lock();
		Resolver::new(&mut registry).resolve::<T>()
	}

	/// Resolves the slot for `T` under `qualifier`.
	pub fn resolve_qualified<T: Send + Sync + 'static>(
		&self,
		qualifier: &str,
	) -> Result<Arc<T>, ResolutionError> {
		let mut registry = self.registry.lock();
		Resolver::new(&mut registry).resolve_qualified::<T>(qualifier)
	}

	/// Resolves every registration of `T` across all qualifiers, in
	/// registration order. Nothing registered is `Ok(vec![])`, not an
	/// error; a broken dependency of any entry still fails the call.
	pub fn resolve_all<T: Send + Sync + 'static>(&self) -> Result<Vec<Arc<T>>, ResolutionError> {
		let mut registry = self.registry.lock();
		let keys = registry.keys_for(TypeId::of::<T>());
		let mut instances = Vec::with_capacity(keys.len());
		for key in keys {
			// each entry gets a fresh chain: entries are independent
			// top-level resolutions that only share the lock
			let shared = Resolver::new(&mut registry).resolve_key(key)?;
			instances.push(downcast::<T>(shared)?);
		}
		Ok(instances)
	}

	/// Pure read of one registration slot.
	pub fn lookup<T: 'static>(&self, qualifier: Option<&str>) -> Option<RegistrationInfo> {
		let key = ServiceKey::of::<T>().with_qualifier(qualifier.map(str::to_owned));
		let registry = self.registry.lock();
		registry
			.get(&key)
			.map(|entry| RegistrationInfo::from_entry(&key, entry))
	}

	/// Every registration of `T`, in registration order.
	pub fn lookup_all<T: 'static>(&self) -> Vec<RegistrationInfo> {
		let registry = self.registry.lock();
		registry
			.iter()
			.filter(|(key, _)| key.type_id() == TypeId::of::<T>())
			.map(|(key, entry)| RegistrationInfo::from_entry(key, entry))
			.collect()
	}

	pub fn is_registered<T: 'static>(&self, qualifier: Option<&str>) -> bool {
		self.lookup::<T>(qualifier).is_some()
	}

	/// Clears all entries and cached instances. Intended for test
	/// isolation; not safe against in-flight resolutions in the sense that
	/// callers holding previously resolved `Arc`s keep them.
	pub fn reset(&self) {
		self.registry.lock().clear();
		debug!("container reset");
	}

	pub fn len(&self) -> usize {
		self.registry.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.registry.lock().is_empty()
	}

	/// Snapshot of the registered entries and their declared dependency
	/// edges, for DOT export.
	pub fn graph(&self) -> DependencyGraph {
		let registry = self.registry.lock();
		let mut graph = DependencyGraph::new();
		for (key, entry) in registry.iter() {
			graph.add_node(key.to_string(), entry.lifecycle);
			for dependency in &entry.dependencies {
				graph.add_dependency(key.to_string(), dependency.slot_label());
			}
		}
		graph
	}
}

impl Default for Container {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Container {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Container")
			.field("registered", &self.len())
			.finish()
	}
}
