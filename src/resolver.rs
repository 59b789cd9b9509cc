//! Recursive resolution over the locked registry

use std::any::type_name;
use std::sync::Arc;

use tracing::trace;

use crate::chain::{ChainLink, ResolutionChain};
use crate::error::{ResolutionError, ResolutionErrorKind};
use crate::key::ServiceKey;
use crate::lifecycle::Lifecycle;
use crate::registry::{Registry, Shared};

/// Recursive resolution handle passed to factories.
///
/// A `Resolver` borrows the container's registry for the duration of one
/// top-level resolve call, which is also the scope of the container lock;
/// recursion happens through the borrow, never by re-locking. Factories
/// satisfy their own dependencies through it; calling back into the
/// [`Container`](crate::Container) from inside a factory deadlocks.
pub struct Resolver<'a> {
	registry: &'a mut Registry,
	chain: ResolutionChain,
}

impl<'a> Resolver<'a> {
	pub(crate) fn new(registry: &'a mut Registry) -> Self {
		Self {
			registry,
			chain: ResolutionChain::new(),
		}
	}

	/// Resolves the unqualified slot for `T`.
	pub fn resolve<T: Send + Sync + 'static>(&mut self) -> Result<Arc<T>, ResolutionError> {
		self.resolve_erased(ServiceKey::of::<T>(), None)
			.and_then(downcast::<T>)
	}

	/// Resolves the slot for `T` under `qualifier`.
	pub fn resolve_qualified<T: Send + Sync + 'static>(
		&mut self,
		qualifier: &str,
	) -> Result<Arc<T>, ResolutionError> {
		self.resolve_erased(ServiceKey::qualified::<T>(qualifier), None)
			.and_then(downcast::<T>)
	}

	/// Auto-wires one dependency edge, tagged with the parameter it fills.
	///
	/// Qualifiers do not propagate through auto-wiring: this always reads
	/// the unqualified slot. A qualified edge needs
	/// [`qualified_dependency`](Self::qualified_dependency).
	pub fn dependency<T: Send + Sync + 'static>(
		&mut self,
		param: &'static str,
	) -> Result<Arc<T>, ResolutionError> {
		self.resolve_erased(ServiceKey::of::<T>(), Some(param))
			.and_then(downcast::<T>)
			.map_err(|mut err| {
				err.note_param(param);
				err
			})
	}

	/// Auto-wires one explicitly qualified dependency edge.
	pub fn qualified_dependency<T: Send + Sync + 'static>(
		&mut self,
		param: &'static str,
		qualifier: &str,
	) -> Result<Arc<T>, ResolutionError> {
		self.resolve_erased(ServiceKey::qualified::<T>(qualifier), Some(param))
			.and_then(downcast::<T>)
			.map_err(|mut err| {
				err.note_param(param);
				err
			})
	}

	pub(crate) fn resolve_key(&mut self, key: ServiceKey) -> Result<Shared, ResolutionError> {
		self.resolve_erased(key, None)
	}

	fn resolve_erased(
		&mut self,
		key: ServiceKey,
		param: Option<&'static str>,
	) -> Result<Shared, ResolutionError> {
		if self.chain.contains(key.type_id()) {
			return Err(self.chain.cycle_error(key.type_id(), key.type_name()));
		}

		self.chain.push(ChainLink::new(
			key.type_id(),
			key.type_name(),
			key.qualifier().map(str::to_owned),
			param,
		))?;
		let result = self.resolve_in_frame(&key);
		// the frame is popped even when a factory swallows the error, so a
		// recovered failure cannot leave stale cycle state behind
		self.chain.pop();
		result
	}

	fn resolve_in_frame(&mut self, key: &ServiceKey) -> Result<Shared, ResolutionError> {
		let (factory, lifecycle) = match self.registry.get(key) {
			Some(entry) => {
				if entry.lifecycle == Lifecycle::Singleton {
					if let Some(cached) = &entry.cached {
						trace!(key = %key, "singleton cache hit");
						return Ok(cached.clone());
					}
				}
				(entry.factory.clone(), entry.lifecycle)
			}
			None => return self.resolve_fallback(key),
		};

		trace!(key = %key, lifecycle = %lifecycle, "invoking factory");
		let instance = (factory)(self)?;

		if lifecycle == Lifecycle::Singleton {
			if let Some(entry) = self.registry.get_mut(key) {
				entry.cached = Some(instance.clone());
			}
		}

		Ok(instance)
	}

	/// Unqualified miss: falls back to a lone qualified registration of the
	/// type, or reports ambiguity when several exist.
	fn resolve_fallback(&mut self, key: &ServiceKey) -> Result<Shared, ResolutionError> {
		if key.qualifier().is_none() {
			let mut qualifiers = self.registry.qualifiers_for(key.type_id());
			if qualifiers.len() == 1 {
				let qualifier = qualifiers.remove(0);
				let qualified = key.clone().with_qualifier(Some(qualifier));
				return self.resolve_in_frame(&qualified);
			}
			if qualifiers.len() > 1 {
				qualifiers.sort();
				return Err(ResolutionError::new(
					ResolutionErrorKind::Ambiguous {
						type_name: key.type_name(),
						qualifiers,
					},
					self.chain.snapshot(),
				));
			}
		}

		Err(ResolutionError::new(
			ResolutionErrorKind::NotRegistered {
				key: key.to_string(),
			},
			self.chain.snapshot(),
		))
	}
}

pub(crate) fn downcast<T: Send + Sync + 'static>(shared: Shared) -> Result<Arc<T>, ResolutionError> {
	shared.downcast::<T>().map_err(|_| {
		ResolutionError::new(
			ResolutionErrorKind::TypeMismatch {
				expected: type_name::<T>(),
			},
			Vec::new(),
		)
	})
}
