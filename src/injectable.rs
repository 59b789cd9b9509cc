//! Injectable trait: auto-wiring for constructible types

use std::sync::Arc;

use crate::error::ResolutionError;
use crate::registration::Dependency;
use crate::resolver::Resolver;

/// A type that can construct itself from the container.
///
/// `wire` plays the role of a constructor whose parameter list the engine
/// walks: each [`Resolver::dependency`] call is one auto-wired parameter,
/// and [`dependencies`](Self::dependencies) mirrors that list as data for
/// graph export. Parameters with defaults are supplied literally inside
/// `wire` and never touch the container.
///
/// # Examples
///
/// ```
/// use wirebox::{Container, Dependency, Injectable, Registration, ResolutionError, Resolver};
/// use std::sync::Arc;
///
/// struct Database;
///
/// struct Repository {
/// 	db: Arc<Database>,
/// 	timeout_secs: u64,
/// }
///
/// impl Injectable for Repository {
/// 	fn wire(resolver: &mut Resolver<'_>) -> Result<Self, ResolutionError> {
/// 		Ok(Self {
/// 			db: resolver.dependency::<Database>("db")?,
/// 			// defaulted parameter: supplied here, never resolved
/// 			timeout_secs: 30,
/// 		})
/// 	}
///
/// 	fn dependencies() -> Vec<Dependency> {
/// 		vec![Dependency::of::<Database>("db")]
/// 	}
/// }
///
/// let container = Container::new();
/// container.register(Registration::factory(|_: &mut Resolver<'_>| Ok(Database)))?;
/// container.register(Registration::of::<Repository>())?;
///
/// let repo = container.resolve::<Repository>()?;
/// assert_eq!(repo.timeout_secs, 30);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
	fn wire(resolver: &mut Resolver<'_>) -> Result<Self, ResolutionError>;

	/// Declared dependency edges, used for graph export.
	fn dependencies() -> Vec<Dependency> {
		Vec::new()
	}
}

/// `Arc<T>` wires by wiring `T` and wrapping it, so services that hold
/// their dependencies behind `Arc` can be registered directly.
impl<T: Injectable> Injectable for Arc<T> {
	fn wire(resolver: &mut Resolver<'_>) -> Result<Self, ResolutionError> {
		T::wire(resolver).map(Arc::new)
	}

	fn dependencies() -> Vec<Dependency> {
		T::dependencies()
	}
}
