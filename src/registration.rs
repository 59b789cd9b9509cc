//! Registration builder and dependency descriptors

use std::any::type_name;
use std::sync::Arc;

use crate::error::ResolutionError;
use crate::injectable::Injectable;
use crate::key::ServiceKey;
use crate::lifecycle::Lifecycle;
use crate::registry::{FactoryFn, Shared};
use crate::resolver::Resolver;

/// A declared dependency edge, named after the wiring parameter it fills.
///
/// Rust cannot introspect a constructor's signature at runtime, so the
/// parameter list is declared as data at registration time. The engine uses
/// it for graph export; the actual wiring happens in the factory itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
	type_name: &'static str,
	param: &'static str,
	qualifier: Option<&'static str>,
}

impl Dependency {
	/// An unqualified edge filling `param` with the default slot of `T`.
	pub fn of<T: 'static>(param: &'static str) -> Self {
		Self {
			type_name: type_name::<T>(),
			param,
			qualifier: None,
		}
	}

	/// An edge filling `param` from the slot of `T` under `qualifier`.
	pub fn qualified<T: 'static>(param: &'static str, qualifier: &'static str) -> Self {
		Self {
			type_name: type_name::<T>(),
			param,
			qualifier: Some(qualifier),
		}
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn param(&self) -> &'static str {
		self.param
	}

	pub fn qualifier(&self) -> Option<&'static str> {
		self.qualifier
	}

	/// The registry slot this edge reads, rendered like a [`ServiceKey`].
	pub fn slot_label(&self) -> String {
		match self.qualifier {
			Some(qualifier) => format!("{}[{}]", self.type_name, qualifier),
			None => self.type_name.to_string(),
		}
	}
}

/// One registration, built fluently and handed to
/// [`Container::register`](crate::Container::register).
///
/// Defaults: unqualified, [`Lifecycle::Singleton`].
///
/// # Examples
///
/// ```
/// use wirebox::{Container, Lifecycle, Registration, Resolver};
///
/// struct Config {
/// 	port: u16,
/// }
///
/// let container = Container::new();
/// container.register(
/// 	Registration::factory(|_: &mut Resolver<'_>| Ok(Config { port: 8080 }))
/// 		.lifecycle(Lifecycle::Transient),
/// )?;
///
/// assert_eq!(container.resolve::<Config>()?.port, 8080);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Registration {
	pub(crate) key: ServiceKey,
	pub(crate) lifecycle: Lifecycle,
	pub(crate) factory: FactoryFn,
	pub(crate) dependencies: Vec<Dependency>,
}

impl Registration {
	/// Registers `T` with its own [`Injectable::wire`] as the factory: the
	/// "the type is its own factory" form.
	pub fn of<T: Injectable>() -> Self {
		Self {
			key: ServiceKey::of::<T>(),
			lifecycle: Lifecycle::Singleton,
			factory: Arc::new(|resolver: &mut Resolver<'_>| {
				T::wire(resolver).map(|value| Arc::new(value) as Shared)
			}),
			dependencies: T::dependencies(),
		}
	}

	/// Registers an arbitrary factory for `T`. The factory resolves its own
	/// dependencies through the [`Resolver`] it is handed.
	pub fn factory<T, F>(factory: F) -> Self
	where
		T: Send + Sync + 'static,
		F: Fn(&mut Resolver<'_>) -> Result<T, ResolutionError> + Send + Sync + 'static,
	{
		Self {
			key: ServiceKey::of::<T>(),
			lifecycle: Lifecycle::Singleton,
			factory: Arc::new(move |resolver: &mut Resolver<'_>| {
				factory(resolver).map(|value| Arc::new(value) as Shared)
			}),
			dependencies: Vec::new(),
		}
	}

	/// Registers a pre-built instance. The same shared value is handed out
	/// on every resolution, regardless of lifecycle.
	pub fn value<T: Send + Sync + 'static>(value: T) -> Self {
		let shared = Arc::new(value);
		Self {
			key: ServiceKey::of::<T>(),
			lifecycle: Lifecycle::Singleton,
			factory: Arc::new(move |_: &mut Resolver<'_>| Ok(shared.clone() as Shared)),
			dependencies: Vec::new(),
		}
	}

	/// Registers under a qualifier instead of the unqualified default slot.
	pub fn qualified(mut self, qualifier: impl Into<String>) -> Self {
		self.key = self.key.with_qualifier(Some(qualifier.into()));
		self
	}

	pub fn lifecycle(mut self, lifecycle: Lifecycle) -> Self {
		self.lifecycle = lifecycle;
		self
	}

	/// Shorthand for `.lifecycle(Lifecycle::Transient)`.
	pub fn transient(self) -> Self {
		self.lifecycle(Lifecycle::Transient)
	}

	/// Declares a dependency edge for graph export. [`Registration::of`]
	/// takes these from [`Injectable::dependencies`]; factory registrations
	/// declare theirs here.
	pub fn depends_on(mut self, dependency: Dependency) -> Self {
		self.dependencies.push(dependency);
		self
	}
}
