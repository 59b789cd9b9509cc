//! # wirebox
//!
//! A lightweight dependency injection container: an explicitly constructed
//! registry mapping `(type, qualifier)` slots to factories, plus a resolver
//! that recursively wires whole object graphs.
//!
//! ## Features
//!
//! - **Typed**: registrations and resolutions are checked at the API level;
//!   type erasure stays internal
//! - **Lifecycles**: `Singleton` (cached, shared) or `Transient` (fresh per
//!   resolution)
//! - **Qualifiers**: multiple labeled implementations of one type, with
//!   [`Container::resolve_all`] returning them in registration order
//! - **Diagnostics**: failures carry the structured resolution chain;
//!   cycles are detected deterministically with the full loop in the error
//! - **Thread-safe**: one lock covers check-cache → invoke-factory →
//!   store-cache, so a singleton factory runs at most once even under
//!   concurrent resolution
//!
//! ## Example
//!
//! ```
//! use wirebox::{Container, Dependency, Injectable, Registration, ResolutionError, Resolver};
//! use std::sync::Arc;
//!
//! struct Database {
//! 	url: String,
//! }
//!
//! struct Repository {
//! 	db: Arc<Database>,
//! }
//!
//! impl Injectable for Repository {
//! 	fn wire(resolver: &mut Resolver<'_>) -> Result<Self, ResolutionError> {
//! 		Ok(Self {
//! 			db: resolver.dependency::<Database>("db")?,
//! 		})
//! 	}
//!
//! 	fn dependencies() -> Vec<Dependency> {
//! 		vec![Dependency::of::<Database>("db")]
//! 	}
//! }
//!
//! let container = Container::new();
//! container.register(Registration::factory(|_: &mut Resolver<'_>| {
//! 	Ok(Database {
//! 		url: "postgres://localhost".to_string(),
//! 	})
//! }))?;
//! container.register(Registration::of::<Repository>())?;
//!
//! let repo = container.resolve::<Repository>()?;
//! assert_eq!(repo.db.url, "postgres://localhost");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chain;
mod container;
mod error;
mod injectable;
mod key;
mod lifecycle;
mod registration;
mod registry;
mod resolver;

pub mod graph;

pub use chain::{ChainLink, MAX_RESOLUTION_DEPTH};
pub use container::Container;
pub use error::{RegistrationError, ResolutionError, ResolutionErrorKind};
pub use injectable::Injectable;
pub use key::ServiceKey;
pub use lifecycle::Lifecycle;
pub use registration::{Dependency, Registration};
pub use registry::RegistrationInfo;
pub use resolver::Resolver;
