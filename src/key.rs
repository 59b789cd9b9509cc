//! Composite registry key

use std::any::{TypeId, type_name};
use std::fmt;

/// Identifies one registration slot: a concrete type plus an optional
/// qualifier label.
///
/// `None` is the unqualified default slot for the type. The empty string is
/// rejected at registration so that "unqualified" has exactly one spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceKey {
	type_id: TypeId,
	type_name: &'static str,
	qualifier: Option<String>,
}

impl ServiceKey {
	/// Key for the unqualified slot of `T`.
	pub fn of<T: 'static>() -> Self {
		Self {
			type_id: TypeId::of::<T>(),
			type_name: type_name::<T>(),
			qualifier: None,
		}
	}

	/// Key for the slot of `T` under `qualifier`.
	pub fn qualified<T: 'static>(qualifier: impl Into<String>) -> Self {
		Self {
			type_id: TypeId::of::<T>(),
			type_name: type_name::<T>(),
			qualifier: Some(qualifier.into()),
		}
	}

	pub(crate) fn with_qualifier(mut self, qualifier: Option<String>) -> Self {
		self.qualifier = qualifier;
		self
	}

	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn qualifier(&self) -> Option<&str> {
		self.qualifier.as_deref()
	}
}

impl fmt::Display for ServiceKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.qualifier {
			Some(qualifier) => write!(f, "{}[{}]", self.type_name, qualifier),
			None => f.write_str(self.type_name),
		}
	}
}
