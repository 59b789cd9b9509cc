//! Resolution chain: cycle detection and diagnostic trails
//!
//! Every top-level resolve call owns one chain. Each type entered during
//! recursion pushes a frame; a `HashSet<TypeId>` alongside the frame list
//! gives O(1) cycle checks, and a depth cap guards against pathological
//! registration graphs.

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;

use crate::error::{ResolutionError, ResolutionErrorKind};

/// Maximum resolution depth (prevents pathological cases).
pub const MAX_RESOLUTION_DEPTH: usize = 100;

/// One frame of the trail of types currently being resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
	type_id: TypeId,
	type_name: &'static str,
	qualifier: Option<String>,
	param: Option<&'static str>,
}

impl ChainLink {
	pub(crate) fn new(
		type_id: TypeId,
		type_name: &'static str,
		qualifier: Option<String>,
		param: Option<&'static str>,
	) -> Self {
		Self {
			type_id,
			type_name,
			qualifier,
			param,
		}
	}

	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn qualifier(&self) -> Option<&str> {
		self.qualifier.as_deref()
	}

	/// The wiring parameter this frame was entered through, if any.
	pub fn param(&self) -> Option<&'static str> {
		self.param
	}
}

impl fmt::Display for ChainLink {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.qualifier {
			Some(qualifier) => write!(f, "{}[{}]", self.type_name, qualifier),
			None => f.write_str(self.type_name),
		}
	}
}

#[derive(Debug, Default)]
pub(crate) struct ResolutionChain {
	links: Vec<ChainLink>,
	active: HashSet<TypeId>,
}

impl ResolutionChain {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains(&self, type_id: TypeId) -> bool {
		self.active.contains(&type_id)
	}

	pub fn push(&mut self, link: ChainLink) -> Result<(), ResolutionError> {
		if self.links.len() >= MAX_RESOLUTION_DEPTH {
			let mut chain = self.links.clone();
			chain.push(link);
			let depth = chain.len();
			return Err(ResolutionError::new(
				ResolutionErrorKind::DepthExceeded { depth },
				chain,
			));
		}
		self.active.insert(link.type_id);
		self.links.push(link);
		Ok(())
	}

	pub fn pop(&mut self) {
		if let Some(link) = self.links.pop() {
			// a type never appears twice (the cycle check runs first), so
			// removing it from the set cannot drop an outer frame's entry
			self.active.remove(&link.type_id);
		}
	}

	pub fn snapshot(&self) -> Vec<ChainLink> {
		self.links.clone()
	}

	/// Builds the `A -> B -> A` error for a request that is already on the
	/// chain.
	pub fn cycle_error(&self, type_id: TypeId, type_name: &'static str) -> ResolutionError {
		let path = match self.links.iter().position(|link| link.type_id == type_id) {
			Some(start) => {
				let mut names: Vec<&str> = self.links[start..]
					.iter()
					.map(|link| link.type_name)
					.collect();
				names.push(type_name);
				names.join(" -> ")
			}
			None => format!("cycle involving {type_name}"),
		};
		ResolutionError::new(ResolutionErrorKind::Circular { path }, self.snapshot())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct TypeA;
	struct TypeB;
	struct TypeC;

	fn link<T: 'static>(name: &'static str) -> ChainLink {
		ChainLink::new(TypeId::of::<T>(), name, None, None)
	}

	#[test]
	fn push_and_pop_track_active_types() {
		let mut chain = ResolutionChain::new();
		chain.push(link::<TypeA>("TypeA")).unwrap();
		assert!(chain.contains(TypeId::of::<TypeA>()));

		chain.pop();
		assert!(!chain.contains(TypeId::of::<TypeA>()));
	}

	#[test]
	fn cycle_error_lists_the_full_loop() {
		let mut chain = ResolutionChain::new();
		chain.push(link::<TypeA>("TypeA")).unwrap();
		chain.push(link::<TypeB>("TypeB")).unwrap();
		chain.push(link::<TypeC>("TypeC")).unwrap();

		let err = chain.cycle_error(TypeId::of::<TypeA>(), "TypeA");
		match err.kind() {
			ResolutionErrorKind::Circular { path } => {
				assert_eq!(path, "TypeA -> TypeB -> TypeC -> TypeA");
			}
			other => panic!("expected Circular, got {other:?}"),
		}
		assert_eq!(err.chain().len(), 3);
	}

	#[rstest]
	#[case::from_middle(TypeId::of::<TypeB>(), "TypeB -> TypeC -> TypeB")]
	#[case::from_tail(TypeId::of::<TypeC>(), "TypeC -> TypeC")]
	fn cycle_path_starts_at_the_repeated_type(#[case] repeat: TypeId, #[case] expected: &str) {
		let mut chain = ResolutionChain::new();
		chain.push(link::<TypeA>("TypeA")).unwrap();
		chain.push(link::<TypeB>("TypeB")).unwrap();
		chain.push(link::<TypeC>("TypeC")).unwrap();

		let name = if repeat == TypeId::of::<TypeB>() {
			"TypeB"
		} else {
			"TypeC"
		};
		let err = chain.cycle_error(repeat, name);
		match err.kind() {
			ResolutionErrorKind::Circular { path } => assert_eq!(path, expected),
			other => panic!("expected Circular, got {other:?}"),
		}
	}

	#[test]
	fn depth_limit_trips_past_the_cap() {
		let mut chain = ResolutionChain::new();
		for _ in 0..MAX_RESOLUTION_DEPTH {
			chain.push(link::<TypeA>("TypeA")).unwrap();
		}

		let err = chain.push(link::<TypeB>("TypeB")).unwrap_err();
		match err.kind() {
			ResolutionErrorKind::DepthExceeded { depth } => {
				assert_eq!(*depth, MAX_RESOLUTION_DEPTH + 1);
			}
			other => panic!("expected DepthExceeded, got {other:?}"),
		}
	}
}
