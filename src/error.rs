//! Error types

use std::fmt;

use thiserror::Error;

use crate::chain::ChainLink;

/// Raised when a registration is malformed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistrationError {
	/// The empty string is not a qualifier; it would create a second
	/// spelling of "unqualified" with divergent equality semantics.
	#[error("empty qualifier for {type_name}; register without a qualifier instead")]
	EmptyQualifier { type_name: &'static str },
}

/// Why a resolution failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolutionErrorKind {
	#[error("no registration found for {key}")]
	NotRegistered { key: String },

	#[error(
		"ambiguous resolution for {type_name}: multiple qualified registrations exist ({}); specify a qualifier",
		.qualifiers.join(", ")
	)]
	Ambiguous {
		type_name: &'static str,
		qualifiers: Vec<String>,
	},

	#[error("circular dependency detected: {path}")]
	Circular { path: String },

	#[error("maximum resolution depth exceeded ({depth})")]
	DepthExceeded { depth: usize },

	/// The typed [`Registration`](crate::Registration) constructors tie each
	/// stored value to its key's type, so no current path produces this
	/// variant; the type-erased storage boundary cannot prove that
	/// statically, and the downcast needs an error to surface through.
	#[error("registration for {expected} produced a value of a different concrete type")]
	TypeMismatch { expected: &'static str },
}

/// A resolution failure, carrying the structured trail of types traversed
/// from the top-level resolve call down to the failure point.
///
/// The chain is exposed as data via [`chain`](Self::chain) so callers can
/// program against the broken dependency edge rather than parse a message.
#[derive(Debug, Clone)]
pub struct ResolutionError {
	kind: ResolutionErrorKind,
	chain: Vec<ChainLink>,
	param: Option<&'static str>,
}

impl ResolutionError {
	pub(crate) fn new(kind: ResolutionErrorKind, chain: Vec<ChainLink>) -> Self {
		Self {
			kind,
			chain,
			param: None,
		}
	}

	pub fn kind(&self) -> &ResolutionErrorKind {
		&self.kind
	}

	/// The resolution chain, outermost request first.
	pub fn chain(&self) -> &[ChainLink] {
		&self.chain
	}

	/// Type names along the chain, outermost request first.
	pub fn chain_types(&self) -> Vec<&'static str> {
		self.chain.iter().map(ChainLink::type_name).collect()
	}

	/// The wiring parameter that could not be filled, when the failure
	/// happened while auto-wiring a dependency edge.
	pub fn param(&self) -> Option<&'static str> {
		self.param
	}

	/// Records the innermost failing parameter; later (outer) frames do not
	/// overwrite it.
	pub(crate) fn note_param(&mut self, param: &'static str) {
		self.param.get_or_insert(param);
	}
}

impl fmt::Display for ResolutionError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.kind)?;
		if let Some(param) = self.param {
			write!(f, " while wiring parameter '{param}'")?;
		}
		if !self.chain.is_empty() {
			let trail: Vec<String> = self.chain.iter().map(ToString::to_string).collect();
			write!(f, " (resolution chain: {})", trail.join(" -> "))?;
		}
		Ok(())
	}
}

impl std::error::Error for ResolutionError {}
