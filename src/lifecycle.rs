//! Instance lifecycle policies

use std::fmt;

/// Governs how often a registration's factory runs.
///
/// # Examples
///
/// ```
/// use wirebox::Lifecycle;
///
/// assert_eq!(Lifecycle::default(), Lifecycle::Singleton);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
	/// The factory runs at most once; the instance is cached and shared.
	#[default]
	Singleton,
	/// The factory runs on every resolution.
	Transient,
}

impl Lifecycle {
	pub fn as_str(&self) -> &'static str {
		match self {
			Lifecycle::Singleton => "singleton",
			Lifecycle::Transient => "transient",
		}
	}
}

impl fmt::Display for Lifecycle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
