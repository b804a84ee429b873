//! Scope inputs and the identity-enforcing normalization applied at construction.

// self
use crate::_prelude::*;

/// Scope Reddit requires for the profile endpoint; always present after normalization.
pub const IDENTITY_SCOPE: &str = "identity";
/// Delimiter Reddit expects between scope entries.
pub const SCOPE_DELIMITER: char = ',';
/// Delimiter used when the caller neither passes a list nor overrides the separator.
pub const DEFAULT_SCOPE_SEPARATOR: char = ' ';

/// Caller-supplied scope, either as discrete entries or a comma-delimited string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeInput {
	/// Discrete scope entries, joined with [`SCOPE_DELIMITER`].
	List(Vec<String>),
	/// Comma-delimited scope string; empty segments are ignored.
	Delimited(String),
}
impl From<&str> for ScopeInput {
	fn from(value: &str) -> Self {
		Self::Delimited(value.to_owned())
	}
}
impl From<String> for ScopeInput {
	fn from(value: String) -> Self {
		Self::Delimited(value)
	}
}
impl<S> From<Vec<S>> for ScopeInput
where
	S: Into<String>,
{
	fn from(value: Vec<S>) -> Self {
		Self::List(value.into_iter().map(Into::into).collect())
	}
}
impl<S, const N: usize> From<[S; N]> for ScopeInput
where
	S: Into<String>,
{
	fn from(value: [S; N]) -> Self {
		Self::List(value.into_iter().map(Into::into).collect())
	}
}

/// Normalized scope string plus the separator it was joined with.
///
/// The value always contains [`IDENTITY_SCOPE`]. List inputs keep the caller's order and
/// gain a trailing `identity` entry joined by
/// [`SCOPE_DELIMITER`]; delimited strings drop empty segments and lead with `identity`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedScope {
	value: String,
	separator: char,
}
impl RequestedScope {
	/// Normalizes an optional caller scope.
	///
	/// `separator` is the caller's preferred separator; list inputs always override it
	/// with [`SCOPE_DELIMITER`].
	pub fn normalize(input: Option<ScopeInput>, separator: Option<char>) -> Self {
		let separator = separator.unwrap_or(DEFAULT_SCOPE_SEPARATOR);

		match input {
			Some(ScopeInput::List(mut entries)) => {
				entries.push(IDENTITY_SCOPE.to_owned());

				let mut value = String::new();

				for (idx, entry) in entries.iter().enumerate() {
					if idx > 0 {
						value.push(SCOPE_DELIMITER);
					}

					value.push_str(entry);
				}

				Self { value, separator: SCOPE_DELIMITER }
			},
			Some(ScopeInput::Delimited(raw)) => {
				let mut value = String::from(IDENTITY_SCOPE);

				for segment in raw
					.split(SCOPE_DELIMITER)
					.filter(|segment| !segment.is_empty())
				{
					value.push(SCOPE_DELIMITER);
					value.push_str(segment);
				}

				Self { value, separator }
			},
			None => Self { value: IDENTITY_SCOPE.to_owned(), separator },
		}
	}

	/// Normalized scope string sent as the `scope` authorization parameter.
	pub fn as_str(&self) -> &str {
		&self.value
	}

	/// Separator recorded for the scope.
	pub fn separator(&self) -> char {
		self.separator
	}

	/// Iterator over individual scope entries.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.value.split(SCOPE_DELIMITER).filter(|entry| !entry.is_empty())
	}

	/// Returns true if the normalized scope contains `scope` as a discrete entry.
	pub fn contains(&self, scope: &str) -> bool {
		self.iter().any(|entry| entry == scope)
	}
}
impl Default for RequestedScope {
	fn default() -> Self {
		Self::normalize(None, None)
	}
}
impl AsRef<str> for RequestedScope {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
impl Debug for RequestedScope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("RequestedScope").field(&self.value).field(&self.separator).finish()
	}
}
impl Display for RequestedScope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.value)
	}
}
