//! Canonical user profile handed to the host verify callback.

// self
use crate::_prelude::*;

/// Normalized Reddit account profile.
///
/// `raw` keeps the exact response body and `json` the parsed document so hosts can read
/// fields the normalizer does not lift (`icon_img`, `created_utc`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
	/// Provider label; fixed by the strategy, never read from the response.
	pub provider: String,
	/// Reddit account identifier (base36, without the `t2_` prefix).
	pub id: String,
	/// Reddit username.
	pub name: String,
	/// Karma earned from link submissions.
	pub link_karma: i64,
	/// Karma earned from comments.
	pub comment_karma: i64,
	/// Original response body.
	#[serde(rename = "_raw")]
	pub raw: String,
	/// Parsed response body.
	#[serde(rename = "_json")]
	pub json: JsonValue,
}
impl Profile {
	/// Total karma across links and comments.
	pub fn total_karma(&self) -> i64 {
		self.link_karma.saturating_add(self.comment_karma)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn profile_serializes_with_underscored_raw_fields() {
		let profile = Profile {
			provider: "reddit".into(),
			id: "woohoo".into(),
			name: "redditor".into(),
			link_karma: 100,
			comment_karma: 900,
			raw: "{}".into(),
			json: serde_json::json!({}),
		};
		let value = serde_json::to_value(&profile).expect("Profile should serialize to JSON.");

		assert_eq!(value["provider"], "reddit");
		assert_eq!(value["_raw"], "{}");
		assert!(value["_json"].is_object());
		assert_eq!(profile.total_karma(), 1000);
	}
}
