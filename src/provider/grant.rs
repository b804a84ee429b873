//! Grants the token endpoint accepts and the form field each one fills.

// self
use crate::_prelude::*;

/// Grants accepted by the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// One-time authorization code returned on the callback.
	AuthorizationCode,
	/// Long-lived refresh token issued for permanent authorizations.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}

	/// Form field that carries the exchanged value for this grant.
	pub fn value_field(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "code",
			GrantType::RefreshToken => "refresh_token",
		}
	}

	/// Infers the grant from caller params; anything but `grant_type=refresh_token` is a
	/// code exchange.
	pub fn from_params(params: &BTreeMap<String, String>) -> Self {
		match params.get("grant_type").map(String::as_str) {
			Some("refresh_token") => GrantType::RefreshToken,
			_ => GrantType::AuthorizationCode,
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn grant_is_inferred_from_grant_type_param() {
		let mut params = BTreeMap::new();

		assert_eq!(GrantType::from_params(&params), GrantType::AuthorizationCode);

		params.insert("grant_type".to_owned(), "authorization_code".to_owned());

		assert_eq!(GrantType::from_params(&params).value_field(), "code");

		params.insert("grant_type".to_owned(), "refresh_token".to_owned());

		assert_eq!(GrantType::from_params(&params), GrantType::RefreshToken);
		assert_eq!(GrantType::RefreshToken.value_field(), "refresh_token");
	}
}
