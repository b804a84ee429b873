//! Auth-domain values: scopes, token exchange results, and the canonical profile.

pub mod profile;
pub mod scope;
pub mod token;

pub use profile::*;
pub use scope::*;
pub use token::*;
