//! Provider-facing policies: how token requests are signed and how profiles are mapped.
//!
//! `strategy` defines the policy traits ([`CredentialSigner`], [`ProfileMapper`]) that the
//! exchange and profile pipelines are parameterized by. `reddit` carries Reddit's
//! endpoints and its implementations of both policies. `grant` names the two grants the
//! token endpoint accepts.

pub mod grant;
pub mod reddit;
pub mod strategy;

pub use grant::*;
pub use reddit::*;
pub use strategy::*;
