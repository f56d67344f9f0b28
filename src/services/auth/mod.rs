pub mod credential;
pub mod identity;
pub mod propagate;
pub mod token_verifier;

pub use identity::{AuthState, Identity};
pub use propagate::IdentityPropagator;
pub use token_verifier::TokenVerifier;
