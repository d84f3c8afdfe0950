//! Caller identity types shared across PizzaOffer services.
//!
//! Provides the claims model and the `CallerIdentity` extractor.

pub mod claims;
pub mod identity;
