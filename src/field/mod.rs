//! Field arithmetic primitives for the `rpp-merkle` crate.
//! Contains the prime domain descriptor and the canonical element wrapper.

pub mod domain;
pub mod element;

pub use domain::{FieldDomain, FieldError, BN254_MODULUS_DEC, GOLDILOCKS_MODULUS};
pub use element::FieldElement;
