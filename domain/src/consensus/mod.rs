//! Consensus rules for open-web evidence.
//!
//! The anti-fabrication guarantee lives here: a definite `cross_validated`
//! value requires at least [`MIN_INDEPENDENT_DOMAINS`] pairwise-distinct
//! domains among sources that actually appear in the evidence.

mod cross_validation;

pub use cross_validation::{
    CandidateValue, CrossValidation, MIN_INDEPENDENT_DOMAINS, cross_validate,
    distinct_domain_count, ground_sources,
};
