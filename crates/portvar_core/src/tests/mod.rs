//! Scenario tests for the analysis pipeline
//!
//! Tests are organized by topic:
//! - `fixtures` - Shared price tables
//! - `selection` - Random ticker selection
//! - `pipeline` - Returns, covariance and variance curve end to end
