//! Passenger parameters, their coercion rules, and the prediction seam
//!
//! Holds everything the prediction endpoint needs independent of the HTTP layer.

pub mod params;
pub mod predictor;
pub mod request;
