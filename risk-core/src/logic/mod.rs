//! Core logic: feature encoding, model inference, recommendations

pub mod features;
pub mod model;
pub mod advisor;
