//! Features Module - Profile encoding
//!
//! Raw form record → fixed-layout model row.
//! The layout is the contract with the trained model; see `layout.rs`.

pub mod layout;
pub mod profile;
pub mod vector;


// Re-export common types
pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use profile::{Categorical, Gender, ParentalEducation, Region, StudentProfile, YesNo};
pub use vector::{align_to_layout, encode_profile, expand_columns, EncodedFeatureVector};
