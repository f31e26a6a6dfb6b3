//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the column schema the model was trained on.**
//!
//! ## Rules
//! 1. Add column → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove column → increment FEATURE_VERSION
//!
//! The exported ONNX model reads its input positionally, so a silent
//! reorder here produces wrong predictions rather than an error.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Column names in the exact order the model expects them
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Numeric (0-8), passed through ===
    "Age",
    "Family_Income",
    "Distance_from_School",
    "Absences",
    "Failures",
    "Study_Time_Category",
    "G1",
    "G2",
    "G3",

    // === One-hot indicators (9-16), baseline dropped ===
    "Gender_Male",                  // 9: baseline Female
    "Region_Urban",                 // 10: baseline Rural
    "Parental_Education_Primary",   // 11: baseline Higher Education
    "Parental_Education_Secondary", // 12
    "Internet_Access_Yes",          // 13: baseline No
    "Family_Support_Yes",           // 14: baseline No
    "School_Support_Yes",           // 15: baseline No
    "Activities_Yes",               // 16: baseline No
];

/// Total number of columns
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 17;

/// Value for any layout column the encoder did not produce
pub const DEFAULT_FILL: f32 = 0.0;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout description served by the schema endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

#[derive(Debug, Clone, Error)]
#[error("Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})")]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that a client's layout matches the current one
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Column index by name (O(n), the layout is short)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================
