//! Encoded Feature Vector - Model input row
//!
//! Turns a `StudentProfile` into the fixed 17-column row the model reads.
//!
//! Encoding happens in two passes:
//! 1. expand: numeric columns verbatim, plus one indicator per categorical
//!    field whose value is not the baseline
//! 2. align: walk `FEATURE_LAYOUT`, take produced values by name, fill the
//!    rest with `DEFAULT_FILL`, drop anything the layout does not list
//!
//! The second pass makes encoding total: whatever the first pass emits,
//! the output always has the layout's columns in the layout's order.

use ndarray::Array2;
use serde::Serialize;

use super::layout::{
    layout_hash, validate_layout, LayoutMismatchError, DEFAULT_FILL, FEATURE_COUNT,
    FEATURE_LAYOUT, FEATURE_VERSION,
};
use super::profile::{
    Activities, Categorical, FamilySupport, InternetAccess, SchoolSupport, StudentProfile,
    YesNoField,
};

/// A column produced by the expand pass, before alignment
pub type NamedColumn = (String, f32);

// ============================================================================
// ENCODED FEATURE VECTOR
// ============================================================================

/// Model input row with layout metadata.
///
/// Only built through `encode_profile` / `align_to_layout`; there is no
/// setter, a built row is never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedFeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Values in `FEATURE_LAYOUT` order
    values: [f32; FEATURE_COUNT],
}

impl EncodedFeatureVector {
    fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// (name, value) pairs in layout order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }

    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Single-row tensor, shape (1, FEATURE_COUNT)
    pub fn to_row(&self) -> Array2<f32> {
        let mut row = Array2::<f32>::zeros((1, FEATURE_COUNT));
        for (i, v) in self.values.iter().enumerate() {
            row[[0, i]] = *v;
        }
        row
    }

    /// JSON form for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": self
                .named()
                .map(|(n, v)| (n.to_string(), serde_json::json!(v)))
                .collect::<serde_json::Map<_, _>>(),
        })
    }
}

// ============================================================================
// ENCODING
// ============================================================================

/// Emit the indicator for `value` unless it is the field's baseline
fn expand_indicator<C: Categorical>(value: C, out: &mut Vec<NamedColumn>) {
    if value.label() != C::baseline() {
        out.push((value.indicator_name(), 1.0));
    }
}

/// First pass: numeric columns plus the indicators this profile triggers
pub fn expand_columns(profile: &StudentProfile) -> Vec<NamedColumn> {
    let mut columns: Vec<NamedColumn> = profile
        .numeric_columns()
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect();

    expand_indicator(profile.gender, &mut columns);
    expand_indicator(profile.region, &mut columns);
    expand_indicator(profile.parental_education, &mut columns);
    expand_indicator::<InternetAccess>(YesNoField(profile.internet_access), &mut columns);
    expand_indicator::<FamilySupport>(YesNoField(profile.family_support), &mut columns);
    expand_indicator::<SchoolSupport>(YesNoField(profile.school_support), &mut columns);
    expand_indicator::<Activities>(YesNoField(profile.activities), &mut columns);

    columns
}

/// Second pass: select the layout's columns, fill missing, drop extras
pub fn align_to_layout(columns: &[NamedColumn]) -> EncodedFeatureVector {
    let mut values = [DEFAULT_FILL; FEATURE_COUNT];

    for (slot, name) in values.iter_mut().zip(FEATURE_LAYOUT) {
        if let Some((_, v)) = columns.iter().find(|(n, _)| n == name) {
            *slot = *v;
        }
    }

    EncodedFeatureVector::from_values(values)
}

/// Encode a profile into the model's input row
pub fn encode_profile(profile: &StudentProfile) -> EncodedFeatureVector {
    align_to_layout(&expand_columns(profile))
}
