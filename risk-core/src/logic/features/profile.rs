//! Student Profile - Raw Form Record
//!
//! One record per prediction request, straight from the form.
//! Ranges mirror the widget ranges; nothing stricter is enforced.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// ============================================================================
// CATEGORICAL FIELDS
// ============================================================================

/// A fixed-vocabulary form field that is one-hot encoded.
///
/// The baseline is the lexically first label in `VALUES`. It is fixed per
/// field here rather than derived from whatever value a request carries.
pub trait Categorical: Copy + 'static {
    /// Column prefix for indicator names (`{FIELD}_{label}`)
    const FIELD: &'static str;

    /// Every value the form offers, in display order
    const VALUES: &'static [Self];

    /// Display label, also the indicator suffix
    fn label(self) -> &'static str;

    /// Category whose indicator is omitted
    fn baseline() -> &'static str {
        Self::VALUES
            .iter()
            .map(|v| v.label())
            .min()
            .unwrap_or_default()
    }

    /// Indicator column name for this value
    fn indicator_name(self) -> String {
        format!("{}_{}", Self::FIELD, self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl Categorical for Gender {
    const FIELD: &'static str = "Gender";
    const VALUES: &'static [Self] = &[Gender::Female, Gender::Male];

    fn label(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Region {
    #[default]
    Rural,
    Urban,
}

impl Categorical for Region {
    const FIELD: &'static str = "Region";
    const VALUES: &'static [Self] = &[Region::Rural, Region::Urban];

    fn label(self) -> &'static str {
        match self {
            Region::Rural => "Rural",
            Region::Urban => "Urban",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParentalEducation {
    #[default]
    Primary,
    Secondary,
    #[serde(rename = "Higher Education")]
    HigherEducation,
}

impl Categorical for ParentalEducation {
    const FIELD: &'static str = "Parental_Education";
    const VALUES: &'static [Self] = &[
        ParentalEducation::Primary,
        ParentalEducation::Secondary,
        ParentalEducation::HigherEducation,
    ];

    fn label(self) -> &'static str {
        match self {
            ParentalEducation::Primary => "Primary",
            ParentalEducation::Secondary => "Secondary",
            ParentalEducation::HigherEducation => "Higher Education",
        }
    }
}

/// Yes/No answer. The field name comes from the wrapper in `YES_NO_FIELDS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YesNo {
    #[default]
    Yes,
    No,
}

impl YesNo {
    pub const VALUES: &'static [YesNo] = &[YesNo::Yes, YesNo::No];

    pub fn label(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }

    pub fn is_yes(self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

/// Ties a yes/no answer to the column prefix of the field it came from.
#[derive(Debug, Clone, Copy)]
pub struct YesNoField<const F: usize>(pub YesNo);

/// Column prefixes for the four yes/no fields, indexed by `YesNoField<F>`
pub const YES_NO_FIELDS: [&str; 4] = [
    "Internet_Access",
    "Family_Support",
    "School_Support",
    "Activities",
];

impl<const F: usize> Categorical for YesNoField<F> {
    const FIELD: &'static str = YES_NO_FIELDS[F];
    const VALUES: &'static [Self] = &[YesNoField(YesNo::Yes), YesNoField(YesNo::No)];

    fn label(self) -> &'static str {
        self.0.label()
    }
}

pub type InternetAccess = YesNoField<0>;
pub type FamilySupport = YesNoField<1>;
pub type SchoolSupport = YesNoField<2>;
pub type Activities = YesNoField<3>;

// ============================================================================
// PROFILE
// ============================================================================

/// Raw student record as collected by the form.
///
/// Missing fields in a JSON body fall back to the form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StudentProfile {
    #[validate(range(min = 15, max = 22))]
    pub age: u8,
    pub gender: Gender,
    pub region: Region,
    #[validate(range(max = 100_000))]
    pub family_income: u32,
    pub parental_education: ParentalEducation,
    #[validate(range(min = 0.0, max = 50.0), custom(function = "finite"))]
    pub distance_from_school: f32,
    #[validate(range(max = 100))]
    pub absences: u8,
    #[validate(range(max = 10))]
    pub failures: u8,
    #[validate(range(min = 1, max = 4))]
    pub study_time_category: u8,
    #[validate(range(max = 20))]
    pub g1: u8,
    #[validate(range(max = 20))]
    pub g2: u8,
    #[validate(range(max = 20))]
    pub g3: u8,
    pub internet_access: YesNo,
    pub family_support: YesNo,
    pub school_support: YesNo,
    pub activities: YesNo,
}

/// Range checks compare, and every comparison with NaN is false
fn finite(value: f32) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

impl Default for StudentProfile {
    /// Widget defaults of the form
    fn default() -> Self {
        Self {
            age: 17,
            gender: Gender::Female,
            region: Region::Rural,
            family_income: 15_000,
            parental_education: ParentalEducation::Primary,
            distance_from_school: 5.0,
            absences: 5,
            failures: 0,
            study_time_category: 1,
            g1: 10,
            g2: 10,
            g3: 10,
            internet_access: YesNo::Yes,
            family_support: YesNo::Yes,
            school_support: YesNo::Yes,
            activities: YesNo::Yes,
        }
    }
}

impl StudentProfile {
    /// Numeric columns, passed through unchanged, in layout order
    pub fn numeric_columns(&self) -> [(&'static str, f32); 9] {
        [
            ("Age", self.age as f32),
            ("Family_Income", self.family_income as f32),
            ("Distance_from_School", self.distance_from_school),
            ("Absences", self.absences as f32),
            ("Failures", self.failures as f32),
            ("Study_Time_Category", self.study_time_category as f32),
            ("G1", self.g1 as f32),
            ("G2", self.g2 as f32),
            ("G3", self.g3 as f32),
        ]
    }
}
