//! The loan application record in the fixed schema the classifier was
//! trained on. Field order is load-bearing: the model artifact verifies it
//! at load time and `to_feature_vector` emits values in exactly this order.

use serde::{Deserialize, Serialize};

/// Number of features in the model schema.
pub const FEATURE_COUNT: usize = 13;

/// Feature names exactly as the training pipeline wrote them, in training
/// column order. Three of them contain a space.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "ID",
    "Age",
    "Experience",
    "Income",
    "ZIP Code",
    "Family",
    "CCAvg",
    "Education",
    "Mortgage",
    "Securities Account",
    "CD Account",
    "Online",
    "CreditCard",
];

/// Inclusive bounds enforced on form input (widget-level clamping,
/// mirrored server-side).
pub const AGE_RANGE: (u32, u32) = (18, 75);
pub const EXPERIENCE_RANGE: (u32, u32) = (0, 50);

/// Household size, 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Family {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl Family {
    pub fn from_value(v: u8) -> Option<Self> {
        match v {
            1 => Some(Family::One),
            2 => Some(Family::Two),
            3 => Some(Family::Three),
            4 => Some(Family::Four),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Family {
    type Error = String;

    fn try_from(v: u8) -> std::result::Result<Self, Self::Error> {
        Family::from_value(v).ok_or_else(|| format!("family size out of range: {v}"))
    }
}

impl From<Family> for u8 {
    fn from(f: Family) -> u8 {
        f.as_u8()
    }
}

/// Education level encoding used by the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Education {
    Undergraduate = 1,
    Graduate = 2,
    Advanced = 3,
}

impl Education {
    pub fn from_value(v: u8) -> Option<Self> {
        match v {
            1 => Some(Education::Undergraduate),
            2 => Some(Education::Graduate),
            3 => Some(Education::Advanced),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Education::Undergraduate => "Undergraduate",
            Education::Graduate => "Graduate",
            Education::Advanced => "Advanced/Professional",
        }
    }
}

impl TryFrom<u8> for Education {
    type Error = String;

    fn try_from(v: u8) -> std::result::Result<Self, Self::Error> {
        Education::from_value(v).ok_or_else(|| format!("education level out of range: {v}"))
    }
}

impl From<Education> for u8 {
    fn from(e: Education) -> u8 {
        e.as_u8()
    }
}

/// One applicant's attributes. Built per prediction request from form
/// state, passed once to the classifier, then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub id: u64,
    pub age: u32,
    pub experience: u32,
    /// Annual income in thousands of dollars.
    pub income: u64,
    pub zip_code: u32,
    pub family: Family,
    /// Average credit card spend in thousands of dollars.
    pub cc_avg: f64,
    pub education: Education,
    pub mortgage: u64,
    pub securities_account: bool,
    pub cd_account: bool,
    pub online: bool,
    pub credit_card: bool,
}

impl LoanApplication {
    /// Field values in schema order, booleans as 0.0/1.0.
    pub fn to_feature_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.id as f64,
            self.age as f64,
            self.experience as f64,
            self.income as f64,
            self.zip_code as f64,
            self.family.as_u8() as f64,
            self.cc_avg,
            self.education.as_u8() as f64,
            self.mortgage as f64,
            self.securities_account as u8 as f64,
            self.cd_account as u8 as f64,
            self.online as u8 as f64,
            self.credit_card as u8 as f64,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LoanApplication {
        LoanApplication {
            id: 42,
            age: 30,
            experience: 5,
            income: 120,
            zip_code: 12345,
            family: Family::Two,
            cc_avg: 1.5,
            education: Education::Graduate,
            mortgage: 0,
            securities_account: false,
            cd_account: true,
            online: true,
            credit_card: false,
        }
    }

    #[test]
    fn test_feature_vector_has_thirteen_fields_in_schema_order() {
        let v = sample().to_feature_vector();
        assert_eq!(v.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
        assert_eq!(v[0], 42.0); // ID
        assert_eq!(v[1], 30.0); // Age
        assert_eq!(v[2], 5.0); // Experience
        assert_eq!(v[3], 120.0); // Income
        assert_eq!(v[4], 12345.0); // ZIP Code
        assert_eq!(v[5], 2.0); // Family
        assert_eq!(v[6], 1.5); // CCAvg
        assert_eq!(v[7], 2.0); // Education
        assert_eq!(v[8], 0.0); // Mortgage
        assert_eq!(v[9], 0.0); // Securities Account
        assert_eq!(v[10], 1.0); // CD Account
        assert_eq!(v[11], 1.0); // Online
        assert_eq!(v[12], 0.0); // CreditCard
    }

    #[test]
    fn test_family_rejects_out_of_range() {
        assert_eq!(Family::from_value(0), None);
        assert_eq!(Family::from_value(5), None);
        assert_eq!(Family::from_value(3), Some(Family::Three));
    }

    #[test]
    fn test_education_rejects_out_of_range() {
        assert_eq!(Education::from_value(0), None);
        assert_eq!(Education::from_value(4), None);
        assert_eq!(Education::from_value(1), Some(Education::Undergraduate));
    }

    #[test]
    fn test_schema_names_match_training_columns() {
        assert_eq!(FEATURE_NAMES[4], "ZIP Code");
        assert_eq!(FEATURE_NAMES[9], "Securities Account");
        assert_eq!(FEATURE_NAMES[12], "CreditCard");
    }
}
