//! Profile form state
//!
//! Holds the mutable financial input fields independently of submission
//! status. The user edits freely; the analysis session takes an immutable
//! snapshot at submit time. Numeric input follows the original form rule:
//! anything non-finite or negative lands as 0 instead of propagating.

use crate::models::Profile;

/// Numeric fields of the form, addressable by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Age,
    Income,
    DesiredSavingsPct,
    Groceries,
    Transport,
    EatingOut,
    Entertainment,
    Utilities,
    Misc,
}

/// Mutable form state. Defaults mirror the original sidebar.
#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub currency: String,
    pub occupation: String,
    pub city_tier: String,
    age: f64,
    income: f64,
    desired_savings_pct: f64,
    groceries: f64,
    transport: f64,
    eating_out: f64,
    entertainment: f64,
    utilities: f64,
    misc: f64,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            currency: "MAD".to_string(),
            occupation: "Professional".to_string(),
            city_tier: "Tier_1".to_string(),
            age: 30.0,
            income: 15000.0,
            desired_savings_pct: 20.0,
            groceries: 3000.0,
            transport: 1000.0,
            eating_out: 1500.0,
            entertainment: 800.0,
            utilities: 1200.0,
            misc: 1000.0,
        }
    }
}

/// Coerce raw numeric input: finite and non-negative, else 0.
fn coerce(raw: f64) -> f64 {
    if raw.is_finite() && raw >= 0.0 {
        raw
    } else {
        0.0
    }
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a numeric field, coercing invalid input to 0.
    pub fn set_numeric(&mut self, field: NumericField, raw: f64) {
        let value = coerce(raw);
        match field {
            NumericField::Age => self.age = value,
            NumericField::Income => self.income = value,
            NumericField::DesiredSavingsPct => self.desired_savings_pct = value,
            NumericField::Groceries => self.groceries = value,
            NumericField::Transport => self.transport = value,
            NumericField::EatingOut => self.eating_out = value,
            NumericField::Entertainment => self.entertainment = value,
            NumericField::Utilities => self.utilities = value,
            NumericField::Misc => self.misc = value,
        }
    }

    /// Parse-and-set convenience for text inputs. Unparseable text is 0,
    /// the same as the original form's `parseFloat(value) || 0`.
    pub fn set_numeric_str(&mut self, field: NumericField, raw: &str) {
        let value = raw.trim().parse::<f64>().unwrap_or(0.0);
        self.set_numeric(field, value);
    }

    pub fn get_numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Age => self.age,
            NumericField::Income => self.income,
            NumericField::DesiredSavingsPct => self.desired_savings_pct,
            NumericField::Groceries => self.groceries,
            NumericField::Transport => self.transport,
            NumericField::EatingOut => self.eating_out,
            NumericField::Entertainment => self.entertainment,
            NumericField::Utilities => self.utilities,
            NumericField::Misc => self.misc,
        }
    }

    /// Immutable snapshot for submission.
    pub fn snapshot(&self) -> Profile {
        Profile {
            currency: self.currency.clone(),
            age: self.age,
            income: self.income,
            occupation: self.occupation.clone(),
            city_tier: self.city_tier.clone(),
            desired_savings_pct: self.desired_savings_pct,
            groceries: self.groceries,
            transport: self.transport,
            eating_out: self.eating_out,
            entertainment: self.entertainment,
            utilities: self.utilities,
            misc: self.misc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_numeric_input_coerced_to_zero() {
        let mut form = ProfileForm::new();

        form.set_numeric(NumericField::Income, f64::NAN);
        assert_eq!(form.get_numeric(NumericField::Income), 0.0);

        form.set_numeric(NumericField::Groceries, -250.0);
        assert_eq!(form.get_numeric(NumericField::Groceries), 0.0);

        form.set_numeric(NumericField::Utilities, f64::INFINITY);
        assert_eq!(form.get_numeric(NumericField::Utilities), 0.0);
    }

    #[test]
    fn test_unparseable_text_coerced_to_zero() {
        let mut form = ProfileForm::new();
        form.set_numeric_str(NumericField::Transport, "abc");
        assert_eq!(form.get_numeric(NumericField::Transport), 0.0);

        form.set_numeric_str(NumericField::Transport, " 1250.5 ");
        assert_eq!(form.get_numeric(NumericField::Transport), 1250.5);
    }

    #[test]
    fn test_defaults_match_original_form() {
        let form = ProfileForm::new();
        assert_eq!(form.currency, "MAD");
        assert_eq!(form.get_numeric(NumericField::Income), 15000.0);
        assert_eq!(form.get_numeric(NumericField::DesiredSavingsPct), 20.0);
        assert_eq!(form.get_numeric(NumericField::EatingOut), 1500.0);
    }

    #[test]
    fn test_snapshot_carries_current_values() {
        let mut form = ProfileForm::new();
        form.set_numeric(NumericField::Income, 20000.0);
        form.currency = "USD".to_string();

        let profile = form.snapshot();
        assert_eq!(profile.income, 20000.0);
        assert_eq!(profile.currency, "USD");

        // Snapshot is independent of later edits.
        form.set_numeric(NumericField::Income, 5.0);
        assert_eq!(profile.income, 20000.0);
    }
}
