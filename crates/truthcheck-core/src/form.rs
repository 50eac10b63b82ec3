//! The outro demographic form and its validation policy.
//!
//! Validation collects every violation at once so the view can mark all
//! offending controls simultaneously; there is no exception control flow.

use crate::model::{Answer, UNITED_STATES};

/// State of a single select-style control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Left at the "Select an option" placeholder.
    #[default]
    Placeholder,
    /// A concrete option was chosen.
    Chosen(String),
}

impl Selection {
    pub fn chosen(value: impl Into<String>) -> Self {
        Selection::Chosen(value.into())
    }

    /// The chosen value, or `None` at the placeholder.
    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::Placeholder => None,
            Selection::Chosen(v) => Some(v.as_str()),
        }
    }
}

/// A form control that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The "country is US?" yes/no toggle.
    InUs,
    /// The specific-country selector shown when the toggle is "no".
    Country,
    Side,
    Age,
}

/// The demographic form collected on the outro page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DemographicForm {
    /// "yes" or "no".
    pub in_us: Selection,
    /// Specific country, relevant only when `in_us` is "no".
    pub country: Selection,
    pub side: Selection,
    /// Free-text age input.
    pub age: String,
}

impl DemographicForm {
    /// All controls reset to their placeholder option.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Restore every control from a previously cached answer.
    ///
    /// The cached country splits back into the US toggle plus the
    /// conditional specific-country selector: "United States" collapses the
    /// selector, anything else expands it with the cached value.
    pub fn from_cached(answer: &Answer) -> Self {
        let (in_us, country) = if answer.country == UNITED_STATES {
            (Selection::chosen("yes"), Selection::Placeholder)
        } else {
            (
                Selection::chosen("no"),
                Selection::chosen(answer.country.clone()),
            )
        };

        Self {
            in_us,
            country,
            side: Selection::chosen(answer.side.clone()),
            age: answer.age.clone(),
        }
    }

    /// Check the form, returning every invalid control.
    ///
    /// The specific-country selector is only checked once the US toggle is
    /// answered "no"; an unanswered toggle marks the toggle alone.
    pub fn validate(&self) -> Vec<Field> {
        let mut invalid = Vec::new();

        match self.in_us.value() {
            None => invalid.push(Field::InUs),
            Some("no") if self.country.value().is_none() => invalid.push(Field::Country),
            _ => {}
        }

        if self.side.value().is_none() {
            invalid.push(Field::Side);
        }

        if self.age.is_empty() || self.age.trim().parse::<f64>().is_err() {
            invalid.push(Field::Age);
        }

        invalid
    }

    /// The country value submitted with the answer.
    pub fn resolved_country(&self) -> Option<String> {
        match self.in_us.value() {
            Some("no") => self.country.value().map(str::to_string),
            Some(_) => Some(UNITED_STATES.to_string()),
            None => None,
        }
    }
}
