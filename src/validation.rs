//! Input validation shared by every operation.
//!
//! Inputs implement [`Validate`], which runs before any store access and
//! reports the first offending field as [`Error::Validation`]. Update inputs
//! use [`Patch`] so that an absent field ("leave unchanged") stays distinct
//! from an explicit `null` ("clear the field").

use crate::errors::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Constant pattern
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Input contract checked before an operation touches the store.
pub trait Validate {
    /// Returns the first violated constraint as [`Error::Validation`].
    fn validate(&self) -> Result<()>;
}

/// Tri-state field of an update input.
///
/// Deserialization maps a missing field to [`Patch::Unset`] (the field must be
/// annotated with `#[serde(default)]`), `null` to [`Patch::Null`] and any other
/// value to [`Patch::Value`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field absent: leave the stored value unchanged
    #[default]
    Unset,
    /// Field explicitly null: clear the stored value
    Null,
    /// Field present: store this value
    Value(T),
}

impl<T> Patch<T> {
    /// Whether the field was absent from the input.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Borrows the carried value, if any.
    #[must_use]
    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Null => None,
        }
    }

    /// Converts into the assignment to perform on a nullable column:
    /// `None` leaves it alone, `Some(None)` clears it, `Some(Some(v))` sets it.
    pub fn into_update(self) -> Option<Option<T>> {
        match self {
            Self::Unset => None,
            Self::Null => Some(None),
            Self::Value(v) => Some(Some(v)),
        }
    }

    /// Maps the carried value, keeping `Unset` and `Null` as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Unset => Patch::Unset,
            Self::Null => Patch::Null,
            Self::Value(v) => Patch::Value(f(v)),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Into::into)
    }
}

/// Rejects strings shorter than `min` characters.
pub fn min_length(field: &str, value: &str, min: usize) -> Result<()> {
    if value.chars().count() < min {
        return Err(Error::validation(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    Ok(())
}

/// Rejects empty or whitespace-only strings.
pub fn not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "cannot be empty"));
    }
    Ok(())
}

/// Rejects strings that are not shaped like an email address.
pub fn email(field: &str, value: &str) -> Result<()> {
    if !EMAIL_RE.is_match(value) {
        return Err(Error::validation(field, "must be a valid email address"));
    }
    Ok(())
}

/// Rejects strings that do not parse as an absolute URL.
pub fn url(field: &str, value: &str) -> Result<()> {
    ::url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| Error::validation(field, format!("must be a valid URL ({e})")))
}

/// Rejects amounts that are zero, negative or not finite.
pub fn positive_amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::validation(field, "must be a positive number"));
    }
    Ok(())
}

/// Rejects counts that are zero or negative.
pub fn positive_count(field: &str, value: i32) -> Result<()> {
    if value <= 0 {
        return Err(Error::validation(field, "must be a positive integer"));
    }
    Ok(())
}

/// Rejects an explicit `null` on a column that cannot hold one.
pub fn not_null<T>(field: &str, value: &Patch<T>) -> Result<()> {
    if matches!(value, Patch::Null) {
        return Err(Error::validation(field, "cannot be null"));
    }
    Ok(())
}

/// Trims a required text value before it is stored.
#[must_use]
pub fn clean(value: &str) -> String {
    value.trim().to_string()
}
