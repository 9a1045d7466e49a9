//! Locale tags.

use std::fmt;
use std::str::FromStr;

use crate::error::ReportingError;

/// A language tag with an optional region, such as `en-US` or `ga`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// The language subtag, lower-cased.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The region subtag, upper-cased, if any.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The same locale without its region.
    #[must_use]
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            region: None,
        }
    }

    /// The canonical tag, e.g. `en-US`.
    #[must_use]
    pub fn tag(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Locale {
    type Err = ReportingError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let mut parts = tag.trim().split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ReportingError::InvalidLocale(tag.to_owned()));
        }
        let region = match parts.next() {
            Some(region) if !region.is_empty() && region.chars().all(char::is_alphanumeric) => {
                Some(region.to_ascii_uppercase())
            }
            Some(_) => return Err(ReportingError::InvalidLocale(tag.to_owned())),
            None => None,
        };
        if parts.next().is_some() {
            return Err(ReportingError::InvalidLocale(tag.to_owned()));
        }
        Ok(Self {
            language: language.to_ascii_lowercase(),
            region,
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{region}", self.language),
            None => f.write_str(&self.language),
        }
    }
}
