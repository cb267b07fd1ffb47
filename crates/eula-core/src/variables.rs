//! Placeholder variables and substitution
//!
//! Clause templates embed `{IDENT}` tokens for party, product and
//! agreement details. Substitution is a single left-to-right scan:
//! recognized tokens are replaced with the current value (empty when
//! unset), everything else passes through untouched, and inserted values
//! are never re-scanned. Missing data renders blank rather than failing,
//! since partially-filled forms are the common case.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// The flat variable set backing a document. All fields optional;
/// empty strings substitute as blank prose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variables {
    // Provider details
    pub provider_name: String,
    pub provider_abn: String,
    pub provider_address: String,
    pub provider_email: String,
    pub provider_phone: String,
    pub provider_website: String,

    // Product/service details
    pub product_name: String,
    pub product_type: String,
    pub version: String,
    pub description: String,

    // Recipient details
    pub recipient_name: String,
    pub recipient_address: String,
    pub recipient_email: String,

    // Agreement details
    /// ISO date (`YYYY-MM-DD`); anything unparseable renders blank.
    pub license_date: String,
    pub authorized_use: String,
    pub country: String,
    pub state: String,
}

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"\{([A-Z_]+)\}").unwrap();
}

impl Variables {
    /// Derived jurisdiction string: comma-join of non-empty state and
    /// country (`"Victoria, Australia"`).
    pub fn territory(&self) -> String {
        [self.state.as_str(), self.country.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// License date formatted as a long date ("April 5, 2024"), or empty
    /// when unset or unparseable.
    pub fn formatted_license_date(&self) -> String {
        format_long_date(&self.license_date)
    }

    /// Replace every recognized `{IDENT}` token with its value.
    ///
    /// Unrecognized tokens are left verbatim, so text with no recognized
    /// tokens comes back unchanged.
    pub fn substitute(&self, text: &str) -> String {
        TOKEN_RE
            .replace_all(text, |caps: &Captures| {
                match self.lookup(&caps[1]) {
                    Some(value) => value,
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn lookup(&self, ident: &str) -> Option<String> {
        let value = match ident {
            "PROVIDER_NAME" => self.provider_name.clone(),
            "PROVIDER_ABN" => self.provider_abn.clone(),
            "PROVIDER_ADDRESS" => self.provider_address.clone(),
            "PROVIDER_EMAIL" => self.provider_email.clone(),
            "PROVIDER_PHONE" => self.provider_phone.clone(),
            "PROVIDER_WEBSITE" => self.provider_website.clone(),
            "PRODUCT_NAME" => self.product_name.clone(),
            "PRODUCT_TYPE" => self.product_type.clone(),
            "VERSION" => self.version.clone(),
            "DESCRIPTION" => self.description.clone(),
            "RECIPIENT_NAME" => self.recipient_name.clone(),
            "RECIPIENT_ADDRESS" => self.recipient_address.clone(),
            "RECIPIENT_EMAIL" => self.recipient_email.clone(),
            "LICENSE_DATE" => self.formatted_license_date(),
            "AUTHORIZED_USE" => self.authorized_use.clone(),
            "TERRITORY" => self.territory(),
            "COUNTRY" => self.country.clone(),
            "STATE" => self.state.clone(),
            _ => return None,
        };
        Some(value)
    }
}

/// Format an ISO `YYYY-MM-DD` date as "April 5, 2024". Malformed input
/// degrades to an empty string.
pub fn format_long_date(value: &str) -> String {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => String::new(),
    }
}
