//! @ai:module:intent Raw measurement input: client details and per-category values
//! @ai:module:layer domain
//! @ai:module:public_api RawValue, Measurements, ClientInfo, ReportRequest
//! @ai:module:stateless true

use crate::catalog::Category;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// Leading decimal number of a string, read the way form fields are read:
/// trailing units or notes after the number are ignored.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("Invalid regex")
});

/// @ai:intent A measurement exactly as submitted: a number or free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// @ai:intent Check whether the value carries no submission at all
    /// @ai:effects pure
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(text) if text.trim().is_empty())
    }

    /// @ai:intent Parse the numeric reading, if there is one
    /// @ai:post None for blank text, text without a leading number, and NaN
    /// @ai:effects pure
    pub fn parse(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) if n.is_nan() => None,
            RawValue::Number(n) => Some(*n),
            RawValue::Text(text) => LEADING_NUMBER
                .find(text.trim_start())
                .and_then(|m| m.as_str().parse::<f64>().ok()),
        }
    }

    /// @ai:intent Numeric reading with invalid input coerced to zero
    /// @ai:effects pure
    pub fn coerce(&self) -> f64 {
        self.parse().unwrap_or(0.0)
    }

    /// @ai:intent Text used to route selector aliases
    /// @ai:effects pure
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// @ai:intent Submitted values for all four categories, keyed by input field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(default)]
    pub air: BTreeMap<String, RawValue>,
    #[serde(default)]
    pub water: BTreeMap<String, RawValue>,
    #[serde(default)]
    pub surface: BTreeMap<String, RawValue>,
    #[serde(default)]
    pub dust: BTreeMap<String, RawValue>,
}

impl Measurements {
    /// @ai:intent Create an empty measurement set
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Values submitted for one category
    /// @ai:effects pure
    pub fn category(&self, category: Category) -> &BTreeMap<String, RawValue> {
        match category {
            Category::Air => &self.air,
            Category::Water => &self.water,
            Category::Surface => &self.surface,
            Category::Dust => &self.dust,
        }
    }

    /// @ai:intent Add or replace one submitted value
    /// @ai:effects state:write
    pub fn insert(&mut self, category: Category, key: &str, value: impl Into<RawValue>) {
        let map = match category {
            Category::Air => &mut self.air,
            Category::Water => &mut self.water,
            Category::Surface => &mut self.surface,
            Category::Dust => &mut self.dust,
        };
        map.insert(key.to_string(), value.into());
    }

    /// @ai:intent Builder-style variant of insert
    /// @ai:effects pure
    pub fn with(mut self, category: Category, key: &str, value: impl Into<RawValue>) -> Self {
        self.insert(category, key, value);
        self
    }
}

/// @ai:intent Details of the client the report is prepared for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    /// Date the samples were taken; report generation date when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_date: Option<NaiveDate>,
}

impl ClientInfo {
    /// @ai:intent Create client info with only a name
    /// @ai:effects pure
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// @ai:intent Everything needed to produce one report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub client: ClientInfo,
    #[serde(flatten)]
    pub measurements: Measurements,
}

impl ReportRequest {
    /// @ai:intent Create a request from client info and measurements
    /// @ai:effects pure
    pub fn new(client: ClientInfo, measurements: Measurements) -> Self {
        Self {
            client,
            measurements,
        }
    }

    /// @ai:intent Load a request from a TOML or JSON file, chosen by extension
    /// @ai:pre path exists and has a .toml or .json extension
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("toml") => {
                let content = std::fs::read_to_string(path)?;
                Ok(toml::from_str(&content)?)
            }
            Some("json") => {
                let content = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&content)?)
            }
            _ => Err(Error::UnsupportedInput(path.display().to_string())),
        }
    }

    /// @ai:intent Check whether a path looks like a loadable request file
    /// @ai:effects pure
    pub fn is_request_file(path: &Path) -> bool {
        matches!(
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
                .as_deref(),
            Some("toml") | Some("json")
        )
    }
}
