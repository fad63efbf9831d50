//! Typed database property values.
//!
//! Notion tags every property value with its `type`; the value itself sits
//! under a key of the same name. Property kinds the synchronizer never reads
//! (people, relations, dates, ...) decode as [`PropertyValue::Other`].

use folio_models::RichText;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    Checkbox {
        checkbox: bool,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Email {
        #[serde(default)]
        email: Option<String>,
    },
    Formula {
        formula: FormulaValue,
    },
    #[serde(other)]
    Other,
}

/// Result of a formula property, tagged by its own `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    String {
        #[serde(default)]
        string: Option<String>,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Boolean {
        #[serde(default)]
        boolean: Option<bool>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PropertyValue {
    /// Runs of a title property.
    pub fn as_title(&self) -> Option<&[RichText]> {
        match self {
            Self::Title { title } => Some(title.as_slice()),
            _ => None,
        }
    }

    /// Runs of a rich text property.
    pub fn as_rich_text(&self) -> Option<&[RichText]> {
        match self {
            Self::RichText { rich_text } => Some(rich_text.as_slice()),
            _ => None,
        }
    }

    /// Option names of a multi-select property, in source order.
    pub fn as_tags(&self) -> Option<Vec<String>> {
        match self {
            Self::MultiSelect { multi_select } => {
                Some(multi_select.iter().map(|o| o.name.clone()).collect())
            }
            _ => None,
        }
    }

    /// A non-empty URL.
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::Url { url: Some(url) } if !url.is_empty() => Some(url.as_str()),
            _ => None,
        }
    }

    pub fn as_checkbox(&self) -> Option<bool> {
        match self {
            Self::Checkbox { checkbox } => Some(*checkbox),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number { number } => *number,
            _ => None,
        }
    }

    /// A non-empty email address.
    pub fn as_email(&self) -> Option<&str> {
        match self {
            Self::Email { email: Some(email) } if !email.is_empty() => Some(email.as_str()),
            _ => None,
        }
    }

    /// String result of a formula property.
    pub fn as_formula_string(&self) -> Option<&str> {
        match self {
            Self::Formula {
                formula: FormulaValue::String { string: Some(s) },
            } => Some(s.as_str()),
            _ => None,
        }
    }
}
