//! Wire shape of a successful `/api/analyze` reply.
//!
//! Every field is optional. A missing field, a JSON `null` and a value of
//! the wrong JSON type all deserialize to `None`, and the renderer skips the
//! matching section. One odd field never costs the rest of the reply.
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "lenient_number")]
    pub match_score: Option<f64>,
    #[serde(deserialize_with = "lenient_object")]
    pub skills_analysis: Option<SkillsAnalysis>,
    #[serde(deserialize_with = "lenient_object")]
    pub experience_analysis: Option<ExperienceAnalysis>,
    #[serde(deserialize_with = "lenient_object")]
    pub education_analysis: Option<EducationAnalysis>,
    #[serde(deserialize_with = "lenient_strings")]
    pub recommendations: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_strings")]
    pub missing_keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsAnalysis {
    #[serde(deserialize_with = "lenient_strings")]
    pub matched_skills: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_strings")]
    pub missing_skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceAnalysis {
    #[serde(deserialize_with = "lenient_years")]
    pub years_required: Option<Years>,
    #[serde(deserialize_with = "lenient_years")]
    pub years_provided: Option<Years>,
    #[serde(rename = "match", deserialize_with = "lenient_truthiness")]
    pub is_match: Option<bool>,
    #[serde(deserialize_with = "lenient_text")]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationAnalysis {
    #[serde(deserialize_with = "lenient_text")]
    pub required: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub provided: Option<String>,
    #[serde(rename = "match", deserialize_with = "lenient_truthiness")]
    pub is_match: Option<bool>,
    #[serde(deserialize_with = "lenient_text")]
    pub feedback: Option<String>,
}

/// Years of experience as the backend reports them: either a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Years {
    Count(f64),
    Text(String),
}

impl Years {
    /// Zero, NaN and the empty string are not shown.
    pub fn is_truthy(&self) -> bool {
        match self {
            Years::Count(n) => *n != 0.0 && !n.is_nan(),
            Years::Text(text) => !text.is_empty(),
        }
    }
}

impl fmt::Display for Years {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a fractional part ("3", not "3.0").
            Years::Count(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Years::Count(n) => write!(f, "{n}"),
            Years::Text(text) => f.write_str(text),
        }
    }
}

fn format_number(n: f64) -> String {
    Years::Count(n).to_string()
}

/// Strings, numbers and booleans as the page would print them.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => n.as_f64().map(format_number),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

/// Falsy scalars (`false`, `0`) are treated as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        value => scalar_text(&value),
    })
}

/// Non-scalar items are dropped; a non-array value is no list at all.
fn lenient_strings<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.iter().filter_map(scalar_text).collect()),
        _ => None,
    })
}

/// `null` stays absent; anything else counts by truthiness.
fn lenient_truthiness<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan())),
        Value::String(text) => Some(!text.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    })
}

fn lenient_years<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Years>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map(Years::Count),
        Value::String(text) => Some(Years::Text(text)),
        Value::Bool(true) => Some(Years::Text("true".to_string())),
        _ => None,
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}
