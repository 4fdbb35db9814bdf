//! Feedback record model
//!
//! Records arrive as an immutable JSON snapshot from the data-fetch side.
//! Parsing is strict: a malformed collection or an off-scale rating is an
//! `InvalidInput` error, never silently coerced. Placeholders for missing
//! fields are applied at presentation time and never written back.

use crate::error::{PipelineError, Result};
use crate::shell::ProjectContext;
use crate::util::truncate_chars;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Highest value on the rating scale (the lowest is 0)
pub const RATING_SCALE_MAX: u8 = 5;

/// Shown instead of an absent message
pub const MESSAGE_PLACEHOLDER: &str = "No message provided";

/// Shown in the rating cell of an unrated record
pub const RATING_PLACEHOLDER: &str = "N/A";

/// Compact cell display cuts messages after this many characters
pub const MESSAGE_TRUNCATE_AT: usize = 100;

/// Opaque record identifier. Ordering of ids carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedbackId {
    Number(i64),
    Text(String),
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackId::Number(n) => write!(f, "{}", n),
            FeedbackId::Text(s) => f.write_str(s),
        }
    }
}

/// A rating on the closed scale `0..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Result<Self> {
        if value > RATING_SCALE_MAX {
            return Err(PipelineError::InvalidInput(format!(
                "rating {} is outside the scale 0..={}",
                value, RATING_SCALE_MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Filled and empty stars, e.g. `★★★☆☆`
    pub fn stars(self) -> String {
        let filled = self.0 as usize;
        let empty = (RATING_SCALE_MAX - self.0) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

/// One feedback submission
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Option<FeedbackId>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub rating: Option<Rating>,
    pub message: Option<String>,
}

impl Feedback {
    pub fn with_id(mut self, id: FeedbackId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// User name, or `"User {position+1}"` when absent or blank
    pub fn display_name(&self, position: usize) -> String {
        match self.user_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("User {}", position + 1),
        }
    }

    /// Message, or the placeholder when absent or blank
    pub fn display_message(&self) -> &str {
        match self.message.as_deref() {
            Some(msg) if !msg.is_empty() => msg,
            _ => MESSAGE_PLACEHOLDER,
        }
    }

    /// Message cut down for a table cell
    pub fn compact_message(&self, limit: usize) -> String {
        truncate_chars(self.display_message(), limit)
    }

    /// Star rendering of the rating, or `N/A`
    pub fn rating_cell(&self) -> String {
        self.rating
            .map(Rating::stars)
            .unwrap_or_else(|| RATING_PLACEHOLDER.to_string())
    }
}

/// A project's feedback as delivered by the data-fetch collaborator
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub project: Option<ProjectContext>,
    pub feedbacks: Vec<Feedback>,
}

/// Wire shape of a record before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFeedback {
    #[serde(default)]
    id: Option<FeedbackId>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    user_email: Option<String>,
    #[serde(default)]
    rating: Option<serde_json::Number>,
    #[serde(default)]
    message: Option<String>,
}

impl RawFeedback {
    fn validate(self, index: usize) -> Result<Feedback> {
        let rating = match self.rating {
            None => None,
            Some(n) => {
                let value = n
                    .as_u64()
                    .filter(|v| *v <= RATING_SCALE_MAX as u64)
                    .ok_or_else(|| {
                        PipelineError::InvalidInput(format!(
                            "record {}: rating {} is not an integer in 0..={}",
                            index, n, RATING_SCALE_MAX
                        ))
                    })?;
                Some(Rating::new(value as u8)?)
            }
        };

        Ok(Feedback {
            id: self.id,
            user_name: self.user_name,
            user_email: self.user_email,
            rating,
            message: self.message,
        })
    }
}

/// Parse a JSON array of feedback records
pub fn parse_records(json: &str) -> Result<Vec<Feedback>> {
    let value: Value = serde_json::from_str(json)?;
    records_from_value(value)
}

/// Parse either a bare record array or `{ "project": .., "feedbacks": [..] }`
pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(_) => Ok(Snapshot {
            project: None,
            feedbacks: records_from_value(value)?,
        }),
        Value::Object(mut map) => {
            let feedbacks = map.remove("feedbacks").ok_or_else(|| {
                PipelineError::InvalidInput("snapshot object has no \"feedbacks\" field".into())
            })?;
            let project = match map.remove("project") {
                None | Some(Value::Null) => None,
                Some(p) => Some(serde_json::from_value::<ProjectContext>(p).map_err(|e| {
                    PipelineError::InvalidInput(format!("project: {}", e))
                })?),
            };
            Ok(Snapshot {
                project,
                feedbacks: records_from_value(feedbacks)?,
            })
        }
        other => Err(PipelineError::InvalidInput(format!(
            "expected a record array or snapshot object, found {}",
            json_kind(&other)
        ))),
    }
}

fn records_from_value(value: Value) -> Result<Vec<Feedback>> {
    let Value::Array(items) = value else {
        return Err(PipelineError::InvalidInput(format!(
            "expected a record array, found {}",
            json_kind(&value)
        )));
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(PipelineError::InvalidInput(format!(
                    "record {}: expected an object, found {}",
                    index,
                    json_kind(&item)
                )));
            }
            let raw: RawFeedback = serde_json::from_value(item)
                .map_err(|e| PipelineError::InvalidInput(format!("record {}: {}", index, e)))?;
            raw.validate(index)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} feedback records", records.len());
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
