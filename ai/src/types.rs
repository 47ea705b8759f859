//! Wire types for the AI service.
//!
//! The extraction endpoint is produced by a language model and is loose about
//! scalar types: numbers arrive as strings and vice versa, and single strings
//! appear where lists are expected. The deserializers below normalise those
//! shapes so the rest of the system sees one representation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Assessment metadata and question seeds returned by `extract`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExtractedAssessment {
    #[serde(default, deserialize_with = "lenient_string")]
    pub assessment_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub case_study_context: String,
    #[serde(default, deserialize_with = "string_list")]
    pub assessment_instruction: Vec<String>,
    #[serde(default)]
    pub questions_and_answers: Vec<ExtractedQuestion>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: String,
}

impl ExtractedAssessment {
    /// Extraction output is usable only when every required section is present.
    pub fn is_complete(&self) -> bool {
        !self.assessment_type.trim().is_empty()
            && !self.case_study_context.trim().is_empty()
            && !self.assessment_instruction.is_empty()
            && !self.questions_and_answers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExtractedQuestion {
    #[serde(default, deserialize_with = "lenient_string")]
    pub question_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub question: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub question_instruction: String,
    #[serde(default, deserialize_with = "string_list")]
    pub suggested_answer: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub comparison_instruction: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub comparison_count: i32,
}

/// One answer to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationItem {
    pub question: String,
    /// Suggested answer fragments joined with single spaces.
    pub suggested_answer: String,
    pub student_answer: String,
    /// Mark ceiling the score is expressed against.
    pub marks: f64,
    pub temperature: f64,
    pub comparison_instruction: String,
    pub comparison_count: i32,
    pub provider: String,
    pub model: String,
}

/// Score and feedback for one [`EvaluationItem`], in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(deserialize_with = "lenient_score")]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluationResponse {
    pub results: Vec<EvaluationResult>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(" "),
        other => value_text(&other),
    })
}

fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(value_text).collect(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        other => vec![value_text(&other)],
    })
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map(|f| f as i32).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("score out of range")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid score '{s}'"))),
        other => Err(serde::de::Error::custom(format!("invalid score {other}"))),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
