//! Joke record model and creation-request validation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Store-assigned primary key of a joke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JokeId(pub i64);

impl JokeId {
    /// Parse a decimal identifier as found in a request path.
    ///
    /// Anything other than an optionally signed run of ASCII digits that fits
    /// in an `i64` is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse::<i64>().ok().map(JokeId)
    }
}

impl fmt::Display for JokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted joke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Joke {
    pub id: JokeId,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated creation request.
///
/// Both fields are guaranteed to contain at least one non-whitespace
/// character. The text is kept exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJoke {
    question: String,
    answer: String,
}

impl NewJoke {
    /// Validate a question/answer pair.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let question = question.into();
        let answer = answer.into();
        if question.trim().is_empty() || answer.trim().is_empty() {
            return Err(ValidationError::InvalidFields);
        }
        Ok(Self { question, answer })
    }

    /// Validate an untyped JSON request body.
    ///
    /// Absent keys are reported before type or emptiness problems. An explicit
    /// `null` counts as present. A body that is not an object has no keys.
    pub fn from_body(body: &Value) -> Result<Self, ValidationError> {
        let (question, answer) = match (body.get("question"), body.get("answer")) {
            (Some(question), Some(answer)) => (question, answer),
            _ => return Err(ValidationError::MissingFields),
        };

        match (question, answer) {
            (Value::String(question), Value::String(answer)) => {
                Self::new(question.as_str(), answer.as_str())
            }
            _ => Err(ValidationError::InvalidFields),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Stamp this request with an identifier and creation time.
    pub fn into_joke(self, id: JokeId, now: DateTime<Utc>) -> Joke {
        Joke {
            id,
            question: self.question,
            answer: self.answer,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_accepts_strings() {
        let new = NewJoke::from_body(&json!({"question": "Why?", "answer": "Because."})).unwrap();
        assert_eq!(new.question(), "Why?");
        assert_eq!(new.answer(), "Because.");
    }

    #[test]
    fn test_from_body_keeps_surrounding_whitespace() {
        let body = json!({"question": "  Why? ", "answer": "Because."});
        let new = NewJoke::from_body(&body).unwrap();
        assert_eq!(new.question(), "  Why? ");
    }

    #[test]
    fn test_missing_fields() {
        for body in [
            json!({}),
            json!({"question": "Why?"}),
            json!({"answer": "Because."}),
            json!(["Why?", "Because."]),
            json!("Why?"),
            Value::Null,
        ] {
            assert_eq!(
                NewJoke::from_body(&body),
                Err(ValidationError::MissingFields),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_missing_reported_before_invalid() {
        let body = json!({"question": 42});
        assert_eq!(NewJoke::from_body(&body), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_invalid_fields() {
        for body in [
            json!({"question": "", "answer": "x"}),
            json!({"question": "Why?", "answer": "   "}),
            json!({"question": "\n\t", "answer": "x"}),
            json!({"question": 1, "answer": "x"}),
            json!({"question": "Why?", "answer": false}),
            json!({"question": null, "answer": "x"}),
            json!({"question": ["Why?"], "answer": {"text": "x"}}),
        ] {
            assert_eq!(
                NewJoke::from_body(&body),
                Err(ValidationError::InvalidFields),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_joke_id_parse() {
        assert_eq!(JokeId::parse("12"), Some(JokeId(12)));
        assert_eq!(JokeId::parse("-3"), Some(JokeId(-3)));
        assert_eq!(JokeId::parse("abc"), None);
        assert_eq!(JokeId::parse("1.5"), None);
        assert_eq!(JokeId::parse(""), None);
        assert_eq!(JokeId::parse("99999999999999999999"), None);
    }

    #[test]
    fn test_joke_serializes_camel_case() {
        let now = Utc::now();
        let joke = NewJoke::new("Why?", "Because.").unwrap().into_joke(JokeId(1), now);
        let value = serde_json::to_value(&joke).unwrap();

        assert_eq!(value["id"], json!(1));
        assert_eq!(value["question"], json!("Why?"));
        assert_eq!(value["answer"], json!("Because."));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }
}
