use super::error::SubmitError;
use crate::shared::names::{sanitize_player_name, DEFAULT_PLAYER_NAME};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub score: u64,
}

impl Submission {
    /// Reads a `{name, score}` body, coercing loosely typed fields.
    pub fn from_body(body: &[u8]) -> Result<Self, SubmitError> {
        let payload = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice::<Value>(body).map_err(|error| {
                tracing::debug!(%error, "submission body is not valid json");
                SubmitError::InvalidBody
            })?
        };

        let name = payload.get("name").map(coerce_name).unwrap_or_default();
        let score = payload.get("score").map(coerce_score).unwrap_or(0);
        Ok(Self {
            name: sanitize_player_name(&name, DEFAULT_PLAYER_NAME),
            score,
        })
    }
}

fn coerce_name(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) if number.as_f64() != Some(0.0) => match number.as_f64() {
            // Floats print without a trailing `.0`, so `1.0` names the player `1`.
            Some(value) if number.is_f64() => value.to_string(),
            _ => number.to_string(),
        },
        Value::Bool(true) => "true".to_string(),
        _ => String::new(),
    }
}

fn coerce_score(value: &Value) -> u64 {
    match value {
        Value::Number(number) => {
            if let Some(score) = number.as_u64() {
                return score;
            }
            match number.as_f64() {
                Some(score) if score > 0.0 => score.trunc() as u64,
                _ => 0,
            }
        }
        Value::String(text) => parse_leading_integer(text),
        _ => 0,
    }
}

/// Parses an optional sign and leading digits, ignoring whatever follows.
fn parse_leading_integer(text: &str) -> u64 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if negative {
        return 0;
    }
    rest.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |total, digit| {
            total
                .saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(body: &str) -> Submission {
        Submission::from_body(body.as_bytes()).expect("body should parse")
    }

    #[test]
    fn from_body_reads_plain_submission() {
        assert_eq!(
            submission(r#"{"name":"  Ada ","score":42}"#),
            Submission {
                name: "Ada".to_string(),
                score: 42
            }
        );
    }

    #[test]
    fn from_body_rejects_invalid_json() {
        let error = Submission::from_body(b"{name:").expect_err("broken json should fail");
        assert!(matches!(error, SubmitError::InvalidBody));
    }

    #[test]
    fn from_body_defaults_missing_or_empty_payloads() {
        let expected = Submission {
            name: "Anonymous".to_string(),
            score: 0,
        };
        assert_eq!(submission(""), expected);
        assert_eq!(submission("null"), expected);
        assert_eq!(submission("{}"), expected);
        assert_eq!(submission("[1,2]"), expected);
        assert_eq!(submission(r#"{"name":"   ","score":null}"#), expected);
    }

    #[test]
    fn negative_scores_clamp_to_zero() {
        assert_eq!(submission(r#"{"score":-5}"#).score, 0);
        assert_eq!(submission(r#"{"score":"-12"}"#).score, 0);
        assert_eq!(submission(r#"{"score":-0.5}"#).score, 0);
    }

    #[test]
    fn scores_truncate_like_integer_parsing() {
        assert_eq!(submission(r#"{"score":12.9}"#).score, 12);
        assert_eq!(submission(r#"{"score":" 42abc"}"#).score, 42);
        assert_eq!(submission(r#"{"score":"+7"}"#).score, 7);
        assert_eq!(submission(r#"{"score":"abc"}"#).score, 0);
        assert_eq!(submission(r#"{"score":true}"#).score, 0);
        assert_eq!(
            submission(r#"{"score":"99999999999999999999999"}"#).score,
            u64::MAX
        );
    }

    #[test]
    fn names_are_coerced_to_strings() {
        assert_eq!(submission(r#"{"name":1337}"#).name, "1337");
        assert_eq!(submission(r#"{"name":1.0}"#).name, "1");
        assert_eq!(submission(r#"{"name":2.5}"#).name, "2.5");
        assert_eq!(submission(r#"{"name":0}"#).name, "Anonymous");
        assert_eq!(submission(r#"{"name":true}"#).name, "true");
        assert_eq!(submission(r#"{"name":false}"#).name, "Anonymous");
        assert_eq!(submission(r#"{"name":{"nested":1}}"#).name, "Anonymous");
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "x".repeat(35);
        let parsed = submission(&format!(r#"{{"name":"{long}","score":1}}"#));
        assert_eq!(parsed.name, "x".repeat(20));
    }
}
