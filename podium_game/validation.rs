use serde::Deserialize;
use serde_json::Value;

use podium_types::{
    scores::Difficulty,
    validation::{FieldViolation, ViolationCode},
};

use crate::models::score::NewScore;

/// Raw score payload as sent by the game client.
///
/// Fields are kept as loose JSON values so that every problem can be reported
/// per field instead of failing on the first type mismatch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreSubmission {
    pub game_id: Option<Value>,
    pub stage_id: Option<Value>,
    pub score: Option<Value>,
    pub game_time: Option<Value>,
    pub items_collected: Option<Value>,
    pub difficulty: Option<Value>,
}

impl ScoreSubmission {
    /// Checks every field and returns the normalized score, or all the violations found.
    pub fn validate(&self) -> Result<NewScore, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let game_id = required_text("game_id", present(&self.game_id), &mut violations);
        let stage_id = required_text("stage_id", present(&self.stage_id), &mut violations);
        let score = integer_at_least("score", present(&self.score), 0, &mut violations);
        let game_time = integer_at_least("game_time", present(&self.game_time), 1, &mut violations);

        let items_collected = match present(&self.items_collected) {
            None => Some(0),
            value => integer_at_least("items_collected", value, 0, &mut violations),
        };

        let difficulty = match present(&self.difficulty) {
            None => Some(Difficulty::default()),
            Some(value) => difficulty(value, &mut violations),
        };

        match (game_id, stage_id, score, game_time, items_collected, difficulty) {
            (
                Some(game_id),
                Some(stage_id),
                Some(score),
                Some(game_time),
                Some(items_collected),
                Some(difficulty),
            ) if violations.is_empty() => Ok(NewScore {
                game_id,
                stage_id,
                score,
                game_time,
                items_collected,
                difficulty,
            }),
            _ => Err(violations),
        }
    }
}

/// JSON `null` is treated the same as an absent field.
fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| !v.is_null())
}

fn required_text(
    field: &'static str,
    value: Option<&Value>,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::String(_)) | None => {
            violations.push(FieldViolation::new(
                field,
                ViolationCode::MissingField,
                format!("{field} is required"),
            ));
            None
        }
        Some(_) => {
            violations.push(FieldViolation::new(
                field,
                ViolationCode::InvalidType,
                format!("{field} must be a string"),
            ));
            None
        }
    }
}

fn integer_at_least(
    field: &'static str,
    value: Option<&Value>,
    min: i64,
    violations: &mut Vec<FieldViolation>,
) -> Option<i64> {
    let Some(value) = value else {
        violations.push(FieldViolation::new(
            field,
            ViolationCode::MissingField,
            format!("{field} is required"),
        ));
        return None;
    };

    match value.as_i64() {
        Some(n) if n >= min => Some(n),
        _ => {
            violations.push(FieldViolation::new(
                field,
                ViolationCode::InvalidRange,
                format!("{field} must be an integer >= {min}"),
            ));
            None
        }
    }
}

fn difficulty(value: &Value, violations: &mut Vec<FieldViolation>) -> Option<Difficulty> {
    if let Some(parsed) = value.as_str().and_then(|s| s.parse::<Difficulty>().ok()) {
        return Some(parsed);
    }

    violations.push(FieldViolation::new(
        "difficulty",
        ViolationCode::InvalidValue,
        "difficulty must be one of easy, normal, hard",
    ));
    None
}
