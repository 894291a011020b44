use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GoalError, Result};

pub const MAX_TITLE_CHARS: usize = 500;
pub const MAX_DESCRIPTION_CHARS: usize = 5_000;
pub const MAX_DUE_DATE_CHARS: usize = 10;

/// One user goal. Field names serialise as `title`, `description`, `dueDate`, `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalCard {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl GoalCard {
    /// Build a card from raw add-form input: every field is trimmed, required,
    /// then truncated to its limit. The due date must be a real `YYYY-MM-DD` date.
    pub fn from_form(title: &str, description: &str, due_date: &str) -> Result<Self> {
        let title = title.trim();
        let description = description.trim();
        let due_date = due_date.trim();

        let missing: Vec<&'static str> = [
            ("Title", title),
            ("Description", description),
            ("Due date", due_date),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(label, _)| label)
        .collect();

        if !missing.is_empty() {
            return Err(GoalError::Validation { missing });
        }

        if !is_form_date(due_date) {
            return Err(GoalError::InvalidDueDate(due_date.to_string()));
        }

        Ok(Self {
            title: truncate_chars(title, MAX_TITLE_CHARS),
            description: truncate_chars(description, MAX_DESCRIPTION_CHARS),
            due_date: Some(truncate_chars(due_date, MAX_DUE_DATE_CHARS)),
            completed: false,
        })
    }

    /// The collection invariant: non-blank title and description, a non-empty due
    /// date when present, all fields within limits.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
            && self.title.chars().count() <= MAX_TITLE_CHARS
            && self.description.chars().count() <= MAX_DESCRIPTION_CHARS
            && self
                .due_date
                .as_ref()
                .is_none_or(|d| !d.is_empty() && d.chars().count() <= MAX_DUE_DATE_CHARS)
    }

    /// Due date as a calendar date, if it is a real `YYYY-MM-DD` date.
    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due().is_some_and(|due| due < today)
    }
}

/// Check one untrusted JSON element against the card invariant.
///
/// Invalid elements are rejected, never repaired. Unknown fields are ignored.
pub fn check_card_value(value: &Value) -> Option<GoalCard> {
    let obj = value.as_object()?;
    let title = obj.get("title")?.as_str()?;
    let description = obj.get("description")?.as_str()?;

    let due_date = match obj.get("dueDate") {
        None | Some(Value::Null) => None,
        Some(Value::String(d)) if d.is_empty() => None,
        Some(Value::String(d)) => Some(d.clone()),
        Some(_) => return None,
    };

    let completed = match obj.get("completed") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => return None,
    };

    let card = GoalCard {
        title: title.to_string(),
        description: description.to_string(),
        due_date,
        completed,
    };
    card.is_valid().then_some(card)
}

/// Run untrusted elements through [`check_card_value`], returning the accepted
/// cards and how many were dropped.
pub fn cards_from_values(values: &[Value]) -> (Vec<GoalCard>, usize) {
    let cards: Vec<GoalCard> = values.iter().filter_map(check_card_value).collect();
    let dropped = values.len() - cards.len();
    (cards, dropped)
}

/// Keep only the cards satisfying the invariant, returning them and the dropped count.
pub fn retain_valid(cards: &[GoalCard]) -> (Vec<GoalCard>, usize) {
    let valid: Vec<GoalCard> = cards.iter().filter(|c| c.is_valid()).cloned().collect();
    let dropped = cards.len() - valid.len();
    (valid, dropped)
}

/// Exactly ten characters that chrono reads as a calendar date.
fn is_form_date(s: &str) -> bool {
    s.len() == MAX_DUE_DATE_CHARS && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
