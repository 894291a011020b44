use super::ical::{compact_date, escape_text, fold_line};
use crate::core::card::GoalCard;
use crate::error::{GoalError, Result};

pub const CALENDAR_FILE_NAME: &str = "goals-calendar.ics";
const UID_SUFFIX: &str = "@goalpost";

/// Generate a VCALENDAR with one all-day VEVENT per card that has a
/// `YYYY-MM-DD` due date. Cards without one are skipped.
pub fn cards_to_vcalendar(cards: &[GoalCard]) -> Result<String> {
    if cards.is_empty() {
        return Err(GoalError::NothingToExport);
    }

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Goalpost//EN".to_string(),
    ];

    let mut skipped = 0usize;
    for (index, card) in cards.iter().enumerate() {
        let Some(date) = card.due_date.as_deref().and_then(compact_date) else {
            skipped += 1;
            continue;
        };

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}{}", index, UID_SUFFIX));
        lines.push(format!("DTSTAMP:{}T000000Z", date));
        lines.push(format!("DTSTART;VALUE=DATE:{}", date));
        lines.push(format!("DTEND;VALUE=DATE:{}", date));
        lines.push(fold_line(&format!("SUMMARY:{}", escape_text(&card.title))));
        lines.push(fold_line(&format!(
            "DESCRIPTION:{}",
            escape_text(&card.description)
        )));
        lines.push("END:VEVENT".to_string());
    }
    lines.push("END:VCALENDAR".to_string());

    if skipped > 0 {
        log::debug!("Calendar export skipped {} card(s) without a usable due date", skipped);
    }

    Ok(lines.join("\r\n") + "\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str, due: Option<&str>) -> GoalCard {
        GoalCard {
            title: title.to_string(),
            description: "Some, details; here".to_string(),
            due_date: due.map(str::to_string),
            completed: false,
        }
    }

    #[test]
    fn empty_collection_has_nothing_to_export() {
        assert!(matches!(cards_to_vcalendar(&[]), Err(GoalError::NothingToExport)));
    }

    #[test]
    fn one_event_per_dated_card() {
        let cards = vec![
            card("Run", Some("2024-03-01")),
            card("Someday", None),
            card("Typo", Some("March 3rd")),
            card("Read", Some("2024-04-15")),
        ];
        let ics = cards_to_vcalendar(&cards).unwrap();
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("UID:0@goalpost\r\n"));
        assert!(ics.contains("UID:3@goalpost\r\n"));
        assert!(!ics.contains("UID:1@goalpost"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20240415\r\nDTEND;VALUE=DATE:20240415\r\n"));
        assert!(ics.contains("DTSTAMP:20240301T000000Z\r\n"));
    }

    #[test]
    fn uses_crlf_and_wraps_in_vcalendar() {
        let ics = cards_to_vcalendar(&[card("Run", Some("2024-03-01"))]).unwrap();
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(ics.ends_with("END:VEVENT\r\nEND:VCALENDAR\r\n"));
        assert!(!ics.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn escapes_summary_and_description() {
        let ics = cards_to_vcalendar(&[card("Plan; then, act", Some("2024-03-01"))]).unwrap();
        assert!(ics.contains("SUMMARY:Plan\\; then\\, act\r\n"));
        assert!(ics.contains("DESCRIPTION:Some\\, details\\; here\r\n"));
    }

    #[test]
    fn impossible_calendar_date_passes_through() {
        let cards = vec![card("Leap", Some("2024-02-30")), card("Fine", Some("2024-03-01"))];
        let ics = cards_to_vcalendar(&cards).unwrap();
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("DTSTART;VALUE=DATE:20240230"));
    }

    #[test]
    fn no_dated_cards_yields_empty_calendar() {
        let ics = cards_to_vcalendar(&[card("Someday", None)]).unwrap();
        assert_eq!(ics, "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Goalpost//EN\r\nEND:VCALENDAR\r\n");
    }
}
