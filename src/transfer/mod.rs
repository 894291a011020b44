//! Portable documents: the JSON goal document (import and export) and the
//! iCalendar export.

pub mod calendar;
pub mod ical;
pub mod json;
