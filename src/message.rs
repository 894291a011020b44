use chrono::NaiveDate;

use crate::config::WeekStart;
use crate::core::intent::Intent;

#[derive(Debug, Clone)]
pub enum Message {
    // Goal collection
    Goal(Intent),
    OpenAddForm,

    // Import
    ImportPathChanged(String),
    ImportFile,

    // Notices
    DismissNotice,
    /// Carries the celebration generation so a stale timer can't end a newer banner.
    CelebrationDone(u64),

    // Calendar
    CalendarPrevMonth,
    CalendarNextMonth,
    CalendarSelectDay(NaiveDate),

    // Settings
    OpenSettings,
    SetExportDirectory(String),
    SetWeekStart(WeekStart),
    ToggleDebugLogging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Goals,
    Calendar,
    Settings,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Goals => "My Goals",
            Self::Calendar => "Calendar",
            Self::Settings => "Settings",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Goals => "checkbox-checked-symbolic",
            Self::Calendar => "x-office-calendar-symbolic",
            Self::Settings => "emblem-system-symbolic",
        }
    }

    pub const ALL: &'static [Page] = &[Page::Goals, Page::Calendar, Page::Settings];
}
