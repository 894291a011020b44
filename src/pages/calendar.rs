use chrono::NaiveDate;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text};
use cosmic::Element;

use crate::components::month_calendar::{MonthCalendarState, month_calendar};
use crate::config::WeekStart;
use crate::core::card::GoalCard;
use crate::core::intent::Intent;
use crate::message::Message;

pub fn calendar_view<'a>(
    cal_state: &MonthCalendarState,
    cards: &[GoalCard],
    today: NaiveDate,
    week_start: WeekStart,
) -> Element<'a, Message> {
    let undated = cards.iter().filter(|c| c.due().is_none()).count();

    let mut toolbar = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(text::title4("Goals by due date").width(Length::Fill));
    if undated > 0 {
        toolbar = toolbar.push(text::caption(format!("{} without a due date", undated)));
    }
    toolbar = toolbar.push(
        button::standard("Export .ICS").on_press(Message::Goal(Intent::ExportCalendar)),
    );

    let content = column()
        .spacing(12)
        .push(toolbar)
        .push(month_calendar(cal_state, cards, today, week_start));

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .into()
}
