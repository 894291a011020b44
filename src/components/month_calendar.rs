use chrono::{Datelike, NaiveDate};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, text};
use cosmic::Element;

use crate::config::WeekStart;
use crate::core::card::GoalCard;
use crate::message::Message;

#[derive(Debug, Clone)]
pub struct MonthCalendarState {
    /// First day of the displayed month.
    pub displayed_month: NaiveDate,
    /// Currently selected day (shows detail panel).
    pub selected_day: Option<NaiveDate>,
}

impl Default for MonthCalendarState {
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            displayed_month: today.with_day(1).unwrap_or(today),
            selected_day: Some(today),
        }
    }
}

impl MonthCalendarState {
    pub fn prev_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_sub_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
        self.selected_day = None;
    }

    pub fn next_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
        self.selected_day = None;
    }

    pub fn select_day(&mut self, date: NaiveDate) {
        if self.selected_day == Some(date) {
            self.selected_day = None;
        } else {
            self.selected_day = Some(date);
        }
    }
}

/// How a day cell is decorated, from the goals due on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMarker {
    None,
    /// Every goal due that day is completed.
    Completed,
    /// At least one open goal is due that day and the day has passed.
    Overdue,
    /// Open goals due today or later.
    Due,
}

pub fn day_marker(cards: &[GoalCard], date: NaiveDate, today: NaiveDate) -> DayMarker {
    let mut due_here = cards.iter().filter(|c| c.due() == Some(date)).peekable();
    if due_here.peek().is_none() {
        return DayMarker::None;
    }
    let mut any_open = false;
    for card in due_here {
        if !card.completed {
            if date < today {
                return DayMarker::Overdue;
            }
            any_open = true;
        }
    }
    if any_open { DayMarker::Due } else { DayMarker::Completed }
}

/// First cell of the grid: the configured week start on or before `first`.
pub fn grid_start(first: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let offset = match week_start {
        WeekStart::Sunday => first.weekday().num_days_from_sunday(),
        WeekStart::Monday => first.weekday().num_days_from_monday(),
    };
    first - chrono::Duration::days(offset as i64)
}

fn weekday_labels(week_start: WeekStart) -> [&'static str; 7] {
    match week_start {
        WeekStart::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
        WeekStart::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
    }
}

/// Render a month calendar grid with goals marked on their due dates.
pub fn month_calendar<'a>(
    state: &MonthCalendarState,
    cards: &[GoalCard],
    today: NaiveDate,
    week_start: WeekStart,
) -> Element<'a, Message> {
    let first = state.displayed_month;
    let year = first.year();
    let month = first.month();

    let month_label = first.format("%B %Y").to_string();

    let header = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(
            button::icon(cosmic::widget::icon::from_name("go-previous-symbolic"))
                .on_press(Message::CalendarPrevMonth),
        )
        .push(text::body(month_label).width(Length::Fill).center())
        .push(
            button::icon(cosmic::widget::icon::from_name("go-next-symbolic"))
                .on_press(Message::CalendarNextMonth),
        );

    let mut day_labels = row().spacing(0);
    for label in weekday_labels(week_start) {
        day_labels = day_labels.push(day_label(label));
    }

    let mut grid = column().spacing(2).push(header).push(day_labels);
    let start = grid_start(first, week_start);

    for week in 0..6 {
        let mut week_row = row().spacing(0);
        let mut any_in_month = false;

        for day_of_week in 0..7 {
            let date = start + chrono::Duration::days(week * 7 + day_of_week);
            let in_month = date.month() == month && date.year() == year;

            if in_month {
                any_in_month = true;
            }

            let cell: Element<'a, Message> = if !in_month {
                container(text::body(" "))
                    .width(Length::FillPortion(1))
                    .center_x(Length::FillPortion(1))
                    .into()
            } else {
                let mark = match day_marker(cards, date, today) {
                    DayMarker::None => " ",
                    DayMarker::Completed => "✓",
                    DayMarker::Overdue => "!",
                    DayMarker::Due => "·",
                };
                let label = format!("{}\n{}", date.day(), mark);

                let txt = if date == today {
                    text::body(label).font(cosmic::iced::Font {
                        weight: cosmic::iced::font::Weight::Bold,
                        ..Default::default()
                    })
                } else {
                    text::body(label)
                };

                let cell_content = container(txt.center()).center_x(Length::Fill);
                let class = if state.selected_day == Some(date) {
                    cosmic::theme::Button::Suggested
                } else {
                    cosmic::theme::Button::Text
                };

                button::custom(cell_content)
                    .class(class)
                    .on_press(Message::CalendarSelectDay(date))
                    .width(Length::FillPortion(1))
                    .into()
            };

            week_row = week_row.push(cell);
        }

        if any_in_month {
            grid = grid.push(week_row);
        }
    }

    let mut content = column()
        .spacing(8)
        .push(container(grid).width(Length::Fill).padding(8));

    if let Some(selected) = state.selected_day {
        for item in day_detail(selected, today, cards) {
            content = content.push(item);
        }
    }

    content.into()
}

fn day_detail<'a>(date: NaiveDate, today: NaiveDate, cards: &[GoalCard]) -> Vec<Element<'a, Message>> {
    let mut items: Vec<Element<'a, Message>> = Vec::new();

    let due_here: Vec<&GoalCard> = cards.iter().filter(|c| c.due() == Some(date)).collect();
    if due_here.is_empty() {
        return items;
    }

    let header = if date == today {
        format!("Today, {}", date.format("%A %b %e"))
    } else if date == today.succ_opt().unwrap_or(today) {
        format!("Tomorrow, {}", date.format("%A %b %e"))
    } else {
        date.format("%A, %b %e").to_string()
    };
    items.push(text::title4(header).into());

    for card in due_here {
        let status = if card.completed {
            "Done"
        } else if card.is_overdue(today) {
            "Overdue"
        } else {
            "Due"
        };
        items.push(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(text::caption(status).width(Length::Fixed(100.0)))
                .push(text::body(card.title.clone()).width(Length::Fill))
                .into(),
        );
    }

    items
}

fn day_label(label: &str) -> Element<'_, Message> {
    container(text::caption(label).center())
        .width(Length::FillPortion(1))
        .center_x(Length::FillPortion(1))
        .into()
}
