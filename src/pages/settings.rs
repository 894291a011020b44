use cosmic::iced::{Alignment, Length};
use cosmic::widget::{column, container, row, scrollable, text, text_input};
use cosmic::Element;

use crate::config::{GoalpostConfig, WeekStart};
use crate::core::intent::Intent;
use crate::core::theme::{Palette, Theme};
use crate::message::Message;

pub fn settings_view<'a>(config: &GoalpostConfig, theme: Theme) -> Element<'a, Message> {
    let mut content = column().spacing(12);

    // --- Appearance ---
    content = content.push(text::title4("Appearance"));

    let palette_names: Vec<&'static str> = Palette::ALL.iter().map(|p| p.label()).collect();
    let selected_palette = theme
        .palette()
        .and_then(|current| Palette::ALL.iter().position(|p| *p == current));
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body("Palette").width(Length::Fill))
            .push(
                cosmic::widget::dropdown(palette_names, selected_palette, |idx| {
                    let palette = Palette::ALL.get(idx).copied().unwrap_or(Palette::Blue);
                    Message::Goal(Intent::ChangePalette(palette))
                })
                .width(Length::Fixed(160.0)),
            ),
    );

    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body("Dark mode").width(Length::Fill))
            .push(
                cosmic::widget::toggler(theme.is_dark())
                    .on_toggle(|_| Message::Goal(Intent::ToggleDarkMode)),
            ),
    );
    content = content.push(text::caption(format!("Current theme: {}", theme)));

    // --- Calendar ---
    content = content.push(text::title4("Calendar"));
    let week_names = vec!["Sunday", "Monday"];
    let selected_week = Some(match config.week_start {
        WeekStart::Sunday => 0,
        WeekStart::Monday => 1,
    });
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body("Week starts on").width(Length::Fill))
            .push(
                cosmic::widget::dropdown(week_names, selected_week, |idx| {
                    Message::SetWeekStart(if idx == 1 {
                        WeekStart::Monday
                    } else {
                        WeekStart::Sunday
                    })
                })
                .width(Length::Fixed(160.0)),
            ),
    );

    // --- Files ---
    content = content.push(text::title4("Files"));
    content = content.push(text::body("Export folder"));
    content = content.push(
        text_input::text_input(
            "~/Downloads",
            config.export_directory.display().to_string(),
        )
        .on_input(Message::SetExportDirectory)
        .width(Length::Fill),
    );
    content = content.push(text::caption(format!(
        "Goals are stored in {}",
        config.data_directory.display()
    )));

    // --- Debug logging ---
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body("Debug logging").width(Length::Fill))
            .push(
                cosmic::widget::toggler(config.debug_logging)
                    .on_toggle(|_| Message::ToggleDebugLogging),
            ),
    );

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .into()
}
