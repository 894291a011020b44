use chrono::NaiveDate;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text, text_input};
use cosmic::Element;

use crate::components::banner::confirm_banner;
use crate::components::goal_card::goal_card;
use crate::core::intent::Intent;
use crate::message::Message;
use crate::state::GoalState;

pub fn progress_label(state: &GoalState) -> String {
    let total = state.cards().len();
    let done = state.completed_count();
    if state.is_all_completed() {
        format!("Completed: {} / {} 🎉", done, total)
    } else {
        format!("Completed: {} / {}", done, total)
    }
}

pub fn goals_view<'a>(
    state: &GoalState,
    import_path: &str,
    importing: bool,
    today: NaiveDate,
) -> Element<'a, Message> {
    let add_btn = if state.form().open {
        button::standard("Close Form")
    } else {
        button::suggested("Add Goal")
    }
    .on_press(Message::Goal(Intent::ToggleAddForm));

    let mut actions = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(add_btn)
        .push(button::standard("Export JSON").on_press(Message::Goal(Intent::ExportDocument)));

    if !state.cards().is_empty() {
        actions = actions.push(
            button::destructive("Delete All").on_press(Message::Goal(Intent::RequestDeleteAll)),
        );
    }

    let path_input = text_input::text_input("Path to a goals .json file", import_path.to_string())
        .on_input(Message::ImportPathChanged)
        .width(Length::Fill);

    // No on_press while a read is in flight disables the button.
    let import_btn = if importing {
        button::standard("Importing…")
    } else {
        button::standard("Import").on_press(Message::ImportFile)
    };

    let import_row = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(path_input)
        .push(import_btn);

    let mut content = column().spacing(12).push(actions).push(import_row);

    if let Some(prompt) = confirm_banner(state) {
        content = content.push(prompt);
    }

    if state.cards().is_empty() {
        content = content.push(
            container(text::body("No goals yet. Add one to get started."))
                .padding(32)
                .center_x(Length::Fill),
        );
    } else {
        let mut list = column().spacing(8);
        for (index, card) in state.cards().iter().enumerate() {
            list = list.push(goal_card(card, index, today));
        }
        content = content.push(list);
    }

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .into()
}
