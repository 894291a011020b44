use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, container, row, text};
use cosmic::{Element, theme};

use crate::core::intent::Intent;
use crate::core::theme::Theme;
use crate::message::Message;
use crate::state::{GoalState, Notice, NoticeLevel, PendingDeletion};

fn banner<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(12)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}

/// The oldest unacknowledged notice with its dismiss button.
pub fn notice_banner(notice: &Notice) -> Element<'static, Message> {
    let prefix = match notice.level {
        NoticeLevel::Info => "",
        NoticeLevel::Warning => "⚠ ",
        NoticeLevel::Error => "✗ ",
    };

    banner(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(format!("{}{}", prefix, notice.message)).width(Length::Fill))
            .push(button::standard("OK").on_press(Message::DismissNotice)),
    )
}

pub fn delete_all_prompt(count: usize) -> String {
    format!(
        "Are you sure you want to delete all {} goal{}?",
        count,
        if count == 1 { "" } else { "s" }
    )
}

/// Confirmation prompt for whatever deletion is pending, if any.
pub fn confirm_banner(state: &GoalState) -> Option<Element<'static, Message>> {
    let (prompt, confirm, cancel) = match state.pending() {
        PendingDeletion::Idle => return None,
        PendingDeletion::Single { title, .. } => (
            format!("Are you sure you want to delete the goal \"{}\"?", title),
            Intent::ConfirmDelete,
            Intent::CancelDelete,
        ),
        PendingDeletion::All => (
            delete_all_prompt(state.cards().len()),
            Intent::ConfirmDeleteAll,
            Intent::CancelDeleteAll,
        ),
    };

    Some(banner(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(prompt).width(Length::Fill))
            .push(button::destructive("Delete").on_press(Message::Goal(confirm)))
            .push(button::standard("Cancel").on_press(Message::Goal(cancel))),
    ))
}

pub fn celebration_banner(theme: Theme) -> Element<'static, Message> {
    let sparkle = match theme.palette() {
        Some(crate::core::theme::Palette::KawaiiPink) => "🌸",
        Some(crate::core::theme::Palette::KawaiiLavender) => "💜",
        Some(crate::core::theme::Palette::Blue) => "🔵",
        None => "✨",
    };
    banner(
        text::title3(format!("🎉 All goals completed! {}", sparkle))
            .width(Length::Fill)
            .center(),
    )
}
