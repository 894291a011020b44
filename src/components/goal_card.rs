use chrono::NaiveDate;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, checkbox, column, container, icon, row, text};
use cosmic::{Element, theme};

use crate::core::card::GoalCard;
use crate::core::intent::Intent;
use crate::message::Message;

const COL_CHECK: f32 = 28.0;

fn due_label(card: &GoalCard, today: NaiveDate) -> Option<String> {
    let due = card.due_date.as_ref()?;
    let label = if card.is_overdue(today) {
        format!("Overdue since {}", due)
    } else {
        format!("Due {}", due)
    };
    Some(label)
}

/// One goal in the list: completion checkbox, text, due date and delete button.
pub fn goal_card(card: &GoalCard, index: usize, today: NaiveDate) -> Element<'static, Message> {
    let check = container(
        checkbox("", card.completed)
            .on_toggle(move |_| Message::Goal(Intent::ToggleCompleted(index))),
    )
    .width(Length::Fixed(COL_CHECK));

    let title = if card.completed {
        text::title4(format!("✓ {}", card.title))
    } else {
        text::title4(card.title.clone())
    };

    let mut body = column()
        .spacing(4)
        .push(title)
        .push(text::body(card.description.clone()));

    if let Some(label) = due_label(card, today) {
        body = body.push(text::caption(label));
    }

    let delete_btn = button::icon(icon::from_name("edit-delete-symbolic")).on_press(
        Message::Goal(Intent::RequestDelete {
            index,
            title: card.title.clone(),
        }),
    );

    container(
        row()
            .spacing(12)
            .align_y(Alignment::Center)
            .push(check)
            .push(container(body).width(Length::Fill))
            .push(delete_btn),
    )
    .padding(12)
    .width(Length::Fill)
    .class(theme::Container::Card)
    .into()
}
