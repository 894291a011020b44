//! The authoritative in-memory goal collection and the pending UI intents
//! that must be resolved before it is mutated.

mod controller;

pub use controller::{Controller, Effect, ExportFile, Notice, NoticeLevel};

use crate::core::card::GoalCard;
use crate::core::intent::FormField;
use crate::core::theme::Theme;
use crate::error::Result;

/// Echo of the add-goal form while it is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub open: bool,
    pub title: String,
    pub description: String,
    pub due_date: String,
}

/// At most one deletion awaits confirmation. A new single request replaces the
/// previous target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PendingDeletion {
    #[default]
    Idle,
    /// `title` is captured at request time and re-checked on confirm.
    Single { index: usize, title: String },
    All,
}

/// Result of flipping a card's completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggled {
    pub completed: bool,
    /// The toggle completed the whole (non-empty) collection.
    pub all_completed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GoalState {
    cards: Vec<GoalCard>,
    theme: Theme,
    form: AddForm,
    pending: PendingDeletion,
}

impl GoalState {
    pub fn new(cards: Vec<GoalCard>, theme: Theme) -> Self {
        Self {
            cards,
            theme,
            ..Self::default()
        }
    }

    pub fn cards(&self) -> &[GoalCard] {
        &self.cards
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn form(&self) -> &AddForm {
        &self.form
    }

    pub fn pending(&self) -> &PendingDeletion {
        &self.pending
    }

    pub fn completed_count(&self) -> usize {
        self.cards.iter().filter(|c| c.completed).count()
    }

    pub fn is_all_completed(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.completed)
    }

    /// Open or close the add form. Closing discards whatever was typed.
    pub fn toggle_form(&mut self) {
        if self.form.open {
            self.form = AddForm::default();
        } else {
            self.form.open = true;
        }
    }

    pub fn set_form_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Title => self.form.title = value,
            FormField::Description => self.form.description = value,
            FormField::DueDate => self.form.due_date = value,
        }
    }

    /// Append a new incomplete card. Blank fields are a validation error and
    /// leave the collection untouched.
    pub fn add_card(&mut self, title: &str, description: &str, due_date: &str) -> Result<&GoalCard> {
        let card = GoalCard::from_form(title, description, due_date)?;
        self.cards.push(card);
        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Add a card from the form echo. On success the form is cleared and
    /// closed; on failure it stays open with its contents.
    pub fn submit_form(&mut self) -> Result<()> {
        let AddForm {
            title,
            description,
            due_date,
            ..
        } = self.form.clone();
        self.add_card(&title, &description, &due_date)?;
        self.form = AddForm::default();
        Ok(())
    }

    /// `None` when `index` is out of range.
    pub fn toggle_completed(&mut self, index: usize) -> Option<Toggled> {
        let was_all_completed = self.is_all_completed();
        let card = self.cards.get_mut(index)?;
        card.completed = !card.completed;
        let completed = card.completed;
        Some(Toggled {
            completed,
            all_completed: !was_all_completed && self.is_all_completed(),
        })
    }

    /// Remember `index` for deletion if it is in range and still holds `title`.
    pub fn request_delete(&mut self, index: usize, title: &str) -> bool {
        match self.cards.get(index) {
            Some(card) if card.title == title => {
                self.pending = PendingDeletion::Single {
                    index,
                    title: title.to_string(),
                };
                true
            }
            _ => false,
        }
    }

    /// Remove the pending single target. A target that moved or vanished since
    /// the request is left alone. Any single-card intent is cleared.
    pub fn confirm_delete(&mut self) -> Option<GoalCard> {
        let PendingDeletion::Single { index, title } = &self.pending else {
            return None;
        };
        let still_there = self.cards.get(*index).is_some_and(|c| c.title == *title);
        let index = *index;
        self.pending = PendingDeletion::Idle;
        still_there.then(|| self.cards.remove(index))
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.pending, PendingDeletion::Single { .. }) {
            self.pending = PendingDeletion::Idle;
        }
    }

    /// Arm delete-all mode; ignored for an empty collection.
    pub fn request_delete_all(&mut self) -> bool {
        if self.cards.is_empty() {
            return false;
        }
        self.pending = PendingDeletion::All;
        true
    }

    /// Empty the collection, returning how many cards were removed.
    pub fn confirm_delete_all(&mut self) -> usize {
        let removed = self.cards.len();
        self.cards.clear();
        self.pending = PendingDeletion::Idle;
        removed
    }

    pub fn cancel_delete_all(&mut self) {
        if self.pending == PendingDeletion::All {
            self.pending = PendingDeletion::Idle;
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Swap in an already-validated collection.
    pub fn replace_cards(&mut self, cards: Vec<GoalCard>) {
        self.cards = cards;
    }
}
