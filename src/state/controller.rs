use super::{GoalState, PendingDeletion};
use crate::core::intent::Intent;
use crate::core::theme::Theme;
use crate::error::GoalError;
use crate::store::{KeyValueStore, RecordStore};
use crate::transfer::calendar::{CALENDAR_FILE_NAME, cards_to_vcalendar};
use crate::transfer::json::{DOCUMENT_FILE_NAME, export_document};

/// Shown when an import kept only some elements.
pub const PARTIAL_IMPORT_NOTICE: &str = "Some cards do not have the correct structure or exceed size limits. \
Each card needs a text title (up to 500 characters) and description (up to 5000), \
an optional text due date of at most 10 characters, and an optional true/false completed flag.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message the user must see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

impl From<GoalError> for Notice {
    fn from(e: GoalError) -> Self {
        match e {
            GoalError::NothingToExport => Self::info(e.to_string()),
            _ => Self::error(e.to_string()),
        }
    }
}

/// A document ready to be offered to the user as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub contents: String,
}

/// Side effects requested by the controller; the caller performs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notice),
    /// Fire-and-forget celebration in the given theme.
    Celebrate(Theme),
    Export(ExportFile),
}

/// Owns the live goal state and persists it after every mutation.
pub struct Controller<S> {
    state: GoalState,
    store: RecordStore<S>,
}

impl<S: KeyValueStore> Controller<S> {
    /// Build the state from whatever the store holds, falling back to an empty
    /// collection and the default theme.
    pub fn load(store: RecordStore<S>) -> Self {
        let cards = store.load_cards();
        let theme = store.load_theme().unwrap_or_default();
        log::info!("Loaded {} goal(s) with theme {}", cards.len(), theme);
        Self {
            state: GoalState::new(cards, theme),
            store,
        }
    }

    pub fn state(&self) -> &GoalState {
        &self.state
    }

    pub fn dispatch(&mut self, intent: Intent) -> Vec<Effect> {
        let mut effects = Vec::new();

        match intent {
            Intent::ToggleAddForm => self.state.toggle_form(),

            Intent::FormInput(field, value) => self.state.set_form_field(field, value),

            Intent::SubmitAddForm => match self.state.submit_form() {
                Ok(()) => self.persist_cards(&mut effects),
                Err(e) => effects.push(Effect::Notify(e.into())),
            },

            Intent::ToggleCompleted(index) => {
                if let Some(toggled) = self.state.toggle_completed(index) {
                    if toggled.all_completed {
                        effects.push(Effect::Celebrate(self.state.theme()));
                    }
                    self.persist_cards(&mut effects);
                }
            }

            Intent::RequestDelete { index, title } => {
                if !self.state.request_delete(index, &title) {
                    log::debug!("Ignoring stale delete request for {:?} at {}", title, index);
                }
            }

            Intent::ConfirmDelete => {
                let was_pending = matches!(self.state.pending(), PendingDeletion::Single { .. });
                match self.state.confirm_delete() {
                    Some(removed) => {
                        log::debug!("Deleted goal {:?}", removed.title);
                        self.persist_cards(&mut effects);
                    }
                    None if was_pending => effects.push(Effect::Notify(Notice::warning(
                        "That goal changed before it could be deleted. Nothing was removed.",
                    ))),
                    None => {}
                }
            }

            Intent::CancelDelete => self.state.cancel_delete(),

            Intent::RequestDeleteAll => {
                self.state.request_delete_all();
            }

            Intent::ConfirmDeleteAll => {
                let removed = self.state.confirm_delete_all();
                log::debug!("Deleted all {} goal(s)", removed);
                self.persist_cards(&mut effects);
            }

            Intent::CancelDeleteAll => self.state.cancel_delete_all(),

            Intent::SetTheme(theme) => self.apply_theme(theme, &mut effects),

            Intent::ToggleDarkMode => {
                let theme = self.state.theme().toggled();
                self.apply_theme(theme, &mut effects);
            }

            Intent::ChangePalette(palette) => {
                let theme = self.state.theme().with_palette(palette);
                self.apply_theme(theme, &mut effects);
            }

            Intent::ExportDocument => match export_document(self.state.cards()) {
                Ok(exported) => {
                    if exported.dropped > 0 {
                        effects.push(Effect::Notify(Notice::warning(
                            "Some cards were omitted due to incorrect structure.",
                        )));
                    }
                    effects.push(Effect::Export(ExportFile {
                        file_name: DOCUMENT_FILE_NAME,
                        contents: exported.contents,
                    }));
                }
                Err(e) => effects.push(Effect::Notify(e.into())),
            },

            Intent::ExportCalendar => match cards_to_vcalendar(self.state.cards()) {
                Ok(contents) => effects.push(Effect::Export(ExportFile {
                    file_name: CALENDAR_FILE_NAME,
                    contents,
                })),
                Err(e) => effects.push(Effect::Notify(e.into())),
            },

            Intent::ImportFinished(Ok(imported)) => {
                if imported.is_partial() {
                    effects.push(Effect::Notify(Notice::warning(PARTIAL_IMPORT_NOTICE)));
                }
                log::info!("Imported {} goal(s)", imported.cards.len());
                self.state.replace_cards(imported.cards);
                self.persist_cards(&mut effects);
            }

            Intent::ImportFinished(Err(message)) => {
                effects.push(Effect::Notify(Notice::error(message)));
            }
        }

        effects
    }

    fn apply_theme(&mut self, theme: Theme, effects: &mut Vec<Effect>) {
        self.state.set_theme(theme);
        if let Err(e) = self.store.save_theme(theme) {
            effects.push(Effect::Notify(e.into()));
        }
    }

    /// Persistence is best effort: on failure the in-memory state stays as is
    /// and the user is told it was not saved.
    fn persist_cards(&mut self, effects: &mut Vec<Effect>) {
        if let Err(e) = self.store.save_cards(self.state.cards()) {
            effects.push(Effect::Notify(e.into()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::GoalCard;
    use crate::core::intent::FormField;
    use crate::core::theme::Palette;
    use crate::store::{MemoryStore, THEME_KEY};
    use crate::transfer::json::{Imported, parse_document};

    fn controller_with(titles: &[&str]) -> Controller<MemoryStore> {
        let mut store = RecordStore::new(MemoryStore::default());
        let cards: Vec<GoalCard> = titles
            .iter()
            .map(|t| GoalCard::from_form(t, "desc", "2024-06-01").unwrap())
            .collect();
        store.save_cards(&cards).unwrap();
        Controller::load(store)
    }

    fn add(controller: &mut Controller<MemoryStore>, title: &str) -> Vec<Effect> {
        controller.dispatch(Intent::ToggleAddForm);
        controller.dispatch(Intent::FormInput(FormField::Title, title.into()));
        controller.dispatch(Intent::FormInput(FormField::Description, "desc".into()));
        controller.dispatch(Intent::FormInput(FormField::DueDate, "2024-06-01".into()));
        controller.dispatch(Intent::SubmitAddForm)
    }

    fn celebrations(effects: &[Effect]) -> usize {
        effects.iter().filter(|e| matches!(e, Effect::Celebrate(_))).count()
    }

    #[test]
    fn load_falls_back_to_default_theme() {
        let mut inner = MemoryStore::default();
        inner.set(THEME_KEY, "not-a-theme").unwrap();
        let controller = Controller::load(RecordStore::new(inner));
        assert_eq!(controller.state().theme(), Theme::Dark);
        assert!(controller.state().cards().is_empty());
    }

    #[test]
    fn submitted_card_is_persisted() {
        let mut controller = controller_with(&[]);
        assert!(add(&mut controller, "Run").is_empty());
        assert_eq!(controller.store.load_cards().len(), 1);
        assert!(!controller.state().form().open);
    }

    #[test]
    fn blank_submission_notifies_and_keeps_form_open() {
        let mut controller = controller_with(&[]);
        controller.dispatch(Intent::ToggleAddForm);
        let effects = controller.dispatch(Intent::SubmitAddForm);
        assert!(matches!(
            &effects[..],
            [Effect::Notify(Notice { level: NoticeLevel::Error, .. })]
        ));
        assert!(controller.state().form().open);
        assert!(controller.state().cards().is_empty());
    }

    #[test]
    fn completing_last_card_celebrates_once() {
        let mut controller = controller_with(&["a", "b", "c"]);
        assert_eq!(celebrations(&controller.dispatch(Intent::ToggleCompleted(0))), 0);
        assert_eq!(celebrations(&controller.dispatch(Intent::ToggleCompleted(2))), 0);
        let effects = controller.dispatch(Intent::ToggleCompleted(1));
        assert_eq!(effects, vec![Effect::Celebrate(Theme::Dark)]);

        // Un-completing and toggling elsewhere never celebrates.
        assert_eq!(celebrations(&controller.dispatch(Intent::ToggleCompleted(1))), 0);
        assert_eq!(celebrations(&controller.dispatch(Intent::ToggleCompleted(0))), 0);
    }

    #[test]
    fn celebration_uses_current_theme() {
        let mut controller = controller_with(&["only"]);
        controller.dispatch(Intent::SetTheme(Theme::KawaiiPink));
        let effects = controller.dispatch(Intent::ToggleCompleted(0));
        assert_eq!(celebrations(&effects), 1);
        assert!(effects.contains(&Effect::Celebrate(Theme::KawaiiPink)));
    }

    #[test]
    fn toggle_is_persisted() {
        let mut controller = controller_with(&["a"]);
        controller.dispatch(Intent::ToggleCompleted(0));
        assert!(controller.store.load_cards()[0].completed);
    }

    #[test]
    fn delete_flow_persists_removal() {
        let mut controller = controller_with(&["a", "b", "c"]);
        controller.dispatch(Intent::RequestDelete { index: 1, title: "b".into() });
        assert!(controller.dispatch(Intent::ConfirmDelete).is_empty());
        let stored: Vec<String> = controller.store.load_cards().into_iter().map(|c| c.title).collect();
        assert_eq!(stored, vec!["a", "c"]);
    }

    #[test]
    fn stale_confirm_warns_without_mutation() {
        let mut controller = controller_with(&["a", "b"]);
        controller.dispatch(Intent::RequestDelete { index: 1, title: "b".into() });
        controller.dispatch(Intent::ImportFinished(Ok(Imported {
            cards: vec![GoalCard::from_form("x", "y", "2024-01-01").unwrap()],
            dropped: 0,
        })));
        let effects = controller.dispatch(Intent::ConfirmDelete);
        assert!(matches!(
            &effects[..],
            [Effect::Notify(Notice { level: NoticeLevel::Warning, .. })]
        ));
        assert_eq!(controller.state().cards().len(), 1);
    }

    #[test]
    fn delete_all_flow() {
        let mut controller = controller_with(&["a", "b"]);
        controller.dispatch(Intent::RequestDeleteAll);
        assert_eq!(controller.state().pending(), &PendingDeletion::All);
        controller.dispatch(Intent::CancelDeleteAll);
        assert_eq!(controller.state().cards().len(), 2);

        controller.dispatch(Intent::RequestDeleteAll);
        controller.dispatch(Intent::ConfirmDeleteAll);
        assert!(controller.state().cards().is_empty());
        assert!(controller.store.load_cards().is_empty());
    }

    #[test]
    fn theme_changes_are_persisted() {
        let mut controller = controller_with(&[]);
        controller.dispatch(Intent::ChangePalette(Palette::KawaiiLavender));
        assert_eq!(controller.state().theme(), Theme::KawaiiLavenderDark);
        controller.dispatch(Intent::ToggleDarkMode);
        assert_eq!(controller.state().theme(), Theme::KawaiiLavender);
        assert_eq!(controller.store.load_theme(), Some(Theme::KawaiiLavender));
    }

    #[test]
    fn persistence_failure_keeps_memory_state() {
        let mut controller = Controller::load(RecordStore::new(MemoryStore::with_quota(4)));
        let effects = add(&mut controller, "Too big to store");
        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::error(
                "Not enough storage space. Please export some data first."
            ))]
        );
        assert_eq!(controller.state().cards().len(), 1);
    }

    #[test]
    fn export_empty_collection_only_notifies() {
        let mut controller = controller_with(&[]);
        assert_eq!(
            controller.dispatch(Intent::ExportDocument),
            vec![Effect::Notify(Notice::info("No goals to export."))]
        );
        assert_eq!(
            controller.dispatch(Intent::ExportCalendar),
            vec![Effect::Notify(Notice::info("No goals to export."))]
        );
    }

    #[test]
    fn export_document_roundtrips_through_import() {
        let mut controller = controller_with(&["a", "b"]);
        controller.dispatch(Intent::ToggleCompleted(1));
        let effects = controller.dispatch(Intent::ExportDocument);
        let [Effect::Export(file)] = &effects[..] else {
            panic!("unexpected effects: {effects:?}");
        };
        assert_eq!(file.file_name, "goals.json");

        let imported = parse_document(&file.contents).unwrap();
        assert_eq!(imported.cards, controller.state().cards());
    }

    #[test]
    fn export_calendar_names_ics_file() {
        let mut controller = controller_with(&["a"]);
        let effects = controller.dispatch(Intent::ExportCalendar);
        let [Effect::Export(file)] = &effects[..] else {
            panic!("unexpected effects: {effects:?}");
        };
        assert_eq!(file.file_name, "goals-calendar.ics");
        assert!(file.contents.contains("SUMMARY:a\r\n"));
    }

    #[test]
    fn partial_import_warns_and_applies_subset() {
        let mut controller = controller_with(&["old"]);
        let imported = parse_document(
            r#"[{"title":"A","description":"B","dueDate":"2024-01-01","completed":false},{"title":""}]"#,
        )
        .unwrap();
        let effects = controller.dispatch(Intent::ImportFinished(Ok(imported)));
        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::warning(PARTIAL_IMPORT_NOTICE))]
        );
        assert_eq!(controller.state().cards().len(), 1);
        assert_eq!(controller.store.load_cards()[0].title, "A");
    }

    #[test]
    fn partial_import_notice_explains_field_rules() {
        let mut controller = controller_with(&[]);
        let imported = parse_document(
            r#"[{"title":"A","description":"B"},{"title":"C","description":"D","completed":"yes"},{"title":"E","description":"F","dueDate":7}]"#,
        )
        .unwrap();
        assert_eq!(imported.dropped, 2);
        let effects = controller.dispatch(Intent::ImportFinished(Ok(imported)));
        let [Effect::Notify(notice)] = &effects[..] else {
            panic!("unexpected effects: {effects:?}");
        };
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("true/false completed flag"));
        assert!(notice.message.contains("due date of at most 10 characters"));
    }

    #[test]
    fn invalid_due_date_notifies_and_adds_nothing() {
        let mut controller = controller_with(&["a"]);
        controller.dispatch(Intent::ToggleAddForm);
        controller.dispatch(Intent::FormInput(FormField::Title, "Run".into()));
        controller.dispatch(Intent::FormInput(FormField::Description, "5k".into()));
        controller.dispatch(Intent::FormInput(FormField::DueDate, "next week".into()));
        let effects = controller.dispatch(Intent::SubmitAddForm);
        assert!(matches!(
            &effects[..],
            [Effect::Notify(Notice { level: NoticeLevel::Error, .. })]
        ));
        assert!(controller.state().form().open);
        assert_eq!(controller.store.load_cards().len(), 1);
    }

    #[test]
    fn failed_import_changes_nothing() {
        let mut controller = controller_with(&["keep"]);
        let effects = controller.dispatch(Intent::ImportFinished(Err(
            "JSON file is invalid or corrupted.".into(),
        )));
        assert_eq!(effects.len(), 1);
        assert_eq!(controller.state().cards()[0].title, "keep");
    }
}
