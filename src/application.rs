use std::path::PathBuf;

use cosmic::app::{Core, Task as CosmicTask, context_drawer};
use cosmic::iced::Length;
use cosmic::widget::{button, column, container, icon, nav_bar, row, scrollable, text, text_input};
use cosmic::{Application, Element, executor};

use crate::components::banner::{celebration_banner, notice_banner};
use crate::components::month_calendar::MonthCalendarState;
use crate::config::{APP_ID, GoalpostConfig};
use crate::core::intent::{FormField, Intent};
use crate::core::theme::Theme;
use crate::message::{Message, Page};
use crate::pages;
use crate::state::{Controller, Effect, ExportFile, Notice, NoticeLevel};
use crate::store::{DirStore, RecordStore};
use crate::transfer::json::import_file;

const CELEBRATION_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    Normal,
    Add,
    Calendar,
}

pub struct Goalpost {
    core: Core,
    nav_model: nav_bar::Model,
    config: GoalpostConfig,
    cosmic_config: cosmic::cosmic_config::Config,
    active_page: Page,

    goals: Controller<DirStore>,

    // Feedback
    notices: Vec<Notice>,
    celebrating: Option<Theme>,
    celebration_generation: u64,

    // Import
    import_path: String,
    importing: bool,

    month_calendar: MonthCalendarState,
}

pub struct Flags {
    pub config: GoalpostConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
    pub launch_mode: LaunchMode,
}

impl Application for Goalpost {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let config = flags.config;

        if let Err(e) = config.ensure_dirs() {
            log::error!("Failed to create data directory: {}", e);
        }

        let mut nav_model = nav_bar::Model::default();
        for page in Page::ALL {
            nav_model
                .insert()
                .text(page.title())
                .icon(icon::from_name(page.icon_name()).icon())
                .data(*page);
        }

        log::debug!("Record store at {}", config.data_directory.display());
        let goals = Controller::load(RecordStore::new(config.record_store()));

        let mut app = Self {
            core,
            nav_model,
            config,
            cosmic_config: flags.cosmic_config,
            active_page: Page::Goals,
            goals,
            notices: Vec::new(),
            celebrating: None,
            celebration_generation: 0,
            import_path: String::new(),
            importing: false,
            month_calendar: MonthCalendarState::default(),
        };

        match flags.launch_mode {
            LaunchMode::Add => {
                app.activate_page(Page::Goals);
                app.goals.dispatch(Intent::ToggleAddForm);
                app.core.window.show_context = true;
            }
            LaunchMode::Calendar => app.activate_page(Page::Calendar),
            LaunchMode::Normal => app.activate_page(Page::Goals),
        }

        (app, CosmicTask::none())
    }

    fn nav_model(&self) -> Option<&nav_bar::Model> {
        Some(&self.nav_model)
    }

    fn on_nav_select(&mut self, id: nav_bar::Id) -> CosmicTask<Message> {
        if let Some(page) = self.nav_model.data::<Page>(id).cloned() {
            self.active_page = page;
            self.nav_model.activate(id);
        }
        CosmicTask::none()
    }

    fn header_center(&self) -> Vec<Element<'_, Message>> {
        vec![text::title4(pages::goals::progress_label(self.goals.state())).into()]
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            Message::Goal(intent) => {
                if matches!(intent, Intent::ImportFinished(_)) {
                    self.importing = false;
                }
                let effects = self.goals.dispatch(intent);
                self.core.window.show_context = self.goals.state().form().open;
                return self.run_effects(effects);
            }

            Message::OpenAddForm => {
                if !self.goals.state().form().open {
                    self.goals.dispatch(Intent::ToggleAddForm);
                }
                self.core.window.show_context = true;
            }

            Message::ImportPathChanged(value) => {
                self.import_path = value;
            }

            Message::ImportFile => {
                if self.importing {
                    return CosmicTask::none();
                }
                let path = self.import_path.trim();
                if path.is_empty() {
                    self.push_notice(Notice::error("Please select a valid .json file."));
                    return CosmicTask::none();
                }
                let path = expand_home(path);
                log::debug!("Importing goals from {}", path.display());
                self.importing = true;
                return CosmicTask::perform(
                    async move { import_file(&path).await.map_err(|e| e.to_string()) },
                    |result| cosmic::Action::App(Message::Goal(Intent::ImportFinished(result))),
                );
            }

            Message::DismissNotice => {
                if !self.notices.is_empty() {
                    self.notices.remove(0);
                }
            }

            Message::CelebrationDone(generation) => {
                if generation == self.celebration_generation {
                    self.celebrating = None;
                }
            }

            Message::CalendarPrevMonth => {
                self.month_calendar.prev_month();
            }

            Message::CalendarNextMonth => {
                self.month_calendar.next_month();
            }

            Message::CalendarSelectDay(date) => {
                self.month_calendar.select_day(date);
            }

            Message::OpenSettings => {
                self.activate_page(Page::Settings);
            }

            Message::SetExportDirectory(value) => {
                self.config.export_directory = expand_home(value.trim());
                self.save_config();
            }

            Message::SetWeekStart(week_start) => {
                self.config.week_start = week_start;
                self.save_config();
            }

            Message::ToggleDebugLogging => {
                self.config.debug_logging = !self.config.debug_logging;
                goalpost::set_debug_logging(self.config.debug_logging);
                self.save_config();
            }
        }

        CosmicTask::none()
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        let mode_icon = if self.goals.state().theme().is_dark() {
            "weather-clear-symbolic"
        } else {
            "weather-clear-night-symbolic"
        };

        vec![
            row()
                .spacing(4)
                .push(
                    button::icon(icon::from_name("list-add-symbolic"))
                        .on_press(Message::OpenAddForm),
                )
                .push(
                    button::icon(icon::from_name(mode_icon))
                        .on_press(Message::Goal(Intent::ToggleDarkMode)),
                )
                .push(
                    button::icon(icon::from_name("emblem-system-symbolic"))
                        .on_press(Message::OpenSettings),
                )
                .into(),
        ]
    }

    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Message>> {
        if !self.goals.state().form().open {
            return None;
        }
        Some(
            context_drawer::context_drawer(
                container(scrollable(self.add_form_view().padding(16))).width(Length::Fill),
                Message::Goal(Intent::ToggleAddForm),
            )
            .title("New Goal"),
        )
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        if self.goals.state().form().open {
            self.goals.dispatch(Intent::ToggleAddForm);
            self.core.window.show_context = false;
        }
        CosmicTask::none()
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Message> {
        cosmic::iced::event::listen_with(|event, _status, _id| {
            match event {
                cosmic::iced::Event::Keyboard(cosmic::iced::keyboard::Event::KeyPressed {
                    key: cosmic::iced::keyboard::Key::Character(ref c),
                    modifiers,
                    ..
                }) if c.as_str() == "n" && modifiers.control() => Some(Message::OpenAddForm),
                _ => None,
            }
        })
    }

    fn view(&self) -> Element<'_, Message> {
        let today = chrono::Local::now().date_naive();
        let state = self.goals.state();

        let page = match self.active_page {
            Page::Goals => pages::goals::goals_view(state, &self.import_path, self.importing, today),
            Page::Calendar => pages::calendar::calendar_view(
                &self.month_calendar,
                state.cards(),
                today,
                self.config.week_start,
            ),
            Page::Settings => pages::settings::settings_view(&self.config, state.theme()),
        };

        let mut content = column().spacing(8);
        if let Some(theme) = self.celebrating {
            content = content.push(container(celebration_banner(theme)).padding([0, 16]));
        }
        if let Some(notice) = self.notices.first() {
            content = content.push(container(notice_banner(notice)).padding([0, 16]));
        }
        content = content.push(page);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl Goalpost {
    fn add_form_view(&self) -> column::Column<'_, Message> {
        let form = self.goals.state().form();
        let mut content = column().spacing(16);

        content = content.push(text::title4("Title"));
        content = content.push(
            text_input::text_input("What do you want to achieve?", &form.title)
                .on_input(|v| Message::Goal(Intent::FormInput(FormField::Title, v)))
                .on_submit(|_| Message::Goal(Intent::SubmitAddForm))
                .width(Length::Fill),
        );

        content = content.push(text::title4("Description"));
        content = content.push(
            text_input::text_input("Describe the goal...", &form.description)
                .on_input(|v| Message::Goal(Intent::FormInput(FormField::Description, v)))
                .on_submit(|_| Message::Goal(Intent::SubmitAddForm))
                .width(Length::Fill),
        );

        content = content.push(text::title4("Due date"));
        content = content.push(
            text_input::text_input("YYYY-MM-DD", &form.due_date)
                .on_input(|v| Message::Goal(Intent::FormInput(FormField::DueDate, v)))
                .on_submit(|_| Message::Goal(Intent::SubmitAddForm))
                .width(Length::Fill),
        );

        content = content.push(
            button::suggested("Add Goal")
                .on_press(Message::Goal(Intent::SubmitAddForm))
                .width(Length::Fill),
        );

        content
    }

    fn run_effects(&mut self, effects: Vec<Effect>) -> CosmicTask<Message> {
        let mut batch: Vec<CosmicTask<Message>> = Vec::new();

        for effect in effects {
            match effect {
                Effect::Notify(notice) => self.push_notice(notice),
                Effect::Celebrate(theme) => {
                    self.celebration_generation += 1;
                    self.celebrating = Some(theme);
                    let generation = self.celebration_generation;
                    batch.push(CosmicTask::perform(
                        async move {
                            tokio::time::sleep(std::time::Duration::from_secs(CELEBRATION_SECS)).await;
                            generation
                        },
                        |generation| cosmic::Action::App(Message::CelebrationDone(generation)),
                    ));
                }
                Effect::Export(file) => {
                    let notice = self.write_export(&file);
                    self.push_notice(notice);
                }
            }
        }

        if batch.is_empty() {
            return CosmicTask::none();
        }
        CosmicTask::batch(batch)
    }

    fn write_export(&self, file: &ExportFile) -> Notice {
        let path = self.config.export_path(file.file_name);
        let written = std::fs::create_dir_all(&self.config.export_directory)
            .and_then(|_| std::fs::write(&path, &file.contents));
        match written {
            Ok(()) => {
                log::info!("Exported {} bytes to {}", file.contents.len(), path.display());
                Notice::info(format!("Saved {}", path.display()))
            }
            Err(e) => {
                log::error!("Failed to write {}: {}", path.display(), e);
                Notice::error(format!("Could not save {}: {}", file.file_name, e))
            }
        }
    }

    fn push_notice(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => log::info!("{}", notice.message),
            NoticeLevel::Warning => log::warn!("{}", notice.message),
            NoticeLevel::Error => log::error!("{}", notice.message),
        }
        self.notices.push(notice);
    }

    fn activate_page(&mut self, page: Page) {
        self.active_page = page;
        let target = self
            .nav_model
            .iter()
            .find(|&id| self.nav_model.data::<Page>(id) == Some(&page));
        if let Some(id) = target {
            self.nav_model.activate(id);
        }
    }

    fn save_config(&self) {
        use cosmic::cosmic_config::CosmicConfigEntry;
        if let Err(e) = self.config.write_entry(&self.cosmic_config) {
            log::error!("Failed to save config: {:?}", e);
        }
    }
}

/// Expand a leading `~/` against the home directory.
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
