#![allow(dead_code)]

use cosmic::app::Settings;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::iced::Limits;

mod application;
mod components;
mod message;
mod pages;

use goalpost::config;
use goalpost::core;
use goalpost::state;
use goalpost::store;
use goalpost::transfer;

use application::{Flags, Goalpost, LaunchMode};
use config::{APP_ID, CONFIG_VERSION, GoalpostConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cosmic_cfg = cosmic::cosmic_config::Config::new(APP_ID, CONFIG_VERSION)?;
    let config = GoalpostConfig::get_entry(&cosmic_cfg).unwrap_or_else(|(errors, cfg)| {
        for e in errors {
            eprintln!("goalpost: config entry fell back to default: {}", e);
        }
        cfg
    });

    // Log to the systemd user journal (`journalctl --user -t goalpost -f`).
    // Our own targets pass at info/debug (per config), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                let target = metadata.target();
                if target.starts_with("goalpost")
                    || target.starts_with("application")
                    || target.starts_with("pages")
                    || target.starts_with("components")
                {
                    let max = if goalpost::debug_logging() {
                        log::LevelFilter::Debug
                    } else {
                        log::LevelFilter::Info
                    };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        goalpost::set_debug_logging(config.debug_logging);

        match systemd_journal_logger::JournalLog::new() {
            Ok(journal) => {
                let journal = journal.with_syslog_identifier("goalpost".to_string());
                if let Err(e) = log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })) {
                    eprintln!("goalpost: logger already set: {}", e);
                }
                // Global max must be Debug so debug records can pass once toggled on
                log::set_max_level(log::LevelFilter::Debug);
            }
            Err(e) => eprintln!("goalpost: journal logging unavailable: {}", e),
        }
    }

    let launch_mode = {
        let args: Vec<String> = std::env::args().collect();
        if args.iter().any(|a| a == "--add") {
            LaunchMode::Add
        } else if args.iter().any(|a| a == "--calendar") {
            LaunchMode::Calendar
        } else {
            LaunchMode::Normal
        }
    };

    let mut settings = Settings::default();
    settings = settings.size_limits(Limits::NONE.min_width(400.0).min_height(300.0));

    let flags = Flags { config, cosmic_config: cosmic_cfg, launch_mode };
    cosmic::app::run::<Goalpost>(settings, flags)?;

    Ok(())
}
