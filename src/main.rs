// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Trailmark CLI entrypoint.
//!
//! Settings come from defaults, then `TRAILMARK_*` environment variables, then flags. Workouts
//! are stored as `<store-dir>/workouts.json`; logs go to `<store-dir>/trailmark.log`.

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;
use trailmark::config::{self, Settings};
use trailmark::model::Coords;
use trailmark::ops::WorkoutCollection;
use trailmark::store::{WorkoutArchive, WriteDurability};
use trailmark::tui::{self, TerminalView};

const DEMO_ORIGIN: (f64, f64) = (38.7223, -9.1393);
const DEMO_LOG_FILE: &str = "trailmark-demo.log";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<store-dir>] [--origin <lat,lng>] [--durable-writes] [--delete-delay-ms <ms>]\n  {program} [--store <dir>] [--origin <lat,lng>] [--durable-writes] [--delete-delay-ms <ms>]\n  {program} --demo [--origin <lat,lng>] [--delete-delay-ms <ms>]\n\nIf store-dir/--store is omitted, {store} or the current working directory is used.\n--origin sets your position (also {origin}); without one, new workouts cannot be added.\n--demo starts with a few sample workouts kept in memory only.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).",
        store = config::ENV_STORE,
        origin = config::ENV_ORIGIN,
    );
}

#[derive(Debug, Default, Clone, PartialEq)]
struct CliOptions {
    demo: bool,
    store_dir: Option<String>,
    origin: Option<Coords>,
    durable_writes: bool,
    delete_delay_ms: Option<u64>,
}

impl CliOptions {
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(dir) = &self.store_dir {
            settings.store_dir = PathBuf::from(dir);
        }
        if let Some(origin) = self.origin {
            settings.origin = Some(origin);
        }
        if self.durable_writes {
            settings.durability = WriteDurability::Durable;
        }
        if let Some(ms) = self.delete_delay_ms {
            settings.delete_delay = Duration::from_millis(ms);
        }
        settings
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--store" => {
                if options.store_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.store_dir = Some(dir);
            }
            "--origin" => {
                if options.origin.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.origin = Some(raw.parse::<Coords>().map_err(|_| ())?);
            }
            "--delete-delay-ms" => {
                if options.delete_delay_ms.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.delete_delay_ms = Some(raw.parse().map_err(|_| ())?);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.store_dir.is_some() {
                    return Err(());
                }
                options.store_dir = Some(arg);
            }
        }
    }

    if options.demo && (options.store_dir.is_some() || options.durable_writes) {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "trailmark".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let settings = options.apply(Settings::from_env()?);
        let log_path = if options.demo {
            std::env::temp_dir().join(DEMO_LOG_FILE)
        } else {
            settings.log_path()
        };
        trailmark::logging::init(&log_path, &settings.log_filter)?;
        info!(
            store = %settings.store_dir.display(),
            demo = options.demo,
            delete_delay_ms = settings.delete_delay.as_millis() as u64,
            "starting"
        );

        if options.demo {
            let origin = match settings.origin {
                Some(origin) => origin,
                None => Coords::new(DEMO_ORIGIN.0, DEMO_ORIGIN.1)?,
            };
            let store = tui::demo_store(origin)?;
            let collection = WorkoutCollection::new(TerminalView::new(), WorkoutArchive::new(store))
                .with_delete_delay(settings.delete_delay);
            return tui::run(collection, Ok(origin));
        }

        let home = settings.position_source().current_position();
        let collection =
            WorkoutCollection::new(TerminalView::new(), WorkoutArchive::new(settings.file_store()))
                .with_delete_delay(settings.delete_delay);
        tui::run(collection, home)
    })();

    if let Err(err) = result {
        eprintln!("trailmark: {err}");
        std::process::exit(1);
    }
}
