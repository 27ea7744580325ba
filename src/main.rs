// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! CineAssist CLI entrypoint.
//!
//! Runs the interactive chat TUI. The API key comes from `GEMINI_API_KEY`;
//! logs go to `cineassist.log` inside the data folder so the terminal stays
//! clean while the shell is in raw mode.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use cineassist::backend::{ChatModel, GeminiClient};
use cineassist::store::DataFolder;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--data <dir>] [--model fast|pro] [--log-filter <filter>]\n\nThe data folder (default: the platform data dir) holds recent queries,\nsaved camera setups, and cineassist.log.\n\n--model selects the backend model: `fast` (default) or `pro`.\n--log-filter sets the tracing filter for the log file (default `info`)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    data_dir: Option<String>,
    model: Option<ChatModel>,
    log_filter: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                if options.data_dir.is_some() {
                    return Err(());
                }
                options.data_dir = Some(args.next().ok_or(())?);
            }
            "--model" => {
                if options.model.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.model = Some(ChatModel::parse(&raw).ok_or(())?);
            }
            "--log-filter" => {
                if options.log_filter.is_some() {
                    return Err(());
                }
                options.log_filter = Some(args.next().ok_or(())?);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("cineassist"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn init_logging(data_dir: &std::path::Path, filter: Option<&str>) -> Result<(), Box<dyn Error>> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("cineassist.log"))?;

    let filter = EnvFilter::try_new(filter.unwrap_or("info"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "cineassist".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let data_dir = options
            .data_dir
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        std::fs::create_dir_all(&data_dir)?;

        init_logging(&data_dir, options.log_filter.as_deref())?;

        let client = GeminiClient::from_env(options.model.unwrap_or_default())?;
        let folder = DataFolder::new(&data_dir);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let handle = runtime.handle().clone();

        runtime.block_on(async move {
            tokio::task::spawn_blocking(move || {
                cineassist::tui::run(client, folder, handle).map_err(|err| err.to_string())
            })
            .await
            .map_err(|err| err.to_string())?
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("cineassist: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};
    use cineassist::backend::ChatModel;

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_data_dir() {
        let options = parse_options(["--data".to_owned(), "some/dir".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.data_dir.as_deref(), Some("some/dir"));
    }

    #[test]
    fn parses_model_selector() {
        let options = parse_options(["--model".to_owned(), "pro".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.model, Some(ChatModel::Pro));
    }

    #[test]
    fn parses_log_filter() {
        let options =
            parse_options(["--log-filter".to_owned(), "cineassist=debug".to_owned()].into_iter())
                .expect("parse options");
        assert_eq!(options.log_filter.as_deref(), Some("cineassist=debug"));
    }

    #[test]
    fn rejects_unknown_model() {
        parse_options(["--model".to_owned(), "gpt".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(
            ["--data".to_owned(), "a".to_owned(), "--data".to_owned(), "b".to_owned()].into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_missing_values() {
        parse_options(["--data".to_owned()].into_iter()).unwrap_err();
        parse_options(["--model".to_owned()].into_iter()).unwrap_err();
    }
}
