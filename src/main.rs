use std::collections::BTreeMap;
use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::error;

use pymisc::cli::{extract_log_level, Cli};
use pymisc::logging::set_up_logging;
use pymisc::message::Message;
use pymisc::printer::Printer;
use pymisc::registry::CheckCode;
use pymisc::settings::configuration;
use pymisc::settings::Settings;
use pymisc::{check, fs};

fn inner_main() -> Result<ExitCode> {
    let cli = Cli::parse();
    set_up_logging(extract_log_level(&cli))?;

    let options = configuration::load_options(cli.config.as_deref(), &cli.files)?;
    let settings = Settings::from_options(cli.overridden(options))?;

    let mut messages: Vec<Message> = vec![];
    let mut counts: BTreeMap<CheckCode, usize> = BTreeMap::new();
    for path in &cli.files {
        for entry in fs::iter_python_files(path, &settings.exclude) {
            let path = entry.path();
            let contents = match fs::read_file(path) {
                Ok(contents) => contents,
                Err(err) => {
                    error!("Failed to read {}: {err}", path.to_string_lossy());
                    continue;
                }
            };
            let checked = check(path, &contents, &settings);
            let filename = path.to_string_lossy();
            messages.extend(
                checked
                    .checks
                    .into_iter()
                    .map(|check| Message::from_check(check, &filename)),
            );
            for (code, count) in checked.counts {
                *counts.entry(code).or_insert(0) += count;
            }
        }
    }
    messages.sort();

    let stdout = io::stdout();
    let mut printer = Printer::new(stdout.lock(), cli.format);
    printer.write_once(&messages)?;
    if cli.statistics {
        printer.write_statistics(&counts)?;
    }

    if !messages.is_empty() && !cli.exit_zero {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    match inner_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:?}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}
