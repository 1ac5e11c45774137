use anyhow::Result;
use colored::Colorize;
use log::Level;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Silent,
    Quiet,
    #[default]
    Default,
    Verbose,
}

impl LogLevel {
    fn level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Silent => log::LevelFilter::Off,
            LogLevel::Quiet => log::LevelFilter::Error,
            LogLevel::Default => log::LevelFilter::Info,
            LogLevel::Verbose => log::LevelFilter::Debug,
        }
    }
}

pub fn set_up_logging(level: LogLevel) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let prefix = match record.level() {
                Level::Error => "error".red().bold(),
                Level::Warn => "warning".yellow().bold(),
                Level::Info | Level::Debug | Level::Trace => {
                    record.level().to_string().to_lowercase().dimmed()
                }
            };
            out.finish(format_args!("{prefix}{} {message}", ":".bold()))
        })
        .level(level.level_filter())
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
