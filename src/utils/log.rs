use colog::format::CologStyle;
use env_logger::Builder;
use log::{Level, LevelFilter};

struct CustomLevelTokens;

impl CologStyle for CustomLevelTokens {
    fn level_token(&self, level: &Level) -> &str {
        match *level {
            Level::Error => "ERR",
            Level::Warn => "WRN",
            Level::Info => "INF",
            Level::Debug => "DBG",
            Level::Trace => "TRC",
        }
    }
}

pub struct Logger;

impl Logger {
    /// `RUST_LOG`, when set, takes over the per-crate filters below.
    pub fn init(level: Option<LevelFilter>) {
        let mut builder = Builder::new();

        builder
            .filter(Some("guardchat"), level.unwrap_or(LevelFilter::Info))
            .filter(Some("reqwest"), LevelFilter::Warn)
            .filter(Some("hyper"), LevelFilter::Warn)
            .filter(Some("lopdf"), LevelFilter::Error)
            .target(env_logger::Target::Stdout)
            .format(colog::formatter(CustomLevelTokens))
            .write_style(env_logger::WriteStyle::Always);

        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        builder.init();
    }

    pub fn parse_level(level: Option<&str>) -> Option<LevelFilter> {
        level.and_then(|level| match level.parse::<LevelFilter>() {
            Ok(filter) => Some(filter),
            Err(_) => {
                eprintln!("unknown log level \"{level}\", falling back to info");
                None
            }
        })
    }
}
