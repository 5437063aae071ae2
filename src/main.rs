// SPDX-License-Identifier: MPL-2.0
use env_logger::{Builder, Target};
use log::LevelFilter;
use tsubame::app::{self, paths, Flags};
use tsubame::config;
use tsubame::media::LoadContext;

const USAGE: &str = "\
Usage: tsubame [OPTIONS] [SOURCE...]

Shows each SOURCE in its own tile. A source is a file path, an http(s) URL,
image://<provider>/<id> or icon:<path> (an icon from the selected theme).

Options:
  --config-dir <DIR>  Directory holding settings.toml
  --theme <NAME>      Icon theme for icon:<path> sources (this run only)
  -h, --help          Print this help";

/// Level for this crate's own log records when `RUST_LOG` is unset.
const CRATE_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("tsubame", CRATE_LOG_LEVEL)
        .init();
}

fn main() -> iced::Result {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        return Ok(());
    }

    let config_dir: Option<String> = args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
        log::warn!("Ignoring --config-dir: {}", err);
        None
    });
    let theme: Option<String> = args.opt_value_from_str("--theme").unwrap_or_else(|err| {
        log::warn!("Ignoring --theme: {}", err);
        None
    });
    let sources: Vec<String> = args
        .finish()
        .into_iter()
        .filter_map(|arg| arg.into_string().ok())
        .collect();

    paths::init_cli_overrides(config_dir);

    let (mut config, warning) = config::load();
    if let Some(warning) = warning {
        log::warn!("{}", warning);
    }
    if theme.is_some() {
        config.loader.icon_theme = theme;
    }

    let context = match LoadContext::from_config(&config.loader) {
        Ok(context) => context,
        Err(err) => {
            log::error!("Failed to initialise image loading: {}", err);
            std::process::exit(1);
        }
    };

    log::info!("Starting with {} source(s)", sources.len());
    app::run(Flags {
        sources,
        config,
        context,
    })
}
