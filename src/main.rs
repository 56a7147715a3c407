use anyhow::{Context, Result, bail};
use env_logger::{Builder, Env, Target};
use log::{debug, error, info};
use serde_json::Value;
use std::{
    io::{self, BufRead, Read, Write},
    path::Path,
    rc::Rc,
};
use ui_utils::{
    DeviceInfo, ManualViewport, config::AppConfig, on_device_change, reset_fields,
};

const USAGE: &str = "usage: ui-utils <reset [FILE] | device [WIDTH [HEIGHT]] | watch>";

fn main() {
    if let Err(e) = run() {
        error!("application error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    initialize();

    let config = AppConfig::load().context("failed to load configuration")?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("reset") => reset(&config, args.get(1).map(Path::new)),
        Some("device") => device(&config, &args[1..]),
        Some("watch") => watch(&config),
        Some(other) => bail!("unknown command '{other}'\n{USAGE}"),
        None => bail!("missing command\n{USAGE}"),
    }
}

fn initialize() {
    log_panics::init();

    let mut builder = if cfg!(debug_assertions) {
        Builder::from_env(Env::default().default_filter_or("debug"))
    } else {
        Builder::from_env(Env::default().default_filter_or("info"))
    };

    // stdout carries the JSON output
    builder
        .format(|f, record| writeln!(f, "{}", record.args()))
        .target(Target::Stderr)
        .init();

    info!("module version: {}", env!("CARGO_PKG_VERSION"));
}

fn reset(config: &AppConfig, file: Option<&Path>) -> Result<()> {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            input
        }
    };

    let mut document: Value = serde_json::from_str(&input).context("failed to parse input JSON")?;
    if let Some(path) = &config.reset.options_path {
        debug!("using reset options from {}", path.display());
    }

    reset_fields(&mut document, &config.reset.options);

    let output = serde_json::to_string_pretty(&document).context("failed to serialize result")?;
    writeln!(io::stdout(), "{output}").context("failed to write result")
}

fn device(config: &AppConfig, args: &[String]) -> Result<()> {
    let width = match args.first() {
        Some(width) => width
            .parse::<f64>()
            .with_context(|| format!("failed to parse width '{width}'"))?,
        None => config.viewport.width,
    };
    let height = match args.get(1) {
        Some(height) => height
            .parse::<f64>()
            .with_context(|| format!("failed to parse height '{height}'"))?,
        None => config.viewport.height,
    };

    print_info(&DeviceInfo::from_dimensions(width, height))
}

fn watch(config: &AppConfig) -> Result<()> {
    let viewport = Rc::new(ManualViewport::new(
        config.viewport.width,
        config.viewport.height,
    ));

    let subscription = on_device_change(Rc::clone(&viewport), |info| {
        if let Err(e) = print_info(&info) {
            error!("failed to report device change: {e:#}");
        }
    });

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (width, height) = parse_dimensions(line)?;
        viewport.resize(width, height);
    }

    subscription.unsubscribe();
    Ok(())
}

fn parse_dimensions(line: &str) -> Result<(f64, f64)> {
    let mut parts = line.split_whitespace();
    let (Some(width), Some(height), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("failed to parse dimensions '{line}': expected 'WIDTH HEIGHT'");
    };

    let width = width
        .parse::<f64>()
        .with_context(|| format!("failed to parse width '{width}'"))?;
    let height = height
        .parse::<f64>()
        .with_context(|| format!("failed to parse height '{height}'"))?;

    Ok((width, height))
}

fn print_info(info: &DeviceInfo) -> Result<()> {
    let output = serde_json::to_string(info).context("failed to serialize device info")?;
    writeln!(io::stdout(), "{output}").context("failed to write device info")
}
