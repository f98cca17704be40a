//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `scaffy-core`
//! only *emits* spans and events and never touches subscribers.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level           |
//! |----------|------------------------|
//! | (none)   | configured `log_level` |
//! | `-v`     | INFO                   |
//! | `-vv`    | DEBUG                  |
//! | `-vvv`   | TRACE                  |
//! | `--quiet`| ERROR                  |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
pub fn init_logging(args: &GlobalArgs, configured_level: &str) -> anyhow::Result<()> {
    let level = derive_level(args, configured_level);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "scaffy={level},scaffy_core={level},scaffy_adapters={level}"
        ))
    });

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Flags first, then the configured level.
pub fn derive_level<'a>(args: &GlobalArgs, configured_level: &'a str) -> &'a str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => configured_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
