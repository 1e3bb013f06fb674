use core::fmt;
use std::fs::OpenOptions;
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, fmt as tracingfmt};

struct AlignedFormatter;

/// Visitor to extract the profile field value, shown in its own column
struct ProfileVisitor {
    profile: Option<String>,
}

impl tracing::field::Visit for ProfileVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "profile" {
            self.profile = Some(format!("{:?}", value));
        }
    }
}

impl<S, N> FormatEvent<S, N> for AlignedFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        // Extract profile field if present
        let mut visitor = ProfileVisitor { profile: None };
        event.record(&mut visitor);
        let has_profile = visitor.profile.is_some();
        let profile_str = format!("{:<8}", visitor.profile.unwrap_or_default());

        // Add ANSI color codes for different log levels
        let (color_level, color_reset) = match *metadata.level() {
            tracing::Level::ERROR => ("\x1b[31m", "\x1b[0m"),
            tracing::Level::WARN => ("\x1b[33m", "\x1b[0m"),
            tracing::Level::INFO => ("\x1b[32m", "\x1b[0m"),
            tracing::Level::DEBUG => ("\x1b[34m", "\x1b[0m"),
            tracing::Level::TRACE => ("\x1b[35m", "\x1b[0m"),
        };

        // Transform file path: "crates/ecc240-codec/src/correct.rs"
        // becomes "General  [codec] correct.rs"
        let file_path = metadata.file().unwrap_or("unknown");
        let formatted_path = if let Some(src_idx) = file_path.find("/src/") {
            let before_src = &file_path[..src_idx];
            let after_src = &file_path[src_idx + 5..]; // Skip "/src/"

            // Extract the crate name (after "ecc240-")
            let crate_name = if let Some(idx) = before_src.rfind("ecc240-") {
                &before_src[idx + 7..]
            } else {
                before_src.rsplit('/').next().unwrap_or("unknown")
            };

            format!("{} [{}] {}", profile_str, crate_name, after_src)
        } else {
            file_path.to_string()
        };

        // Format: "LEVEL profile [crate] file:line: message"
        let location = format!(
            "{}{:<5}{} {}:{}:",
            color_level,
            metadata.level(),
            color_reset,
            formatted_path,
            metadata.line().unwrap_or(0)
        );

        let mut message_buf = String::new();
        let message_writer = format::Writer::new(&mut message_buf);
        ctx.field_format().format_fields(message_writer, event)?;

        // Remove the profile field from the message, it already has a column
        if has_profile {
            if let Some(idx) = message_buf.find("profile=") {
                if let Some(space_idx) = message_buf[idx..].find(' ') {
                    message_buf.replace_range(idx..idx + space_idx + 1, "");
                } else {
                    message_buf.truncate(idx);
                }
            }
        }

        write!(writer, "{:<width$} {}", location, message_buf, width = 60)?;
        writeln!(writer)
    }
}

static INIT_LOG: Once = Once::new();

/// Sets up logging with maximum verbosity (trace level)
/// Mainly for unit tests
pub fn setup_logging_verbose() {
    setup_logging(EnvFilter::new("trace"), None);
}

/// Sets up default logging to stdout and optionally, a verbose log file
/// Returns a guard, that needs to be kept alive for logging to file to work
pub fn setup_logging_default(verbose_logfile: Option<String>) -> Option<WorkerGuard> {
    let stdout_filter = get_default_stdout_filter();
    let logfile_and_filter = verbose_logfile.map(|file| (file, get_default_logfile_filter()));
    setup_logging(stdout_filter, logfile_and_filter)
}

pub fn get_default_stdout_filter() -> EnvFilter {
    EnvFilter::new("info")
        // Per-frame correction logs are far too chatty for the console
        .add_directive("ecc240_codec::correct=warn".parse().unwrap())
        .add_directive("ecc240_codec::selftest=info".parse().unwrap())
        .add_directive("ecc240_tool=debug".parse().unwrap())
}

fn get_default_logfile_filter() -> EnvFilter {
    EnvFilter::new("debug")
}

/// Sets up logging to stdout and optionally, a verbose log file
/// If an output file is requested, returns Some<WorkerGuard>. Keep this value alive
/// or logging to file may cease working. If no output file is provided, or it can not
/// be opened, returns None.
fn setup_logging(stdout_filter: EnvFilter, outfile: Option<(String, EnvFilter)>) -> Option<WorkerGuard> {
    if let Some((outfile, outfile_filter)) = outfile {
        let file = match OpenOptions::new().create(true).append(true).open(&outfile) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Failed to open log file {}: {}", outfile, e);
                return setup_logging(get_default_stdout_filter(), None);
            }
        };
        let (file_writer, guard) = tracing_appender::non_blocking(file);

        // Setup once
        INIT_LOG.call_once(|| {
            let file_layer = tracingfmt::layer()
                .event_format(AlignedFormatter)
                .with_writer(file_writer)
                .with_ansi(false);

            // Change both here and below in the non-logfile variant.
            let stdout_layer = tracingfmt::layer().event_format(AlignedFormatter);

            tracing_subscriber::registry()
                .with(file_layer.with_filter(outfile_filter))
                .with(stdout_layer.with_filter(stdout_filter))
                .init();
        });

        Some(guard)
    } else {
        // Setup once
        INIT_LOG.call_once(|| {
            let stdout_layer = tracingfmt::layer().event_format(AlignedFormatter);

            tracing_subscriber::registry()
                .with(stdout_layer.with_filter(stdout_filter))
                .init();
        });
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for d in [
            "ecc240_codec::correct=warn",
            "ecc240_codec::selftest=info",
            "ecc240_tool=debug",
        ] {
            assert!(d.parse::<tracing_subscriber::filter::Directive>().is_ok(), "{}", d);
        }
    }

    #[test]
    fn test_setup_logging_twice() {
        setup_logging_verbose();
        setup_logging_verbose();
        tracing::info!(profile = "General", "logging set up");
    }
}
