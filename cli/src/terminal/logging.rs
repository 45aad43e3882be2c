use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Target of the per-knock trace lines.
const KNOCK_TRACE_DIRECTIVE: &str = "knockr_core=info";

/// Installs the stderr subscriber.
pub fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .event_format(KnockFormatter)
        .init();
}

/// `RUST_LOG` wins when set, otherwise verbose runs show `info` and quiet runs only `warn`.
/// Verbose always keeps the knock traces on, whatever `RUST_LOG` says.
fn build_filter(verbose: bool, env_directives: Option<String>) -> EnvFilter {
    let default_filter: &str = if verbose { "info" } else { "warn" };
    let filter: EnvFilter = match env_directives {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(default_filter),
    };

    match KNOCK_TRACE_DIRECTIVE.parse::<Directive>() {
        Ok(directive) if verbose => filter.add_directive(directive),
        _ => filter,
    }
}

pub struct KnockFormatter;

impl<S, N> FormatEvent<S, N> for KnockFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let (symbol, color_func) = symbol_for(event.metadata().level());

        if writer.has_ansi_escapes() {
            write!(writer, "{} ", color_func(symbol.into()))?;
        } else {
            write!(writer, "{} ", symbol)?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn symbol_for(level: &Level) -> (&'static str, fn(ColoredString) -> ColoredString) {
    match *level {
        Level::TRACE => ("[ ]", |s| s.dimmed()),
        Level::DEBUG => ("[?]", |s| s.blue()),
        Level::INFO => ("[+]", |s| s.green().bold()),
        Level::WARN => ("[*]", |s| s.yellow().bold()),
        Level::ERROR => ("[-]", |s| s.red().bold()),
    }
}
