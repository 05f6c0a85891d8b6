// src/driver.rs
//! Compilation driver glue: logging setup, diagnostic rendering and fatal
//! error exit.

use std::process::ExitCode;

use comptime_sema::{ResolveError, ResolveResult};
use miette::{GraphicalReportHandler, GraphicalTheme, NamedSource, ThemeCharacters, ThemeStyles};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;

/// Exit status of a compilation stopped by a fatal resolution error.
pub const FATAL_EXIT_CODE: u8 = 1;

/// Env var holding the tracing filter (`COMPTIME_LOG=comptime_sema=trace`).
pub const LOG_ENV: &str = "COMPTIME_LOG";

/// Env var selecting the log format: `compact` (default) or `full`.
pub const LOG_STYLE_ENV: &str = "COMPTIME_LOG_STYLE";

/// A timer that outputs nothing but still enables span timing calculation
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(
        &self,
        _w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

/// Install a stderr subscriber if `COMPTIME_LOG` is set. Returns whether a
/// subscriber was installed by this call.
pub fn init_tracing() -> bool {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return false;
    };
    let style = std::env::var(LOG_STYLE_ENV).unwrap_or_default();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let installed = if style == "full" {
        builder.try_init().is_ok()
    } else {
        builder.with_timer(NoTimestamp).try_init().is_ok()
    };
    if installed {
        tracing::debug!(%style, "tracing initialized");
    }
    installed
}

/// Attach the offending file's source to a resolution error.
fn to_report(err: ResolveError, source: &str) -> miette::Report {
    let name = err.file().to_string();
    miette::Report::new(err).with_source_code(NamedSource::new(name, source.to_string()))
}

/// Unicode with ANSI colors for terminals, plain ascii for logs and tests.
fn report_handler(colored: bool) -> GraphicalReportHandler {
    let theme = if colored {
        GraphicalTheme {
            characters: ThemeCharacters::unicode(),
            styles: ThemeStyles::ansi(),
        }
    } else {
        GraphicalTheme {
            characters: ThemeCharacters::ascii(),
            styles: ThemeStyles::none(),
        }
    };
    GraphicalReportHandler::new_themed(theme)
}

/// Render a resolution error against the source of the file it names.
pub fn render_error(err: ResolveError, source: &str, colored: bool) -> String {
    let report = to_report(err, source);
    let mut output = String::new();
    if let Err(fmt_err) = report_handler(colored).render_report(&mut output, report.as_ref()) {
        tracing::warn!(%fmt_err, "failed to render diagnostic");
    }
    output
}

/// Unwrap a resolution result at the top of the compilation driver. A fatal
/// error is rendered to stderr and turned into [`FATAL_EXIT_CODE`].
pub fn finish<T>(result: ResolveResult<T>, source: &str) -> Result<T, ExitCode> {
    result.map_err(|err| {
        tracing::error!(file = err.file(), "compile-time resolution failed");
        eprint!("{}", render_error(err, source, true));
        ExitCode::from(FATAL_EXIT_CODE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptime_identity::TypeId;

    fn method_not_found() -> ResolveError {
        ResolveError::MethodNotFound {
            method: "dump".to_string(),
            receiver: "Point".to_string(),
            file: "shapes.v".to_string(),
            span: (2, 5).into(),
        }
    }

    #[test]
    fn finish_passes_success_through() {
        assert!(matches!(finish(Ok(TypeId::I32), ""), Ok(ty) if ty == TypeId::I32));
    }

    #[test]
    fn finish_maps_fatal_error_to_exit_code() {
        let result: ResolveResult<TypeId> = Err(method_not_found());
        assert!(finish(result, "p.$method()").is_err());
    }

    #[test]
    fn render_method_not_found() {
        let output = render_error(method_not_found(), "p.$method()", false);
        assert!(output.contains("E2201"), "{output}");
        assert!(output.contains("shapes.v"), "{output}");
        assert!(output.contains("no method `dump` on this receiver"), "{output}");
        assert!(output.contains("help"), "{output}");
        assert!(!output.contains('\u{1b}'), "plain output has no escapes");
    }

    #[test]
    fn render_field_not_found() {
        let err = ResolveError::FieldNotFound {
            expr: "val".to_string(),
            field: "age".to_string(),
            file: "main.v".to_string(),
            span: (0, 3).into(),
        };
        let output = render_error(err, "val.$(f.name)", false);
        assert!(output.contains("E2202"), "{output}");
        assert!(output.contains("no field named `age`"), "{output}");
        assert!(output.contains("main.v"), "{output}");
    }

    #[test]
    fn init_tracing_without_filter_is_a_no_op() {
        if std::env::var_os(LOG_ENV).is_none() {
            assert!(!init_tracing());
        }
    }
}
