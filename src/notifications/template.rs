//! Message rendering.
//!
//! Templates use Tera (Jinja2-like) syntax and see the finished command as the
//! `result` variable:
//!
//! | field       | value                                     |
//! |-------------|-------------------------------------------|
//! | `command`   | arguments joined by spaces                |
//! | `args`      | list of arguments                         |
//! | `start`     | RFC 3339 timestamp                        |
//! | `end`       | RFC 3339 timestamp                        |
//! | `duration`  | elapsed milliseconds                      |
//! | `success`   | bool                                      |
//! | `exit_code` | integer, or null if none was reported     |
//! | `error`     | spawn/wait error text, or null            |
//!
//! Extra filters: `time(format=?, tz=?)`, `duration` and
//! `truncatechars(length=N)`.

use std::collections::HashMap;
use std::time::Duration;

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::Serialize;
use tera::{Context, Tera, Value};
use thiserror::Error;

use crate::error::error_chain;
use crate::runner::RunResult;

/// strftime pattern used by the `time` filter when no `format` is given
pub const DEFAULT_TIME_FORMAT: &str = "%Y/%-m/%e %H:%M:%S%p";

/// Default chat message: status glyph plus the full command line
pub const WEBHOOK_TEMPLATE: &str = "{% if result.success %}:thumbsup:{% else %}:thumbsdown:{% endif %} \
Finished `{{ result.command }}` at {{ result.end | time }} in {{ result.duration | duration }}";

/// Default SMS body, with the command cut down to fit a single message
pub const SMS_TEMPLATE: &str = "Finished `{{ result.command | truncatechars(length=76) }}` \
at {{ result.end | time }} in {{ result.duration | duration }}";

const TEMPLATE_NAME: &str = "message";
const ELLIPSIS: &str = "...";

/// A template that could not be parsed or rendered
///
/// Tera reports the useful detail in nested sources, so the whole chain is
/// flattened into the message.
#[derive(Debug, Error)]
#[error("{detail}")]
pub struct RenderError {
    detail: String,
}

impl From<tera::Error> for RenderError {
    fn from(source: tera::Error) -> Self {
        Self {
            detail: error_chain(&source),
        }
    }
}

/// Picks the configured template, falling back to `default` when it is unset
/// or blank.
pub fn resolve_template<'a>(custom: Option<&'a str>, default: &'a str) -> &'a str {
    match custom {
        Some(template) if !template.trim().is_empty() => template,
        _ => default,
    }
}

/// Renders `template` against `result`.
pub fn render(template: &str, result: &RunResult) -> Result<String, RenderError> {
    let mut tera = Tera::default();
    tera.register_filter("time", time_filter);
    tera.register_filter("duration", duration_filter);
    tera.register_filter("truncatechars", truncatechars_filter);
    tera.add_raw_template(TEMPLATE_NAME, template)?;

    let mut context = Context::new();
    context.insert("result", &ResultView::from(result));

    Ok(tera.render(TEMPLATE_NAME, &context)?)
}

/// Formats a duration the way it appears in messages: `350ms`, `2.500s`,
/// `1m02s`, `1h02m03s`.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        return format!("{millis}ms");
    }

    let secs = duration.as_secs();
    if secs < 60 {
        return format!("{}.{:03}s", secs, duration.subsec_millis());
    }

    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
    if hours == 0 {
        format!("{minutes}m{seconds:02}s")
    } else {
        format!("{hours}h{minutes:02}m{seconds:02}s")
    }
}

/// Limits `text` to at most `limit` characters. Truncated text ends with
/// `...`, which counts towards the limit.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    if limit <= ELLIPSIS.len() {
        return text.chars().take(limit).collect();
    }

    let mut truncated: String = text.chars().take(limit - ELLIPSIS.len()).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[derive(Serialize)]
struct ResultView<'a> {
    command: String,
    args: &'a [String],
    start: Timestamp,
    end: Timestamp,
    duration: u64,
    success: bool,
    exit_code: Option<i32>,
    error: Option<String>,
}

impl<'a> From<&'a RunResult> for ResultView<'a> {
    fn from(result: &'a RunResult) -> Self {
        Self {
            command: result.command_line(),
            args: result.args(),
            start: result.start(),
            end: result.end(),
            duration: u64::try_from(result.duration().as_millis()).unwrap_or(u64::MAX),
            success: result.success(),
            exit_code: result.exit_code(),
            error: result.error().map(|e| error_chain(e)),
        }
    }
}

fn string_arg<'a>(
    filter: &str,
    args: &'a HashMap<String, Value>,
    name: &str,
) -> tera::Result<Option<&'a str>> {
    match args.get(name) {
        None => Ok(None),
        Some(value) => value.as_str().map(Some).ok_or_else(|| {
            tera::Error::msg(format!(
                "Filter `{filter}` expected `{name}` to be a string, got `{value}`"
            ))
        }),
    }
}

fn time_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = value.as_str().ok_or_else(|| {
        tera::Error::msg(format!("Filter `time` expects a timestamp string, got `{value}`"))
    })?;
    let timestamp: Timestamp = raw.parse().map_err(|e| {
        tera::Error::msg(format!("Filter `time` received an invalid timestamp `{raw}`: {e}"))
    })?;

    let format = string_arg("time", args, "format")?.unwrap_or(DEFAULT_TIME_FORMAT);
    let tz = match string_arg("time", args, "tz")? {
        None => TimeZone::system(),
        Some(name) if name.eq_ignore_ascii_case("utc") => TimeZone::UTC,
        Some(name) => TimeZone::get(name).map_err(|e| {
            tera::Error::msg(format!("Filter `time` got unknown time zone `{name}`: {e}"))
        })?,
    };

    let zoned = timestamp.to_zoned(tz);
    let formatted = jiff::fmt::strtime::format(format, &zoned).map_err(|e| {
        tera::Error::msg(format!("Filter `time` could not apply format `{format}`: {e}"))
    })?;

    Ok(Value::String(formatted))
}

fn duration_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let millis = value.as_u64().ok_or_else(|| {
        tera::Error::msg(format!(
            "Filter `duration` expects a non-negative number of milliseconds, got `{value}`"
        ))
    })?;
    Ok(Value::String(format_duration(Duration::from_millis(millis))))
}

fn truncatechars_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let limit = args
        .get("length")
        .and_then(Value::as_u64)
        .ok_or_else(|| tera::Error::msg("Filter `truncatechars` expected an arg called `length`"))?;
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    Ok(Value::String(truncate_chars(&text, limit)))
}
