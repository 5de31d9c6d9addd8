use std::{fmt::Write, sync::LazyLock};

use regex::Regex;

use super::TrackMetadata;

/// Key of the derived clock field
pub const TIME_KEY: &str = "time";
/// MPRIS2 track length key, in microseconds
pub const LENGTH_KEY: &str = "mpris:length";

const MICROS_PER_SECOND: i64 = 1_000_000;

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(\w+(?:-\w+)?)").expect("placeholder pattern is valid"));

/// Render track metadata into a user template
///
/// `%key` and `%word-word` placeholders are replaced left to right. A key missing from
/// the metadata becomes a single space so the template keeps its shape. When the template
/// mentions `time` anywhere, the `time` field is shown as `M:SS` instead of raw seconds.
///
/// # Examples
///
/// ```
/// use mpris_panel::services::mpris::{TrackMetadata, format::render};
///
/// let metadata: TrackMetadata = [("title", "Song"), ("time", "65")].into_iter().collect();
/// assert_eq!(render(&metadata, "%title (%time)"), "Song (1:05)");
/// assert_eq!(render(&metadata, "%album|"), " |");
/// ```
pub fn render(metadata: &TrackMetadata, template: &str) -> String {
    let clock = template
        .contains(TIME_KEY)
        .then(|| seconds_to_clock(track_seconds(metadata)));

    let mut rendered = String::with_capacity(template.len());
    let mut copied = 0;

    for captures in PLACEHOLDER.captures_iter(template) {
        let (Some(placeholder), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        rendered.push_str(&template[copied..placeholder.start()]);
        match (key.as_str(), clock.as_deref()) {
            (TIME_KEY, Some(clock)) => rendered.push_str(clock),
            (key, _) => match metadata.get(key) {
                Some(value) => {
                    let _ = write!(rendered, "{value}");
                }
                None => rendered.push(' '),
            },
        }
        copied = placeholder.end();
    }

    rendered.push_str(&template[copied..]);
    rendered
}

/// Format a number of seconds as `M:SS`
///
/// Values below one minute, negative ones included, stay entirely in the seconds field.
pub fn seconds_to_clock(total_seconds: i64) -> String {
    if total_seconds < 60 {
        return format!("0:{total_seconds:02}");
    }
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

fn track_seconds(metadata: &TrackMetadata) -> i64 {
    if let Some(time) = metadata.get(TIME_KEY) {
        return time.as_int();
    }
    metadata
        .get(LENGTH_KEY)
        .map(|length| length.as_int() / MICROS_PER_SECOND)
        .unwrap_or(0)
}
