use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use log::debug;

use crate::error::{Error, Result};
use crate::models::{
    DateField, SleepRecord, SleepState, TimeSeriesSample, SAMPLE_INTERVAL_SECS, SLEEP_GRAPH_FIELD,
};
use crate::timestamp::{parse_local, to_iso8601};

/// Turn a column name into a log key: spaces become underscores.
pub fn sanitize_key(name: &str) -> String {
    name.replace(' ', "_")
}

/// Parse the "Start of Night" column into the anchor of the sleep graph.
pub fn anchor_timestamp(record: &SleepRecord, zone: Tz) -> Result<DateTime<Tz>> {
    let field = DateField::StartOfNight;
    match record.date(field) {
        Some(value) if !value.trim().is_empty() => parse_local(field.name(), value, zone),
        _ => Err(Error::missing(field.name())),
    }
}

/// Walk the packed graph from `anchor`, one sample every 30 seconds.
///
/// Codes are separated by single spaces, so an empty graph is a single
/// empty code and fails like any other unknown one.
pub fn expand_sleep_graph(graph: &str, anchor: DateTime<Tz>) -> Result<Vec<TimeSeriesSample>> {
    let step = TimeDelta::seconds(SAMPLE_INTERVAL_SECS);
    let mut timestamp = anchor;
    let mut samples = Vec::new();

    for (index, code) in graph.split(' ').enumerate() {
        let state = SleepState::from_code(code)?;
        if index > 0 {
            timestamp = timestamp.checked_add_signed(step).ok_or_else(|| {
                Error::parse(SLEEP_GRAPH_FIELD, graph, "sample time is out of range")
            })?;
        }
        samples.push(TimeSeriesSample { timestamp, state });
    }

    Ok(samples)
}

pub fn format_sample(sample: &TimeSeriesSample) -> String {
    format!("{} state={}\n", to_iso8601(&sample.timestamp), sample.state.label())
}

/// Rewrite every non-empty date column as ISO-8601 in `zone`.
pub fn normalize_dates(record: &mut SleepRecord, zone: Tz) -> Result<()> {
    for (field, value) in record.dates.iter_mut() {
        if value.is_empty() {
            continue;
        }
        let parsed = parse_local(field.name(), value, zone)?;
        *value = to_iso8601(&parsed);
    }
    Ok(())
}

/// Build the per-record summary line from an already normalized record.
///
/// Tokens are `key="value"`, sorted as whole strings and joined with `", "`,
/// prefixed by the "End of Night" value.
pub fn summary_line(record: &SleepRecord) -> Result<String> {
    let end_of_night = record
        .date(DateField::EndOfNight)
        .ok_or_else(|| Error::missing(DateField::EndOfNight.name()))?;

    let mut tokens: Vec<String> = record
        .fields()
        .map(|(name, value)| format!("{}=\"{}\"", sanitize_key(name), value))
        .collect();
    tokens.sort();

    Ok(format!("{} {}\n", end_of_night, tokens.join(", ")))
}

/// Convert one record into its series lines followed by its summary line.
///
/// Nothing is returned unless the whole record converts.
pub fn format_record(record: &SleepRecord, zone: Tz) -> Result<Vec<String>> {
    let anchor = anchor_timestamp(record, zone)?;

    let graph = record
        .sleep_graph
        .as_deref()
        .ok_or_else(|| Error::missing(SLEEP_GRAPH_FIELD))?;
    let samples = expand_sleep_graph(graph, anchor)?;

    let mut normalized = record.clone();
    normalize_dates(&mut normalized, zone)?;

    let mut lines: Vec<String> = samples.iter().map(format_sample).collect();
    lines.push(summary_line(&normalized)?);

    debug!(
        "record starting {} expanded into {} samples",
        to_iso8601(&anchor),
        samples.len()
    );

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone};

    fn anchor() -> DateTime<Tz> {
        parse_local("Start of Night", "01/02/2020 23:00", Tz::UTC).unwrap()
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("Start of Night"), "Start_of_Night");
        assert_eq!(sanitize_key("ZQ"), "ZQ");
    }

    #[test]
    fn test_expand_steps_thirty_seconds() {
        let samples = expand_sleep_graph("1 2 3 4", anchor()).unwrap();
        let lines: Vec<_> = samples.iter().map(format_sample).collect();
        assert_eq!(
            lines,
            vec![
                "2020-01-02T23:00:00+00:00 state=wake\n",
                "2020-01-02T23:00:30+00:00 state=REM\n",
                "2020-01-02T23:01:00+00:00 state=Light\n",
                "2020-01-02T23:01:30+00:00 state=Deep\n",
            ]
        );
    }

    #[test]
    fn test_expand_crosses_midnight() {
        let late = parse_local("Start of Night", "12/31/2019 23:59", Tz::UTC).unwrap();
        let samples = expand_sleep_graph("0 0 0", late).unwrap();
        assert_eq!(to_iso8601(&samples[2].timestamp), "2020-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_expand_rejects_unknown_and_double_spaces() {
        assert!(matches!(expand_sleep_graph("1 9 2", anchor()), Err(Error::UnknownState(c)) if c == "9"));
        assert!(matches!(expand_sleep_graph("1  2", anchor()), Err(Error::UnknownState(c)) if c.is_empty()));
        assert!(matches!(expand_sleep_graph("", anchor()), Err(Error::UnknownState(_))));
    }

    #[test]
    fn test_expand_out_of_range_is_parse_error() {
        let last = Tz::UTC.from_utc_datetime(&NaiveDateTime::MAX);

        let single = expand_sleep_graph("1", last).unwrap();
        assert_eq!(single.len(), 1);

        let err = expand_sleep_graph("1 2", last).unwrap_err();
        assert!(matches!(err, Error::Parse { field, .. } if field == SLEEP_GRAPH_FIELD));
    }

    #[test]
    fn test_normalize_skips_empty_values() {
        let mut record = SleepRecord::from_pairs([
            ("Rise Time", "01/03/2020 07:15"),
            ("First Alarm Ring", ""),
            ("Comment", "01/03/2020 07:15"),
        ]);
        normalize_dates(&mut record, Tz::UTC).unwrap();

        assert_eq!(record.get("Rise Time"), Some("2020-01-03T07:15:00+00:00"));
        assert_eq!(record.get("First Alarm Ring"), Some(""));
        assert_eq!(record.get("Comment"), Some("01/03/2020 07:15"));
    }

    #[test]
    fn test_summary_line_sorted_and_prefixed() {
        let record = SleepRecord::from_pairs([
            ("ZQ", "80"),
            ("End of Night", "2020-01-03T06:50:00+00:00"),
            ("Awakenings", "2"),
        ]);
        assert_eq!(
            summary_line(&record).unwrap(),
            "2020-01-03T06:50:00+00:00 Awakenings=\"2\", End_of_Night=\"2020-01-03T06:50:00+00:00\", ZQ=\"80\"\n"
        );
    }

    #[test]
    fn test_summary_sorts_whole_tokens() {
        let record = SleepRecord::from_pairs([
            ("End of Night", ""),
            ("Rise Time", ""),
            ("Rise Time2", "x"),
        ]);
        let line = summary_line(&record).unwrap();
        // '2' sorts before '='
        assert!(line.find("Rise_Time2=").unwrap() < line.find("Rise_Time=").unwrap());
        assert!(line.starts_with(" End_of_Night=\"\""));
    }

    #[test]
    fn test_summary_requires_end_of_night() {
        let record = SleepRecord::from_pairs([("ZQ", "80")]);
        assert!(matches!(summary_line(&record), Err(Error::MissingField { field }) if field == "End of Night"));
    }

    #[test]
    fn test_format_record_missing_start() {
        let record = SleepRecord::from_pairs([
            (SLEEP_GRAPH_FIELD, "1 2"),
            ("Start of Night", ""),
            ("End of Night", "01/03/2020 06:50"),
        ]);
        let err = format_record(&record, Tz::UTC).unwrap_err();
        assert!(err.is_parse_error());
    }
}
