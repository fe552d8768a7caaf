//! Show command: the whole timeline at one instant.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use sched_core::timeline::{RenderGroup, RenderItem, ViewWindow};
use sched_core::{ActivationEngine, RecomputeRequest, Timeline, TrackFilter};
use serde::Serialize;

/// JSON output: what the rendering widget is initialised with.
#[derive(Debug, Serialize)]
struct ShowOutput {
    at: DateTime<Utc>,
    filter: String,
    timezone: String,
    window: Option<ViewWindow>,
    groups: Vec<RenderGroup>,
    items: Vec<RenderItem>,
}

/// Classifies every session at `now` under `filter` and prints the result.
pub fn run<W, Tz>(
    writer: &mut W,
    timeline: &mut Timeline,
    filter: TrackFilter,
    now: DateTime<Utc>,
    json: bool,
    tz: &Tz,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut engine = ActivationEngine::new(filter);
    engine.handle(RecomputeRequest::Tick, now, timeline);

    if json {
        let output = ShowOutput {
            at: now,
            filter: engine.filter().to_string(),
            timezone: timezone_name(),
            window: timeline.view_window(tz),
            groups: timeline.render_groups(),
            items: timeline.render_items(),
        };
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        return Ok(());
    }

    for group in timeline.groups() {
        let mut items: Vec<_> = timeline
            .items()
            .iter()
            .filter(|item| item.group == group.name)
            .collect();
        if items.is_empty() {
            continue;
        }
        items.sort_by_key(|item| (item.interval.start, item.interval.end));

        writeln!(writer, "{}", group.name)?;
        for item in items {
            let start = item.interval.start.with_timezone(tz);
            let end = item.interval.end.with_timezone(tz);
            writeln!(
                writer,
                "  {}-{}  {:<11}  {:>4}  {}",
                start.format("%b %-d %H:%M"),
                end.format("%H:%M"),
                item.display_class().as_str(),
                item.id.as_str(),
                item.title
            )?;
        }
    }
    Ok(())
}

/// IANA name of the local zone, for JSON consumers.
fn timezone_name() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::commands::fixtures;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn text_output_groups_sessions_by_lane() {
        let mut timeline = fixtures::timeline();
        let mut output = Vec::new();
        run(
            &mut output,
            &mut timeline,
            TrackFilter::Track("AI Summit".to_string()),
            at("2025-11-11T10:45:00Z"),
            false,
            &Utc,
        )
        .unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Centre Stage
          Nov 11 10:00-11:00  active          1  Opening keynote
        Stage 4
          Nov 11 10:30-12:00  active          4  Workshop
          Nov 11 23:30-00:30  normal          2  Night panel
        Meetup 2
          Nov 11 13:00-14:00  normal          3  Founders meetup
        ");
    }

    #[test]
    fn highlighted_when_not_running() {
        let mut timeline = fixtures::timeline();
        let mut output = Vec::new();
        run(
            &mut output,
            &mut timeline,
            TrackFilter::Track("AI Summit".to_string()),
            at("2025-11-11T09:00:00Z"),
            false,
            &Utc,
        )
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("highlighted     1  Opening keynote"));
        assert!(output.contains("highlighted     4  Workshop"));
    }

    #[test]
    fn json_output_has_render_records() {
        let mut timeline = fixtures::timeline();
        let mut output = Vec::new();
        run(
            &mut output,
            &mut timeline,
            TrackFilter::All,
            at("2025-11-12T00:00:00Z"),
            true,
            &Utc,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["filter"], "all");
        assert_eq!(value["groups"][0]["id"], "Centre Stage");
        assert_eq!(value["groups"].as_array().unwrap().len(), 4);
        assert_eq!(value["items"].as_array().unwrap().len(), 4);
        assert_eq!(value["window"]["start"], "2025-11-11T15:00:00Z");

        let night = value["items"]
            .as_array()
            .unwrap()
            .iter()
            .find(|item| item["id"] == "2")
            .unwrap();
        assert_eq!(night["className"], "event-item event-active");
        assert_eq!(night["end"], "2025-11-12T00:30:00Z");
    }
}
