//! Event details for the popup shown when a timeline item is clicked.

use std::fmt;

use chrono::TimeZone;
use serde::Serialize;

use crate::event::{Participation, RawEvent};
use crate::resolve::ResolvedInterval;
use crate::timeline::Timeline;
use crate::types::EventId;

const MAP_BASE_URL: &str = "https://map.websummit.com";
const ATTENDEE_BASE_URL: &str = "https://websummit.com/attendees";

/// Shown when a session has no location.
pub const UNKNOWN_LOCATION: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetails {
    pub id: EventId,
    pub title: String,
    /// e.g. `"Monday, November 10  •  6:35PM - 7:00PM"`.
    pub when: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    pub description: String,
    pub speakers: Vec<Speaker>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Speaker {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Timeline {
    /// Details for a clicked item, or `None` if the id is not on the timeline.
    pub fn details<Tz>(&self, id: &EventId, tz: &Tz) -> Option<EventDetails>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.get(id)
            .map(|item| EventDetails::new(&item.raw, &item.interval, tz))
    }
}

impl EventDetails {
    pub fn new<Tz>(event: &RawEvent, interval: &ResolvedInterval, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let slug = event.conference_slug.as_deref();
        let location = event.location_name();
        let map_url = match (slug, location, event.location.as_ref().and_then(|l| l.id.as_ref())) {
            (Some(slug), Some(name), Some(location_id)) => Some(format!(
                "{MAP_BASE_URL}/{slug}?location={}&location_id={}",
                encode_query(name),
                encode_query(location_id.as_str())
            )),
            _ => None,
        };

        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            when: format_when(interval, tz),
            location: location.unwrap_or(UNKNOWN_LOCATION).to_string(),
            map_url,
            track: event.track_name().map(str::to_string),
            description: event.description.clone(),
            speakers: event
                .speakers
                .iter()
                .map(|speaker| Speaker::new(speaker, slug))
                .collect(),
        }
    }
}

impl Speaker {
    fn new(participation: &Participation, slug: Option<&str>) -> Self {
        let profile_url = match (slug, participation.attendance_id.as_ref()) {
            (Some(slug), Some(attendance_id)) => Some(format!(
                "{ATTENDEE_BASE_URL}/{slug}/{attendance_id}/{}",
                profile_slug(&participation.name)
            )),
            _ => None,
        };
        Self {
            name: participation.name.clone(),
            profile_url,
            job_title: non_empty(participation.job_title.as_deref()),
            company: non_empty(participation.company_name.as_deref()),
            avatar_url: participation
                .avatar_urls
                .as_ref()
                .and_then(|urls| non_empty(urls.thumb.as_deref())),
        }
    }
}

impl fmt::Display for EventDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.when)?;
        match &self.map_url {
            Some(url) => writeln!(f, "Location: {} <{url}>", self.location)?,
            None => writeln!(f, "Location: {}", self.location)?,
        }
        if let Some(track) = &self.track {
            writeln!(f, "Track: {track}")?;
        }
        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description.trim_end())?;
        }
        writeln!(f)?;
        if self.speakers.is_empty() {
            return writeln!(f, "No speakers announced for this event.");
        }
        writeln!(f, "Speakers:")?;
        for speaker in &self.speakers {
            let role = [speaker.job_title.as_deref(), speaker.company.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "- {}", speaker.name)?;
            if !role.is_empty() {
                write!(f, " ({role})")?;
            }
            if let Some(url) = &speaker.profile_url {
                write!(f, " <{url}>")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// `"Monday, November 10  •  6:35PM - 7:00PM"` in `tz`.
pub fn format_when<Tz>(interval: &ResolvedInterval, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let start = interval.start.with_timezone(tz);
    let end = interval.end.with_timezone(tz);
    format!(
        "{}  •  {} - {}",
        start.format("%A, %B %-d"),
        start.format("%-I:%M%p"),
        end.format("%-I:%M%p")
    )
}

/// `"Ada  Lovelace"` becomes `"ada-lovelace"`.
fn profile_slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

/// Percent-encodes a query-string value.
fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
