//! Raw schedule records as they arrive from the feed.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{AttendanceId, EventId, LocationId};

/// A session in the conference schedule feed.
///
/// Dates and times are free text (`"November 10"`, `"6.35PM"`); they are
/// only interpreted by [`crate::DateTimeResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Unique identifier for this session.
    pub id: EventId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Month and day, e.g. `"November 10"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Start clock time, e.g. `"6.35PM"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub starts_at: String,
    /// End clock time, e.g. `"7.00PM"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub ends_at: String,
    /// Conference slug, e.g. `"lis25"`; its digits give the year.
    #[serde(
        rename = "conferenceSlug",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub conference_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(
        rename = "schedule_track",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub track: Option<Track>,
    #[serde(
        rename = "timeslot_participations",
        default,
        deserialize_with = "null_as_default"
    )]
    pub speakers: Vec<Participation>,
}

impl RawEvent {
    /// The venue name, if present and non-empty.
    pub fn location_name(&self) -> Option<&str> {
        self.location
            .as_ref()
            .and_then(|l| l.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// The schedule track name, if present and non-empty.
    pub fn track_name(&self) -> Option<&str> {
        self.track
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Where a session takes place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<LocationId>,
}

/// The topical track a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub name: Option<String>,
}

/// A speaker appearing in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub attendance_id: Option<AttendanceId>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub avatar_urls: Option<AvatarUrls>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarUrls {
    #[serde(default)]
    pub thumb: Option<String>,
}
