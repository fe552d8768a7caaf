//! Core type definitions with validation.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Generates a validated string ID newtype with common trait implementations.
///
/// The feed is not consistent about whether identifiers are JSON strings or
/// numbers, so deserialization accepts both and stores the textual form.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = match IdRepr::deserialize(deserializer)? {
                    IdRepr::Text(s) => s,
                    IdRepr::Number(n) => n.to_string(),
                };
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(serde_json::Number),
}

define_string_id!(
    /// A validated schedule event identifier.
    ///
    /// Event IDs must be non-empty. They key the timeline model, so the
    /// normalizer drops later records that reuse an ID.
    EventId, "event ID"
);

define_string_id!(
    /// A validated venue location identifier, used for map links.
    LocationId, "location ID"
);

define_string_id!(
    /// A validated speaker attendance identifier, used for profile links.
    AttendanceId, "attendance ID"
);

/// The current visual state of a timeline item.
///
/// Ordered by priority: an active event is never shown as merely highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayClass {
    /// No special state.
    #[default]
    Normal,
    /// The event's track matches the selected filter.
    Highlighted,
    /// The event is in progress.
    Active,
}

impl DisplayClass {
    /// Short name used in logs and JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Highlighted => "highlighted",
            Self::Active => "active",
        }
    }

    /// Class string understood by the rendering widget.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        match self {
            Self::Normal => "event-item",
            Self::Highlighted => "event-item event-highlighted",
            Self::Active => "event-item event-active",
        }
    }
}

impl fmt::Display for DisplayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value of the filter select control that means "no track selected".
pub const ALL_TRACKS: &str = "all";

/// The currently selected track filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TrackFilter {
    /// No filter; nothing is highlighted.
    #[default]
    All,
    /// Highlight events on this track.
    Track(String),
}

impl TrackFilter {
    /// Whether an event on `track` should be highlighted under this filter.
    pub fn highlights(&self, track: Option<&str>) -> bool {
        match self {
            Self::All => false,
            Self::Track(selected) => track == Some(selected.as_str()),
        }
    }

    /// The select-control value for this filter.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_TRACKS,
            Self::Track(name) => name,
        }
    }
}

impl fmt::Display for TrackFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrackFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ALL_TRACKS {
            Ok(Self::All)
        } else {
            Ok(Self::Track(s.to_string()))
        }
    }
}
