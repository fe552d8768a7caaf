//! Details command: what the popup shows for a clicked session.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Result, bail};
use chrono::TimeZone;
use sched_core::{EventId, Timeline};

pub fn run<W, Tz>(writer: &mut W, timeline: &Timeline, id: &str, tz: &Tz) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let id = EventId::new(id)?;
    let Some(details) = timeline.details(&id, tz) else {
        bail!("no session with id {id} on the timeline");
    };
    write!(writer, "{details}")?;
    Ok(())
}
