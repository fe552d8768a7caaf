//! Groups command: locations in timeline order.

use std::io::Write;

use anyhow::Result;
use sched_core::Timeline;

pub fn run<W: Write>(writer: &mut W, timeline: &Timeline) -> Result<()> {
    for group in timeline.groups() {
        writeln!(writer, "{}", group.name)?;
    }
    Ok(())
}
