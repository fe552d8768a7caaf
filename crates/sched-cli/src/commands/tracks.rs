//! Tracks command: values accepted by `--track`.

use std::io::Write;

use anyhow::Result;
use sched_core::Timeline;

pub fn run<W: Write>(writer: &mut W, timeline: &Timeline) -> Result<()> {
    for option in timeline.filter_options() {
        writeln!(writer, "{option}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;

    #[test]
    fn all_comes_first() {
        let mut output = Vec::new();
        run(&mut output, &fixtures::timeline()).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "all\nAI Summit\nNight Summit\n"
        );
    }
}
