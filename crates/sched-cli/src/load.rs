//! Feed loading and normalization for all commands.

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use sched_core::{DateTimeResolver, Timeline, normalize};
use sched_feed::{FeedClient, FeedSource};

use crate::Config;

/// Resolver for the machine's local zone, falling back to this year.
pub fn local_resolver() -> DateTimeResolver<Local> {
    DateTimeResolver::new(Local, Local::now().year())
}

/// Fetches the configured feed and builds the timeline.
pub async fn load_timeline(config: &Config) -> Result<Timeline> {
    let Ok(source) = config.feed.parse::<FeedSource>();
    let client = FeedClient::new(config.request_timeout()).context("failed to create feed client")?;
    let events = client
        .load(&source)
        .await
        .with_context(|| format!("failed to load schedule from {source}"))?;

    let schedule = normalize(&events, &local_resolver());
    if !schedule.skipped.is_empty() {
        tracing::info!(
            skipped = schedule.skipped.len(),
            "some events were left off the timeline"
        );
    }
    Ok(Timeline::from(schedule))
}
