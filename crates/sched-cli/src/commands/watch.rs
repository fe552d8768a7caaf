//! Watch command: the live timeline.
//!
//! Two producers post [`RecomputeRequest`]s onto one channel: a ticker, and
//! a reader that turns each stdin line into a filter change. A single
//! consumer owns the timeline and is the only place classes change.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use sched_core::{ActivationEngine, RecomputeRequest, Timeline, TrackFilter};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

const CHANNEL_CAPACITY: usize = 16;

/// Runs until Ctrl-C or end of input.
pub async fn run(timeline: Timeline, filter: TrackFilter, period: Duration) -> Result<()> {
    let mut stdout = std::io::stdout();
    let input = BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = session(timeline, filter, period, input, &mut stdout, Utc::now) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, stopping");
            Ok(())
        }
    }
}

/// One live session over `input`.
///
/// Ends once `input` is exhausted and every request posted before that has
/// been handled.
pub async fn session<R, W, F>(
    mut timeline: Timeline,
    filter: TrackFilter,
    period: Duration,
    input: R,
    writer: &mut W,
    clock: F,
) -> Result<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: Write,
    F: Fn() -> DateTime<Utc>,
{
    let options = timeline.filter_options();
    writeln!(writer, "Tracks: {}", options.join(", "))?;
    writeln!(writer, "Type a track (or \"all\") and press enter to change the filter.")?;
    writer.flush()?;

    let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
    tx.send(RecomputeRequest::Tick).await?;
    let ticker = tokio::spawn(tick(tx.clone(), period));
    let reader = tokio::spawn(async move {
        let result = read_filters(input, tx, options).await;
        tracing::debug!("input closed, stopping");
        // Dropping the ticker's sender lets the consumer drain and finish.
        ticker.abort();
        result
    });

    let mut engine = ActivationEngine::new(filter);
    drive(&mut timeline, &mut engine, &mut rx, writer, clock).await?;
    reader.await?
}

/// Consumes requests until every producer has gone away.
pub async fn drive<W, F>(
    timeline: &mut Timeline,
    engine: &mut ActivationEngine,
    requests: &mut mpsc::Receiver<RecomputeRequest>,
    writer: &mut W,
    clock: F,
) -> Result<()>
where
    W: Write,
    F: Fn() -> DateTime<Utc>,
{
    while let Some(request) = requests.recv().await {
        let reason = match &request {
            RecomputeRequest::Tick => "tick",
            RecomputeRequest::FilterChanged(filter) => {
                writeln!(writer, "filter: {filter}")?;
                "filter"
            }
        };

        let updates = engine.handle(request, clock(), timeline);
        tracing::debug!(reason, changed = updates.len(), "recomputed display classes");
        for update in &updates {
            writeln!(writer, "{} -> {}", update.id, update.class_name())?;
        }
        writer.flush()?;
    }
    Ok(())
}

/// Posts a tick every `period`, the first one `period` from now.
async fn tick(requests: mpsc::Sender<RecomputeRequest>, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        if requests.send(RecomputeRequest::Tick).await.is_err() {
            break;
        }
    }
}

/// Posts a filter change for every input line naming a known track.
async fn read_filters<R>(
    input: R,
    requests: mpsc::Sender<RecomputeRequest>,
    options: Vec<String>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let Ok(filter) = line.parse::<TrackFilter>();
        if !options.iter().any(|option| option == filter.as_str()) {
            eprintln!("unknown track: {}", line.trim());
            continue;
        }
        if requests
            .send(RecomputeRequest::FilterChanged(filter))
            .await
            .is_err()
        {
            break;
        }
    }
    Ok(())
}
