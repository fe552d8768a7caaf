//! End-to-end tests for the `sched` binary.
//!
//! Each test writes a feed file into a temp directory and runs the binary
//! against it with `HOME` and `TZ` pinned, so no user config leaks in and
//! times print in UTC.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const FEED: &str = r#"[
    {
        "id": 101, "title": "Opening keynote", "description": "Welcome.",
        "date": "November 11", "starts_at": "10.00AM", "ends_at": "11.00AM",
        "conferenceSlug": "lis25",
        "location": {"name": "Centre Stage", "id": 1},
        "schedule_track": {"name": "AI Summit"},
        "timeslot_participations": []
    },
    {
        "id": 102, "title": "Late show", "description": "",
        "date": "November 11", "starts_at": "11.30PM", "ends_at": "1.00AM",
        "conferenceSlug": "lis25",
        "location": {"name": "Stage 2", "id": 2},
        "schedule_track": {"name": "Night Summit"}
    },
    {
        "id": 103, "title": "Room talk", "description": "",
        "date": "November 12", "starts_at": "9.00AM", "ends_at": "9.45AM",
        "conferenceSlug": "lis25",
        "location": {"name": "Random Booth E045", "id": 3},
        "schedule_track": {"name": "Fintech Summit"}
    },
    {
        "id": 104, "title": "Broken", "description": "",
        "date": "Sometime", "starts_at": "9.00AM", "ends_at": "9.45AM",
        "conferenceSlug": "lis25",
        "location": {"name": "Masterclass 1", "id": 4}
    }
]"#;

fn sched_binary() -> String {
    env!("CARGO_BIN_EXE_sched").to_string()
}

fn write_feed(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("schedule.json");
    std::fs::write(&path, contents).unwrap();
    path
}

fn sched(temp: &Path, feed: &Path, args: &[&str]) -> Output {
    Command::new(sched_binary())
        .env("HOME", temp)
        .env("XDG_CONFIG_HOME", temp.join(".config"))
        .env("TZ", "UTC")
        .env_remove("SCHED_FEED")
        .env_remove("RUST_LOG")
        .arg("--feed")
        .arg(feed)
        .args(args)
        .output()
        .expect("failed to run sched")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "sched should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_groups_in_venue_order() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(temp.path(), FEED);

    let output = sched(temp.path(), &feed, &["groups"]);
    assert_eq!(
        stdout(&output),
        "Centre Stage\nStage 2\nMasterclass 1\nRandom Booth E045\n"
    );
}

#[test]
fn test_tracks_list_summits_first() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(temp.path(), FEED);

    let output = sched(temp.path(), &feed, &["tracks"]);
    assert_eq!(
        stdout(&output),
        "all\nAI Summit\nFintech Summit\nNight Summit\n"
    );
}

#[test]
fn test_show_skips_bad_dates_and_rolls_over_midnight() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(temp.path(), FEED);

    let output = sched(
        temp.path(),
        &feed,
        &["show", "--json", "--at", "2025-11-12T00:30:00Z"],
    );
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

    let items = value["items"].as_array().unwrap();
    assert_eq!(items.len(), 3, "the undated session is left out");

    let late = items.iter().find(|item| item["id"] == "102").unwrap();
    assert_eq!(late["end"], "2025-11-12T01:00:00Z");
    assert_eq!(late["className"], "event-item event-active");
}

#[test]
fn test_show_highlights_selected_track() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(temp.path(), FEED);

    let output = sched(
        temp.path(),
        &feed,
        &["show", "--track", "Fintech Summit", "--at", "2025-11-11T10:30:00Z"],
    );
    let text = stdout(&output);
    assert!(text.contains("active        101  Opening keynote"), "{text}");
    assert!(text.contains("highlighted   103  Room talk"), "{text}");
    assert!(text.contains("normal        102  Late show"), "{text}");
}

#[test]
fn test_details_for_clicked_session() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(temp.path(), FEED);

    let output = sched(temp.path(), &feed, &["details", "101"]);
    let text = stdout(&output);
    assert!(text.starts_with("Opening keynote\nTuesday, November 11  •  10:00AM - 11:00AM\n"));
    assert!(text.contains("No speakers announced for this event."));
}

#[test]
fn test_missing_feed_fails_without_output() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.json");

    let output = sched(temp.path(), &missing, &["groups"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("failed to load schedule"),
        "stderr should explain the failure"
    );
}

#[test]
fn test_non_array_feed_fails() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(temp.path(), r#"{"sessions": []}"#);

    let output = sched(temp.path(), &feed, &["tracks"]);
    assert!(!output.status.success());
}

#[test]
fn test_watch_ends_on_closed_input() {
    let temp = TempDir::new().unwrap();
    let feed = write_feed(temp.path(), FEED);

    // stdin is empty, so the filter reader sees end of input at once.
    let output = Command::new(sched_binary())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env("TZ", "UTC")
        .arg("--feed")
        .arg(&feed)
        .arg("watch")
        .stdin(std::process::Stdio::null())
        .output()
        .expect("failed to run sched");

    let text = stdout(&output);
    assert!(text.starts_with("Tracks: all, AI Summit, Fintech Summit, Night Summit\n"));
}

#[test]
fn test_watch_applies_filter_typed_before_end_of_input() {
    use std::io::Write;
    use std::process::Stdio;

    let temp = TempDir::new().unwrap();
    let feed = write_feed(temp.path(), FEED);

    let mut child = Command::new(sched_binary())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env("TZ", "UTC")
        .arg("--feed")
        .arg(&feed)
        .arg("watch")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run sched");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"AI Summit\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    let text = stdout(&output);
    assert!(
        text.contains("filter: AI Summit\n101 -> event-item event-highlighted\n"),
        "{text}"
    );
}
