//! End-to-end transcript replay.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    io::Write,
    sync::{Arc, Mutex},
};

use wordround_core::{RoundSnapshot, TileFace};
use wordround_replay::{ReplayConfig, Transcript, replay};

/// Report sink the test can read back after the replay consumed it.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap().lines().map(str::to_owned).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn config() -> ReplayConfig {
    ReplayConfig {
        player: 1,
        seed: Some(99),
        snapshot: Some(RoundSnapshot {
            player_number: 1,
            player_to_move: 1,
            rack: Some(vec![TileFace::new("H", 4), TileFace::new("I", 1)]),
            ..RoundSnapshot::default()
        }),
    }
}

fn events(lines: &[String], kind: &str) -> Vec<serde_json::Value> {
    lines
        .iter()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .filter(|record| record["event"] == kind)
        .collect()
}

#[tokio::test]
async fn replay_reports_sent_commands_in_order() {
    let transcript = Transcript::parse(
        r#"{"drop":{"slot":0,"x":7,"y":7}}
{"drop":{"slot":1,"x":8,"y":7}}
{"intent":{"type":"makeBoardMove"}}
{"server":{"command":"boardMoveSuccess","payload":{"rack":[{"letter":"E","value":1}]}}}
{"server":{"command":"playerBoardMove","payload":{"nowPlaying":2,"placed":[]}}}"#,
    )
    .unwrap();
    let buffer = SharedBuffer::default();

    let summary = replay(config(), transcript, Box::new(buffer.clone())).await.unwrap();

    let lines = buffer.lines();
    let sent = events(&lines, "sent");
    assert_eq!(summary.sent, 3);
    assert_eq!(sent.len(), 3);
    insta::assert_snapshot!(
        sent[2].to_string(),
        @r#"{"command":{"command":"boardMove","payload":[{"pos":{"x":8,"y":8},"tile":{"letter":"H","value":4}},{"pos":{"x":9,"y":8},"tile":{"letter":"I","value":1}}]},"event":"sent"}"#
    );
    assert_eq!(summary.stats.applied, 2);
    assert_eq!(summary.model.player_to_move, 2);
    assert_eq!(summary.model.rack.tile_count(), 1);
    assert_eq!(events(&lines, "final").len(), 1);
}

#[tokio::test]
async fn replay_skips_impossible_drags() {
    let transcript = Transcript::parse(
        r#"{"server":{"command":"playerPassMove","payload":{"nowPlaying":2}}}
{"drop":{"slot":0,"x":7,"y":7}}
{"drop":{"slot":6,"x":1,"y":1}}
{"cancel":{"x":3,"y":3}}"#,
    )
    .unwrap();
    let buffer = SharedBuffer::default();

    let summary = replay(config(), transcript, Box::new(buffer.clone())).await.unwrap();

    let skipped = events(&buffer.lines(), "skipped");
    let reasons: Vec<_> = skipped.iter().map(|r| r["reason"].as_str().unwrap().to_owned()).collect();
    assert_eq!(
        reasons,
        vec!["board refused placement", "no tile in rack slot", "no candidate on square"]
    );
    assert_eq!(summary.sent, 0);
}

#[tokio::test]
async fn replay_counts_unknown_and_malformed_messages() {
    let transcript = Transcript::parse(
        r#"{"server":{"command":"roundOver","payload":{"winner":1}}}
{"server":"definitely not json"}"#,
    )
    .unwrap();
    let buffer = SharedBuffer::default();

    let summary = replay(config(), transcript, Box::new(buffer.clone())).await.unwrap();

    assert_eq!((summary.stats.ignored, summary.stats.malformed), (1, 1));
    assert_eq!(summary.renders, 1);
}
