//! Trajectory export.

use std::io::{self, Write};

use serde::Serialize;

use crate::record::{TrialRecord, Trajectory};

/// Receives each complete trajectory of a run.
pub trait TrajectorySink {
    /// Accept one finished game.
    fn accept(&mut self, trajectory: &Trajectory) -> io::Result<()>;
}

/// Collects trajectories in memory.
#[derive(Clone, Debug, Default)]
pub struct VecSink {
    /// Trajectories received so far.
    pub trajectories: Vec<Trajectory>,
}

impl VecSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrajectorySink for VecSink {
    fn accept(&mut self, trajectory: &Trajectory) -> io::Result<()> {
        self.trajectories.push(trajectory.clone());
        Ok(())
    }
}

/// Writes one JSON object per trial record, one per line.
///
/// Each line carries the agent name and game number next to the record
/// fields.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
    lines: usize,
}

#[derive(Serialize)]
struct Line<'a> {
    agent: &'a str,
    game: usize,
    #[serde(flatten)]
    record: &'a TrialRecord,
}

impl<W: Write> JsonLinesSink<W> {
    /// A sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush and return the writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> TrajectorySink for JsonLinesSink<W> {
    fn accept(&mut self, trajectory: &Trajectory) -> io::Result<()> {
        for record in &trajectory.records {
            let line = Line {
                agent: &trajectory.agent,
                game: trajectory.game,
                record,
            };
            serde_json::to_writer(&mut self.writer, &line)?;
            self.writer.write_all(b"\n")?;
            self.lines += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thunt_core::{Action, NodeColor, Observation};

    fn trajectory() -> Trajectory {
        let record = TrialRecord {
            round: 1,
            trial: 1,
            state: 5,
            s1: 2,
            s2: 1,
            s3: vec![1],
            node_colors: vec![NodeColor::Black; 4],
            observation: Some(Observation::new(false, NodeColor::Grey)),
            valences: None,
            decision: Action::Drill,
            action: Action::Drill,
            next_state: 5,
            treasure_found: false,
        };
        Trajectory {
            agent: "random".into(),
            game: 1,
            records: vec![record.clone(), TrialRecord { trial: 2, ..record }],
        }
    }

    #[test]
    fn json_lines_one_object_per_record() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.accept(&trajectory()).unwrap();
        assert_eq!(sink.lines(), 2);
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(v["agent"], "random");
        assert_eq!(v["game"], 1);
        assert_eq!(v["trial"], 2);
        assert_eq!(v["action"], "drill");
        assert_eq!(v["observation"]["color"], "grey");
        assert_eq!(v["s3"], serde_json::json!([1]));
        assert!(v["valences"].is_null());
    }

    #[test]
    fn vec_sink_keeps_order() {
        let mut sink = VecSink::new();
        let mut t = trajectory();
        sink.accept(&t).unwrap();
        t.game = 2;
        sink.accept(&t).unwrap();
        let games: Vec<usize> = sink.trajectories.iter().map(|t| t.game).collect();
        assert_eq!(games, vec![1, 2]);
    }
}
