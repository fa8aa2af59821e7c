//! Complete stopwatch state and the registry that hands out ids.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::schema::{Running, StopwatchRecord, TechStuff};
use crate::settings::Settings;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStuffData {
    pub id: String,
    /// Milliseconds since the epoch when the current run started, or empty.
    pub start_date: String,
    /// Seconds accumulated by finished runs.
    pub passed: u64,
    pub running: Running,
}

/// A stopwatch with every field filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopwatchData {
    pub name: String,
    pub limit: u64,
    pub tech_stuff: TechStuffData,
}

impl StopwatchData {
    /// Fill the gaps of a parsed record from settings, allocating an id when none was given.
    pub fn complete(record: StopwatchRecord, settings: &Settings, registry: &Registry) -> Self {
        let tech = record.tech_stuff.unwrap_or_default();
        let id = tech.id.unwrap_or_else(|| registry.next_id());
        Self {
            name: record.name.unwrap_or_default(),
            limit: record.limit.unwrap_or(settings.default_limit),
            tech_stuff: TechStuffData {
                id,
                start_date: tech.start_date.unwrap_or_default(),
                passed: tech.passed.unwrap_or(0),
                running: tech.running.unwrap_or_default(),
            },
        }
    }

    /// The record to write back into the note.
    pub fn to_record(&self) -> StopwatchRecord {
        StopwatchRecord {
            name: Some(self.name.clone()),
            limit: Some(self.limit),
            tech_stuff: Some(TechStuff {
                id: Some(self.tech_stuff.id.clone()),
                start_date: Some(self.tech_stuff.start_date.clone()),
                passed: Some(self.tech_stuff.passed),
                running: Some(self.tech_stuff.running),
            }),
        }
    }

    pub fn is_running(&self) -> bool {
        self.tech_stuff.running.is_running()
    }

    /// Seconds on the clock at `now_ms`, including the run in progress.
    pub fn elapsed(&self, now_ms: u64) -> u64 {
        self.tech_stuff.passed + self.current_run(now_ms)
    }

    /// Start a stopped stopwatch or stop a running one.
    pub fn toggle(&mut self, now_ms: u64) {
        if self.is_running() {
            let run = self.current_run_secs(now_ms);
            self.tech_stuff.passed += run;
            self.tech_stuff.start_date.clear();
        } else {
            self.tech_stuff.start_date = now_ms.to_string();
        }
        self.tech_stuff.running = self.tech_stuff.running.flipped();
        debug!(
            id = %self.tech_stuff.id,
            running = self.is_running(),
            passed = self.tech_stuff.passed,
            "toggled stopwatch"
        );
    }

    fn current_run(&self, now_ms: u64) -> u64 {
        if self.is_running() {
            self.current_run_secs(now_ms)
        } else {
            0
        }
    }

    fn current_run_secs(&self, now_ms: u64) -> u64 {
        match self.tech_stuff.start_date.trim().parse::<u64>() {
            Ok(start) => now_ms.saturating_sub(start) / 1000,
            Err(_) => {
                warn!(
                    id = %self.tech_stuff.id,
                    start_date = %self.tech_stuff.start_date,
                    "running stopwatch has no usable start date"
                );
                0
            }
        }
    }
}

/// Stopwatches known to the current note, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tags: BTreeMap<String, StopwatchData>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One more than the largest numeric id in use, `"1"` for an empty registry.
    ///
    /// Ids that are not numbers are ignored.
    pub fn next_id(&self) -> String {
        let max = self
            .tags
            .keys()
            .filter_map(|id| id.parse::<u64>().ok())
            .max();
        match max {
            Some(max) => (max + 1).to_string(),
            None => "1".to_string(),
        }
    }

    /// Complete `record` and keep it under its id, replacing any earlier entry.
    pub fn register(&mut self, record: StopwatchRecord, settings: &Settings) -> &StopwatchData {
        let data = StopwatchData::complete(record, settings, self);
        let id = data.tech_stuff.id.clone();
        debug!(%id, "registered stopwatch");
        self.tags.insert(id.clone(), data);
        &self.tags[&id]
    }

    pub fn get(&self, id: &str) -> Option<&StopwatchData> {
        self.tags.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut StopwatchData> {
        self.tags.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
