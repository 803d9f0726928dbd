use bevy_ecs::resource::Resource;
use serde::Serialize;

/// What a log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogKind {
    StageAppeared,
    StageFinished,
    EventFinished,
    EventGenerationFailed,
    AreaSurveyed,
    SurveyCursorReset,
    Migration,
    FactorDestroyed,
    HireFailed,
    SpecialistHired,
}

/// One notification in the simulation log.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: u64,
    pub day: u64,
    pub kind: LogKind,
    pub message: String,
    /// Structured payload for consumers that want more than the message.
    pub data: serde_json::Value,
}

/// Append-only notification log. Entries are ordered by insertion, which on
/// a single-threaded tick means deterministic order.
#[derive(Resource, Debug, Clone, Default)]
pub struct SimLog {
    entries: Vec<LogEntry>,
}

impl SimLog {
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn of_kind(&self, kind: LogKind) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
