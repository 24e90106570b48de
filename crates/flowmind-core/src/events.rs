use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of user action recorded in the execution history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TaskStart,
    TaskComplete,
    TaskSkip,
    WorkflowCreated,
    TasksOrganized,
}

impl EventKind {
    /// Workflow creation and task organization both count as organizing.
    pub fn is_organize(self) -> bool {
        matches!(self, EventKind::WorkflowCreated | EventKind::TasksOrganized)
    }

    /// Events that mark work on a task (start or complete).
    pub fn is_execution(self) -> bool {
        matches!(self, EventKind::TaskStart | EventKind::TaskComplete)
    }
}

/// Snapshot of the task an event refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// An entry in the append-only execution history.
///
/// History order is chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskRef>,
}

impl Event {
    pub fn new(kind: EventKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            timestamp,
            task: None,
        }
    }

    /// Builder: attach the referenced task.
    pub fn with_task(mut self, task: TaskRef) -> Self {
        self.task = Some(task);
        self
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task.as_ref().map(|t| t.id.as_str())
    }

    /// Non-empty context of the referenced task.
    pub fn task_context(&self) -> Option<&str> {
        self.task
            .as_ref()
            .and_then(|t| t.context.as_deref())
            .filter(|c| !c.is_empty())
    }
}

/// The last `n` events (or fewer when the history is shorter).
pub fn recent(history: &[Event], n: usize) -> &[Event] {
    &history[history.len().saturating_sub(n)..]
}

/// Number of events of the given kind.
pub fn count_kind(events: &[Event], kind: EventKind) -> usize {
    events.iter().filter(|e| e.kind == kind).count()
}

/// Per-kind counts over a window of events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowCounts {
    pub len: usize,
    pub starts: usize,
    pub completes: usize,
    pub skips: usize,
}

impl WindowCounts {
    pub fn of(events: &[Event]) -> Self {
        Self {
            len: events.len(),
            starts: count_kind(events, EventKind::TaskStart),
            completes: count_kind(events, EventKind::TaskComplete),
            skips: count_kind(events, EventKind::TaskSkip),
        }
    }

    /// Window length floored at 1 for use as a divisor.
    pub fn divisor(&self) -> f64 {
        self.len.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, min, 0).unwrap()
    }

    #[test]
    fn recent_returns_suffix() {
        let history: Vec<Event> = (0..12)
            .map(|i| Event::new(EventKind::TaskStart, at(i)))
            .collect();
        let window = recent(&history, 10);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].timestamp, at(2));
        assert_eq!(recent(&history[..3], 10).len(), 3);
        assert!(recent(&[], 10).is_empty());
    }

    #[test]
    fn window_counts_by_kind() {
        let history = vec![
            Event::new(EventKind::TaskStart, at(0)),
            Event::new(EventKind::TaskComplete, at(1)),
            Event::new(EventKind::TaskSkip, at(2)),
            Event::new(EventKind::TaskSkip, at(3)),
            Event::new(EventKind::WorkflowCreated, at(4)),
        ];
        let counts = WindowCounts::of(&history);
        assert_eq!(counts.len, 5);
        assert_eq!(counts.starts, 1);
        assert_eq!(counts.completes, 1);
        assert_eq!(counts.skips, 2);
        assert_eq!(WindowCounts::of(&[]).divisor(), 1.0);
    }

    #[test]
    fn event_json_uses_type_tag() {
        let json = r#"{"type":"task_complete","timestamp":"2024-01-15T09:30:00Z","task":{"id":"t1","context":"work"}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, EventKind::TaskComplete);
        assert_eq!(event.task_id(), Some("t1"));
        assert_eq!(event.task_context(), Some("work"));
        assert!(serde_json::to_string(&event).unwrap().contains("\"type\":\"task_complete\""));
    }
}
