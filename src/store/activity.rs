use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Human-readable record of stock additions, one line per `add`.
#[derive(Debug, Default, Clone)]
pub struct ActivityLog {
    lines: Vec<String>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_added(&mut self, item: &str, quantity: i64) {
        self.record_added_at(Local::now(), item, quantity);
    }

    pub fn record_added_at(&mut self, at: DateTime<Local>, item: &str, quantity: i64) {
        self.lines.push(format!(
            "{}: Added {} of {}",
            at.format(TIMESTAMP_FORMAT),
            quantity,
            item
        ));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
