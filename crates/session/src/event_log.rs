/// Record of what the session did with each input, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// 0-based sequence number of the input that produced this entry.
    pub seq: u64,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventLog {
    next_seq: u64,
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number the next recorded entry will carry.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn record(&mut self, kind: &'static str, message: impl Into<String>) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(LogEntry {
            seq,
            kind,
            message: message.into(),
        });
        seq
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn count(&self, kind: &str) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Take the buffered entries. Sequence numbers keep counting.
    pub fn drain(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::EventLog;

    #[test]
    fn records_entries_with_sequence() {
        let mut log = EventLog::new();
        assert_eq!(log.record("location", "41.9,12.5"), 0);
        assert_eq!(log.record("rejected", "stale"), 1);
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[1].seq, 1);
        assert_eq!(log.count("rejected"), 1);
    }

    #[test]
    fn drain_clears_entries_but_not_sequence() {
        let mut log = EventLog::new();
        log.record("tap", "x");
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.entries().is_empty());
        assert_eq!(log.next_seq(), 1);
    }
}
