/// Identifies one run of a user-triggered sequence (autofill or submit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FlowId(u64);

/// Hands out increasing flow ids and remembers which one is current.
///
/// A result is only applied when it carries the current id; anything older
/// was superseded while it was in flight.
#[derive(Debug, Default)]
pub struct FlowTracker {
    issued: u64,
    in_flight: bool,
}

impl FlowTracker {
    pub fn begin(&mut self) -> FlowId {
        self.issued += 1;
        self.in_flight = true;
        FlowId(self.issued)
    }

    pub fn is_current(&self, id: FlowId) -> bool {
        self.in_flight && id.0 == self.issued
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Marks `id` as resolved. Returns false, and changes nothing, if it was
    /// superseded or already finished.
    pub fn finish(&mut self, id: FlowId) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Drops whatever is in flight. Late results will not be current.
    pub fn abandon(&mut self) {
        self.issued += 1;
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_flow_supersedes_older() {
        let mut tracker = FlowTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(first < second);
        assert!(!tracker.finish(first));
        assert!(tracker.in_flight());
        assert!(tracker.finish(second));
        assert!(!tracker.in_flight());
    }

    #[test]
    fn finish_is_one_shot() {
        let mut tracker = FlowTracker::default();
        let id = tracker.begin();
        assert!(tracker.finish(id));
        assert!(!tracker.finish(id));
    }

    #[test]
    fn abandon_discards_in_flight() {
        let mut tracker = FlowTracker::default();
        let id = tracker.begin();
        tracker.abandon();
        assert!(!tracker.in_flight());
        assert!(!tracker.finish(id));
    }
}
