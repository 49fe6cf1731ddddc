//! Bookkeeping for in-flight suggestion requests.
//!
//! Requests are never aborted. Instead each one is tagged with an ID, and a result is
//! only applied if its ID is the one the form is still waiting for.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnrichmentTracker {
    request_counter: u64,
    pending: Option<u64>,
}
impl EnrichmentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding any outstanding one.
    pub fn begin(&mut self) -> u64 {
        self.request_counter += 1;
        self.pending = Some(self.request_counter);
        self.request_counter
    }

    /// Forgets the outstanding request; its result will be discarded.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether the result for `request_id` should be applied. Accepting clears the pending request.
    pub fn accept(&mut self, request_id: u64) -> bool {
        if self.pending != Some(request_id) {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
