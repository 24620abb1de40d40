//! In-flight request bookkeeping for AI-backed features.
//!
//! Each feature owns one tracker. While a request is outstanding the feature
//! is busy and refuses another submission. Invalidating the tracker (the user
//! navigated away) bumps the generation, so the reply of the abandoned request
//! no longer matches and is dropped.

/// Proof that a request was started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a ticket must be handed back to `finish`"]
pub struct RequestTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestTracker {
    generation: u64,
    in_flight: bool,
}

impl RequestTracker {
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Start a request. `None` while another one is outstanding.
    pub fn begin(&mut self) -> Option<RequestTicket> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(RequestTicket {
            generation: self.generation,
        })
    }

    /// Hand back a finished request. Returns true when its reply should be
    /// applied; a stale ticket leaves the tracker untouched.
    pub fn finish(&mut self, ticket: RequestTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.in_flight = false;
        self.generation += 1;
        true
    }

    /// Abandon whatever is outstanding.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }
}
