//! Stale-response suppression.
//!
//! There is no request abort: a superseded call still runs to completion and
//! its result is dropped when it resolves. Every workflow issues a ticket per
//! request and checks it at resolution time; only the latest ticket applies.

/// Token identifying one issued request within a `RequestSequence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Monotonic request counter for one logical request stream.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket that supersedes every previously issued one.
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    /// Supersedes all outstanding tickets without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// What happened when a response was applied to its workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response was current and succeeded.
    Applied,
    /// The response was current and carried an error; the message is stored.
    Failed,
    /// A newer request superseded this one; nothing changed.
    Stale,
}
