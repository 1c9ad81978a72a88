//! Rate limiting for high-frequency browser events.
//!
//! The browser side owns the actual timers (`requestAnimationFrame`,
//! `setTimeout`); these types only decide whether a callback should run.

/// Allows at most one pending animation-frame handler.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// Returns `true` when the caller should schedule a frame.
    pub fn try_schedule(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn complete(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Trailing-edge debounce. Each restart invalidates the previous ticket and
/// hands back its timer handle so the caller can cancel it.
#[derive(Debug)]
pub struct Debouncer<H> {
    quiet_ms: u32,
    generation: u64,
    pending: Option<H>,
}

impl<H> Debouncer<H> {
    #[must_use]
    pub const fn new(quiet_ms: u32) -> Self {
        Self {
            quiet_ms,
            generation: 0,
            pending: None,
        }
    }

    #[must_use]
    pub const fn quiet_ms(&self) -> u32 {
        self.quiet_ms
    }

    pub fn restart(&mut self) -> (DebounceTicket, Option<H>) {
        self.generation = self.generation.wrapping_add(1);
        (DebounceTicket(self.generation), self.pending.take())
    }

    /// Remember the timer armed for `ticket`. Stale tickets are ignored and
    /// their handle is returned for cancellation.
    pub fn arm(&mut self, ticket: DebounceTicket, handle: H) -> Option<H> {
        if ticket.0 == self.generation {
            self.pending = Some(handle);
            None
        } else {
            Some(handle)
        }
    }

    /// Called when a timer fires; `true` only for the most recent ticket.
    pub fn settle(&mut self, ticket: DebounceTicket) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.pending = None;
        true
    }
}
