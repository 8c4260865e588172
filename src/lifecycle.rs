//! Lifecycle phases of a component instance.
//!
//! ```text
//! Unattached ──connect──▶ Attaching ──(init done)──▶ Attached ◀──connect── Detached
//!                                                        │                     ▲
//!                                                        └─────disconnect──────┘
//! ```
//!
//! Only the first `connect` passes through `Attaching`; every later one goes
//! straight to `Attached` without side effects.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Unattached,
    /// First-attach initialization is running (may be suspended on render).
    Attaching,
    Attached,
    Detached,
}

/// Attachment bookkeeping for one instance.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    connected: bool,
    initial_connected: bool,
    phase: Phase,
}

/// What `connect` has to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    /// First attach: run full initialization.
    Initialize,
    /// Already initialized once: nothing beyond the flag.
    Resume,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn initial_connected(&self) -> bool {
        self.initial_connected
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Record an attach. `initial_connected` is set for good on the first call.
    pub fn begin_attach(&mut self) -> Attach {
        self.connected = true;
        if self.initial_connected {
            self.phase = Phase::Attached;
            return Attach::Resume;
        }
        self.initial_connected = true;
        self.phase = Phase::Attaching;
        Attach::Initialize
    }

    /// Initialization finished, successfully or not.
    ///
    /// A detach recorded while initialization was suspended wins. `Component`
    /// never produces that order itself; it serves hosts that drive a
    /// `Lifecycle` directly.
    pub fn finish_attach(&mut self) {
        if self.phase == Phase::Attaching {
            self.phase = if self.connected {
                Phase::Attached
            } else {
                Phase::Detached
            };
        }
    }

    pub fn detach(&mut self) {
        self.connected = false;
        if self.phase != Phase::Unattached {
            self.phase = Phase::Detached;
        }
    }
}
