//! Interrupt-to-main-loop signalling.
//!
//! The timer ISR and the two button ISRs are the only asynchronous entry
//! points in the system. Each one does exactly one lock-free atomic store
//! and returns; the main loop consumes the signals from task context.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ Timer ISR   │────▶│ TickSignal       │────▶│              │
//! │ Button ISRs │────▶│ EdgeEventLatch   │────▶│  Main Loop   │
//! └─────────────┘     │ (lock-free)      │     │  (consumer)  │
//!                     └──────────────────┘     └──────────────┘
//! ```
//!
//! Producer/consumer discipline: ISRs only ever store `true`; flags are
//! cleared exclusively by the consumer's `take()`/`drain()` swap. A set
//! flag therefore stays set until its owning task drains it.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

// ───────────────────────────────────────────────────────────────
// Tick signal
// ───────────────────────────────────────────────────────────────

/// One-shot "tick occurred" flag with a lost-tick counter.
///
/// The timer ISR calls [`notify`](Self::notify); the control loop consumes
/// the flag with [`take`](Self::take). If a tick fires while the previous
/// one is still latched, a whole base period has been lost: the new tick is
/// coalesced and the overrun counter increments. Overruns are surfaced by
/// the main loop (log + event), never silently dropped.
pub struct TickSignal {
    pending: AtomicBool,
    overruns: AtomicU32,
}

impl TickSignal {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            overruns: AtomicU32::new(0),
        }
    }

    /// Signal a tick. Safe to call from interrupt context.
    pub fn notify(&self) {
        if self.pending.swap(true, Ordering::AcqRel) {
            self.overruns.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Consume the pending tick, if any. Called only from the control loop.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Total ticks lost since startup.
    pub fn overruns(&self) -> u32 {
        self.overruns.load(Ordering::Relaxed)
    }
}

impl Default for TickSignal {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Edge event latch
// ───────────────────────────────────────────────────────────────

/// Result of draining the latch: which edges were pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEvents {
    pub increment: bool,
    pub decrement: bool,
}

/// Sticky press-edge flags for the two set-point buttons.
///
/// Button ISRs call [`note_increment`](Self::note_increment) /
/// [`note_decrement`](Self::note_decrement); only the button task's
/// [`drain`](Self::drain) ever clears a flag. Edges arriving between drains
/// coalesce into one pending unit per button.
pub struct EdgeEventLatch {
    increment: AtomicBool,
    decrement: AtomicBool,
}

impl EdgeEventLatch {
    pub const fn new() -> Self {
        Self {
            increment: AtomicBool::new(false),
            decrement: AtomicBool::new(false),
        }
    }

    /// Latch a raise-set-point edge. Safe to call from interrupt context.
    pub fn note_increment(&self) {
        self.increment.store(true, Ordering::Release);
    }

    /// Latch a lower-set-point edge. Safe to call from interrupt context.
    pub fn note_decrement(&self) {
        self.decrement.store(true, Ordering::Release);
    }

    /// Atomically fetch-and-clear both flags. Called only from the button
    /// task; an edge arriving mid-drain lands in the next drain.
    pub fn drain(&self) -> EdgeEvents {
        EdgeEvents {
            increment: self.increment.swap(false, Ordering::AcqRel),
            decrement: self.decrement.swap(false, Ordering::AcqRel),
        }
    }
}

impl Default for EdgeEventLatch {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Process-wide instances + ISR entry points
// ───────────────────────────────────────────────────────────────
//
// The statics exist so plain-`fn` callbacks can be handed to the
// `PeriodicTimer`/`EdgeButton` capabilities; everything is testable through
// the instance methods above.

/// The base-tick signal consumed by the control loop.
pub static TICK: TickSignal = TickSignal::new();

/// The set-point button latch drained by the button task.
pub static BUTTONS: EdgeEventLatch = EdgeEventLatch::new();

/// Timer callback: register with [`PeriodicTimer::start`](crate::app::ports::PeriodicTimer::start).
pub fn tick_isr() {
    TICK.notify();
}

/// Raise-button callback: register with [`EdgeButton::on_press`](crate::app::ports::EdgeButton::on_press).
pub fn set_point_up_isr() {
    BUTTONS.note_increment();
}

/// Lower-button callback: register with [`EdgeButton::on_press`](crate::app::ports::EdgeButton::on_press).
pub fn set_point_down_isr() {
    BUTTONS.note_decrement();
}
