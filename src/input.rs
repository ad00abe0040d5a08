//! Button edges to sticky press flags.
//!
//! The edge handlers call [`InputEvents::on_falling_edge`] with the current
//! uptime; the main loop drains each flag once per tick with
//! [`InputEvents::take`]. A press that lands after the main loop has drained
//! its flag is picked up on the next tick.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// The two physical buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum ButtonId {
    /// Push switch built into the joystick.
    Joystick,
    /// Stand-alone button A.
    A,
}

impl ButtonId {
    const fn index(self) -> usize {
        match self {
            ButtonId::Joystick => 0,
            ButtonId::A => 1,
        }
    }
}

/// Which edges share a debounce window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum DebounceScope {
    /// One window for both buttons: an accepted press on either button
    /// suppresses the other one too.
    Shared,
    /// Each button has its own window.
    PerButton,
}

/// A press flag raised from interrupt context and cleared by its consumer.
pub struct ButtonFlag {
    pressed: AtomicBool,
}

impl ButtonFlag {
    pub const fn new() -> Self {
        Self {
            pressed: AtomicBool::new(false),
        }
    }

    /// Mark a press. Raising an already raised flag changes nothing.
    pub fn raise(&self) {
        self.pressed.store(true, Ordering::Release);
    }

    /// Read and clear in one step.
    pub fn take(&self) -> bool {
        self.pressed.swap(false, Ordering::AcqRel)
    }

    pub fn is_raised(&self) -> bool {
        self.pressed.load(Ordering::Acquire)
    }
}

impl Default for ButtonFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Time-window rate limiter for button edges.
///
/// An edge is accepted only when more than `window_us` has elapsed since the
/// last accepted edge in the same slot. Slots start at zero, so edges in the
/// first window after boot are dropped.
pub struct Debouncer {
    window_us: u64,
    scope: DebounceScope,
    // Cortex-M3 has no 64-bit atomics, so the timestamps sit behind a
    // critical section. That also masks the EXTI lines for the duration of
    // the check.
    last_accept_us: Mutex<CriticalSectionRawMutex, Cell<[u64; 2]>>,
}

impl Debouncer {
    pub const fn new(window_us: u64, scope: DebounceScope) -> Self {
        Self {
            window_us,
            scope,
            last_accept_us: Mutex::new(Cell::new([0; 2])),
        }
    }

    /// Returns true and records `now_us` when the edge falls outside the window.
    pub fn accept(&self, button: ButtonId, now_us: u64) -> bool {
        let slot = match self.scope {
            DebounceScope::Shared => 0,
            DebounceScope::PerButton => button.index(),
        };

        self.last_accept_us.lock(|last| {
            let mut stamps = last.get();
            if now_us.saturating_sub(stamps[slot]) > self.window_us {
                stamps[slot] = now_us;
                last.set(stamps);
                true
            } else {
                false
            }
        })
    }
}

/// Everything the edge handlers share with the main loop.
pub struct InputEvents {
    joystick: ButtonFlag,
    button_a: ButtonFlag,
    debouncer: Debouncer,
}

impl InputEvents {
    pub const fn new(window_us: u64, scope: DebounceScope) -> Self {
        Self {
            joystick: ButtonFlag::new(),
            button_a: ButtonFlag::new(),
            debouncer: Debouncer::new(window_us, scope),
        }
    }

    fn flag(&self, button: ButtonId) -> &ButtonFlag {
        match button {
            ButtonId::Joystick => &self.joystick,
            ButtonId::A => &self.button_a,
        }
    }

    /// Falling edge on `button` at uptime `now_us`.
    ///
    /// Returns whether the edge was accepted. Dropped edges leave no trace.
    pub fn on_falling_edge(&self, button: ButtonId, now_us: u64) -> bool {
        if self.debouncer.accept(button, now_us) {
            self.flag(button).raise();
            true
        } else {
            false
        }
    }

    /// Consume a pending press of `button`.
    pub fn take(&self, button: ButtonId) -> bool {
        self.flag(button).take()
    }

    pub fn is_pending(&self, button: ButtonId) -> bool {
        self.flag(button).is_raised()
    }
}
