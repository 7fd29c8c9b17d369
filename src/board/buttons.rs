//! Button handling for the MiCOKit-3165
//!
//! The EasyLink button is serviced by [`ButtonMonitor`], an edge-interrupt-driven
//! state machine that discriminates short clicks from long presses with a
//! one-shot debounce timer. The standby switch is a stateless single-edge
//! pass-through ([`StandbyButton`]).
//!
//! Neither type registers interrupts itself: platform glue hooks the button pin
//! (both edges for EasyLink, falling edge for standby) and the timer expiry to
//! the handler methods here, sampling the monotonic clock at handler entry.

use crate::platform::traits::{GpioInterface, OneShotTimer};
use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Default long-press timeout, matching the restore-defaults hold time (ms)
pub const RESTORE_DEFAULT_TIMEOUT_MS: u32 = 3000;

/// Default lower bound of the click window (ms); intervals at or below this
/// are treated as contact bounce
pub const CLICK_MIN_MS: u32 = 50;

/// Button event produced by a handler invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Press released inside the click window
    Click,
    /// Press held past the long-press timeout
    LongPress,
}

/// EasyLink button configuration
///
/// Callbacks default to `None` (no-op); the window bounds default to the
/// board's restore-defaults timing.
#[derive(Debug, Clone, Copy)]
pub struct ButtonConfig {
    /// Invoked on a short click
    pub on_click: Option<fn()>,
    /// Invoked on a long press
    pub on_long_press: Option<fn()>,
    /// Exclusive lower bound of the click window (bounce filter)
    pub click_min_ms: u32,
    /// Exclusive upper bound of the click window; the one-shot timer is armed
    /// with this timeout
    pub long_press_timeout_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            on_click: None,
            on_long_press: None,
            click_min_ms: CLICK_MIN_MS,
            long_press_timeout_ms: RESTORE_DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Debounce / long-press state machine for one momentary, active-low button
///
/// Driven entirely by two entry points, both called outside this crate:
/// [`on_edge`](ButtonMonitor::on_edge) from the pin's edge interrupt (either
/// edge) and [`on_timeout`](ButtonMonitor::on_timeout) from the one-shot
/// timer's expiry.
///
/// Press vs release is decided by reading the pin level at handler entry, not
/// by which edge fired. This tolerates missed or coalesced edges; a
/// double-transition faster than interrupt latency can still misclassify, which
/// is accepted.
///
/// The handlers mutate shared state and are not reentrant. On targets with a
/// single-level GPIO IRQ that holds by construction; where interrupts can nest,
/// wrap the monitor in [`IrqButtonMonitor`].
pub struct ButtonMonitor<P: GpioInterface, T: OneShotTimer> {
    pin: P,
    timer: T,
    config: ButtonConfig,
    /// Press timestamp + 1 tick; 0 means no press in progress. The offset
    /// keeps a press at tick 0 from colliding with the sentinel.
    press_start: u32,
}

impl<P: GpioInterface, T: OneShotTimer> ButtonMonitor<P, T> {
    /// Create a monitor over an initialized input pin and a one-shot timer
    /// configured with `config.long_press_timeout_ms`
    pub fn new(pin: P, timer: T, config: ButtonConfig) -> Self {
        Self {
            pin,
            timer,
            config,
            press_start: 0,
        }
    }

    /// Edge-interrupt handler
    ///
    /// `now_ms` is the monotonic clock sampled at handler entry. Returns the
    /// event emitted by this invocation, if any, after running its callback.
    pub fn on_edge(&mut self, now_ms: u32) -> Option<ButtonEvent> {
        if !self.pin.read() {
            // Button is down: open the press window and arm the long-press timer
            self.press_start = now_ms.wrapping_add(1);
            if self.timer.start().is_err() {
                crate::log_warn!("button timer failed to arm; long press will not fire");
            }
            None
        } else {
            // Button is up: classify the interval since the press
            let interval = now_ms.wrapping_add(1).wrapping_sub(self.press_start);
            let clicked = self.press_start != 0
                && interval > self.config.click_min_ms
                && interval < self.config.long_press_timeout_ms;
            if clicked {
                if let Some(cb) = self.config.on_click {
                    cb();
                }
            }
            // Bounce and out-of-window intervals still tear the press down
            let _ = self.timer.stop();
            self.press_start = 0;
            clicked.then_some(ButtonEvent::Click)
        }
    }

    /// Timer-expiry handler: the press outlived the click window
    pub fn on_timeout(&mut self) -> ButtonEvent {
        self.press_start = 0;
        if let Some(cb) = self.config.on_long_press {
            cb();
        }
        ButtonEvent::LongPress
    }

    /// Whether a press is currently being timed
    pub fn press_in_progress(&self) -> bool {
        self.press_start != 0
    }

    /// Access the button pin (tests drive the simulated level through this)
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Access the debounce timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Mutable access to the debounce timer
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

/// Standby/wakeup switch: stateless falling-edge pass-through
#[derive(Debug, Default)]
pub struct StandbyButton {
    /// Invoked on every falling edge
    pub on_press: Option<fn()>,
}

impl StandbyButton {
    /// Create a standby button with an optional callback
    pub fn new(on_press: Option<fn()>) -> Self {
        Self { on_press }
    }

    /// Falling-edge interrupt handler; no debounce, no state
    pub fn on_falling_edge(&self) {
        if let Some(cb) = self.on_press {
            cb();
        }
    }
}

/// Interrupt-safe wrapper for a [`ButtonMonitor`]
///
/// On targets where the edge interrupt and the timer expiry can preempt each
/// other, all access to the monitor must go through one critical section. The
/// wrapper is `Sync` and can live in a `static` for IRQ registration.
pub struct IrqButtonMonitor<P: GpioInterface, T: OneShotTimer> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<ButtonMonitor<P, T>>>,
}

impl<P: GpioInterface, T: OneShotTimer> IrqButtonMonitor<P, T> {
    /// Wrap a monitor
    pub const fn new(monitor: ButtonMonitor<P, T>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(monitor)),
        }
    }

    /// Run `f` on the monitor inside a critical section
    pub fn with<R>(&self, f: impl FnOnce(&mut ButtonMonitor<P, T>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}
