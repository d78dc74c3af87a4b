//! Fixed-timestep frame clock and simulation-driven countdowns.
//!
//! The [`FixedTimestep`] decouples the simulation rate from however often the
//! host calls [`frame`](FixedTimestep::frame): real elapsed time goes into an
//! accumulator, whole steps of constant size are drained into the driver's
//! `update`, and `render` runs once per frame with an interpolation fraction.
//! The accumulator is capped so a long stall (backgrounded tab, debugger
//! pause) cannot trigger an unbounded catch-up burst.
//!
//! All in-game waiting is expressed as a [`Countdown`] advanced by the same
//! fixed steps -- there are no wall-clock timers anywhere in the simulation,
//! which is what keeps runs reproducible under test.

// ---------------------------------------------------------------------------
// TickDriver
// ---------------------------------------------------------------------------

/// What the clock drives each frame.
pub trait TickDriver {
    /// One fixed simulation step of `dt` seconds.
    fn update(&mut self, dt: f64);

    /// One render pass; `alpha` in `[0, 1)` is the fraction of a step left in
    /// the accumulator, for interpolating between the last two sim states.
    fn render(&mut self, alpha: f64);
}

// ---------------------------------------------------------------------------
// FixedTimestep
// ---------------------------------------------------------------------------

/// Accumulator-based fixed-timestep scheduler.
#[derive(Debug)]
pub struct FixedTimestep {
    step: f64,
    max_accumulator: f64,
    accumulator: f64,
    running: bool,
}

impl FixedTimestep {
    /// Create a clock with the given step size and accumulator cap, both in
    /// seconds.
    ///
    /// # Panics
    ///
    /// Panics if `step` is not positive and finite, or the cap is smaller
    /// than one step.
    pub fn new(step: f64, max_accumulator: f64) -> Self {
        assert!(
            step > 0.0 && step.is_finite(),
            "step must be positive and finite, got {step}"
        );
        assert!(
            max_accumulator >= step,
            "accumulator cap {max_accumulator} must hold at least one step {step}"
        );
        Self {
            step,
            max_accumulator,
            accumulator: 0.0,
            running: true,
        }
    }

    /// Advance the clock by `elapsed` real seconds, draining whole simulation
    /// steps into `driver.update` and finishing with one `driver.render`.
    ///
    /// Returns the number of steps executed. After [`stop`](Self::stop) this
    /// does nothing and returns 0.
    pub fn frame(&mut self, elapsed: f64, driver: &mut impl TickDriver) -> u32 {
        if !self.running {
            return 0;
        }

        self.accumulator += elapsed.max(0.0);
        if self.accumulator > self.max_accumulator {
            tracing::debug!(
                elapsed,
                cap = self.max_accumulator,
                "accumulator capped after stall"
            );
            self.accumulator = self.max_accumulator;
        }

        let mut steps = 0u32;
        while self.accumulator >= self.step {
            driver.update(self.step);
            self.accumulator -= self.step;
            steps += 1;
        }

        driver.render(self.accumulator / self.step);
        steps
    }

    /// Halt the clock; subsequent [`frame`](Self::frame) calls are no-ops.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the clock is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The fixed step size in seconds.
    pub fn step(&self) -> f64 {
        self.step
    }
}

// ---------------------------------------------------------------------------
// Countdown
// ---------------------------------------------------------------------------

/// A one-shot timer advanced by simulation steps.
///
/// An idle countdown (remaining 0) never fires; call
/// [`reset`](Countdown::reset) to arm it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Countdown {
    remaining: f64,
}

impl Countdown {
    /// An armed countdown with `secs` remaining.
    pub fn armed(secs: f64) -> Self {
        Self {
            remaining: secs.max(0.0),
        }
    }

    /// An idle countdown.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the countdown.
    pub fn reset(&mut self, secs: f64) {
        self.remaining = secs.max(0.0);
    }

    /// Advance by `dt` seconds. Returns `true` exactly on the tick the timer
    /// crosses zero.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }

    /// Whether the timer is currently armed.
    pub fn is_armed(&self) -> bool {
        self.remaining > 0.0
    }

    /// Seconds left, 0 when idle.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
