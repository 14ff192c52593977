//! Looping approach/hold/disconnect animation for the connector pair.
//!
//! Every frame recomputes phase and depth from `now - start_time`, never from
//! accumulated deltas, so a stalled tab resumes at the right phase. Delayed
//! restarts are stored as due timestamps instead of timer callbacks; a cycle
//! starts at the first tick on or after its due time, from that tick's clock.

use crate::constants::{
    SNAP_APPROACH_END, SNAP_DURATION_SEC, SNAP_HOLD_END, SNAP_INITIAL_DELAY_SEC,
    SNAP_LOOP_DELAY_SEC, SNAP_MATED_DEPTH, SNAP_START_DEPTH,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapPhase {
    Idle,
    Approaching,
    Holding,
    Disconnecting,
}

/// Cubic ease-in-out: `4p³` below 0.5, `1 - (-2p+2)³/2` above.
#[inline]
pub fn ease_in_out_cubic(p: f32) -> f32 {
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
    }
}

/// Phase for a progress value in \[0, 1\]. Progress 1.0 is still
/// `Disconnecting`; completion is signalled separately.
pub fn phase_at(progress: f32) -> SnapPhase {
    if progress < SNAP_APPROACH_END {
        SnapPhase::Approaching
    } else if progress < SNAP_HOLD_END {
        SnapPhase::Holding
    } else {
        SnapPhase::Disconnecting
    }
}

/// Depth of the moving half for a progress value in \[0, 1\].
pub fn depth_at(progress: f32) -> f32 {
    let travel = SNAP_START_DEPTH - SNAP_MATED_DEPTH;
    match phase_at(progress) {
        SnapPhase::Approaching => {
            SNAP_START_DEPTH - travel * ease_in_out_cubic(progress / SNAP_APPROACH_END)
        }
        SnapPhase::Holding => SNAP_MATED_DEPTH,
        _ => {
            let local = (progress - SNAP_HOLD_END) / (1.0 - SNAP_HOLD_END);
            SNAP_MATED_DEPTH + travel * ease_in_out_cubic(local)
        }
    }
}

/// Clamped progress for `elapsed` seconds into a cycle of `duration`.
#[inline]
pub fn progress_at(elapsed: f64, duration: f64) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0) as f32
}

/// Phase and depth for `elapsed` seconds into a cycle.
pub fn phase_and_depth(elapsed: f64, duration: f64) -> (SnapPhase, f32) {
    let p = progress_at(elapsed, duration);
    (phase_at(p), depth_at(p))
}

/// Monotonic seconds source.
pub trait Clock {
    fn now_sec(&self) -> f64;
}

/// Wall clock anchored at construction.
pub struct InstantClock {
    origin: instant::Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_sec(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and replay.
#[derive(Default)]
pub struct ManualClock {
    now: std::cell::Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: std::cell::Cell::new(start),
        }
    }

    pub fn set(&self, t: f64) {
        self.now.set(t);
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now_sec(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapAnimationState {
    pub is_playing: bool,
    pub start_time: f64,
    pub duration: f64,
    pub play_count: u32,
}

impl Default for SnapAnimationState {
    fn default() -> Self {
        Self {
            is_playing: false,
            start_time: 0.0,
            duration: SNAP_DURATION_SEC,
            play_count: 0,
        }
    }
}

/// Output of one animation tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapFrame {
    pub phase: SnapPhase,
    pub progress: f32,
    pub depth: f32,
    /// True on the tick that finished a cycle.
    pub completed: bool,
}

/// State machine driving the moving half's depth coordinate.
#[derive(Clone, Debug)]
pub struct SnapAnimation {
    state: SnapAnimationState,
    restart_due: Option<f64>,
    depth: f32,
}

impl Default for SnapAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapAnimation {
    pub fn new() -> Self {
        Self {
            state: SnapAnimationState::default(),
            restart_due: None,
            depth: SNAP_START_DEPTH,
        }
    }

    pub fn state(&self) -> &SnapAnimationState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn play_count(&self) -> u32 {
        self.state.play_count
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Due time of the next scheduled start, if any.
    pub fn restart_due(&self) -> Option<f64> {
        self.restart_due
    }

    pub fn phase(&self, now: f64) -> SnapPhase {
        if !self.state.is_playing {
            return SnapPhase::Idle;
        }
        phase_at(progress_at(now - self.state.start_time, self.state.duration))
    }

    /// Schedule the first cycle once both halves are assembled.
    pub fn schedule_initial(&mut self, now: f64, pair_loaded: bool) {
        if !pair_loaded {
            log::info!("[snap] pair incomplete; animation stays idle");
            return;
        }
        if self.state.is_playing || self.restart_due.is_some() {
            return;
        }
        self.restart_due = Some(now + SNAP_INITIAL_DELAY_SEC);
    }

    fn start(&mut self, now: f64) {
        self.depth = SNAP_START_DEPTH;
        self.state.is_playing = true;
        self.state.start_time = now;
        self.state.play_count += 1;
        log::info!("[snap] starting cycle #{}", self.state.play_count);
    }

    /// Advance to `now`. Returns the frame to apply, or `None` while idle.
    pub fn update(&mut self, now: f64, pair_loaded: bool) -> Option<SnapFrame> {
        if !pair_loaded {
            return None;
        }
        if let Some(due) = self.restart_due {
            if now >= due {
                self.restart_due = None;
                self.start(now);
            }
        }
        if !self.state.is_playing {
            return None;
        }

        let progress = progress_at(now - self.state.start_time, self.state.duration);
        let phase = phase_at(progress);
        self.depth = depth_at(progress);
        let completed = progress >= 1.0;
        if completed {
            self.state.is_playing = false;
            self.restart_due = Some(now + SNAP_LOOP_DELAY_SEC);
            log::info!("[snap] cycle complete; looping in {}s", SNAP_LOOP_DELAY_SEC);
        }
        Some(SnapFrame {
            phase,
            progress,
            depth: self.depth,
            completed,
        })
    }
}

/// Samples a clock once per tick and feeds [`SnapAnimation`].
pub struct SnapDriver<C: Clock> {
    clock: C,
    animation: SnapAnimation,
}

impl<C: Clock> SnapDriver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            animation: SnapAnimation::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn animation(&self) -> &SnapAnimation {
        &self.animation
    }

    pub fn now(&self) -> f64 {
        self.clock.now_sec()
    }

    pub fn schedule_initial(&mut self, pair_loaded: bool) {
        let now = self.clock.now_sec();
        self.animation.schedule_initial(now, pair_loaded);
    }

    pub fn tick(&mut self, pair_loaded: bool) -> Option<SnapFrame> {
        let now = self.clock.now_sec();
        self.animation.update(now, pair_loaded)
    }
}
