//! Animation loop: fixed-timestep advance, compose, present, sleep.

use super::clock::{Clock, SystemClock};
use super::signal::StopSignal;
use crate::actor::ControlEvent;
use crate::error::Result;
use crate::rain::{CharacterSource, ColumnField, FrameCompositor, Palette, ResetPolicy};
use crate::terminal::DisplaySink;
use crossbeam_channel::{Receiver, TryRecvError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, warn};

/// Configuration for the animation loop.
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    /// Target time between frames.
    pub frame_interval: Duration,
    /// Ranges columns are respawned from.
    pub policy: ResetPolicy,
    /// Trail colors.
    pub palette: Palette,
    /// Fixed seed for both random sources; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            policy: ResetPolicy::default(),
            palette: Palette::default(),
            seed: None,
        }
    }
}

impl AnimationConfig {
    /// Set the frame interval from a target frame rate.
    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.frame_interval = Duration::from_secs(1) / fps.max(1);
        self
    }

    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Lifecycle of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Producing frames.
    Running,
    /// Not producing frames: not started yet, stopped, or failed.
    Stopped,
}

/// Drives the animation at a fixed cadence.
///
/// Each tick advances the field, composes a frame and hands it to the sink
/// by value. Frame N+1 is never composed before frame N has been presented.
pub struct AnimationLoop<S, C = SystemClock, R = StdRng> {
    field: ColumnField<R>,
    source: CharacterSource<R>,
    compositor: FrameCompositor,
    sink: S,
    clock: C,
    frame_interval: Duration,
    /// Start of the last tick, `None` before the first frame.
    last_tick: Option<Instant>,
    frames: u64,
    state: LoopState,
    events: Option<Receiver<ControlEvent>>,
}

impl<S: DisplaySink> AnimationLoop<S> {
    /// Build a loop for a `width x height` grid on the system clock.
    pub fn new(width: u16, height: u16, config: AnimationConfig, sink: S) -> Result<Self> {
        let (field_rng, glyph_rng) = match config.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };
        let field = ColumnField::with_rng(width, height, config.policy, field_rng)?;
        Ok(Self::from_parts(
            field,
            CharacterSource::from_rng(glyph_rng),
            FrameCompositor::new(config.palette),
            sink,
            SystemClock,
            config.frame_interval,
        ))
    }
}

impl<S: DisplaySink, C: Clock, R: Rng> AnimationLoop<S, C, R> {
    /// Assemble a loop from its components.
    pub fn from_parts(
        field: ColumnField<R>,
        source: CharacterSource<R>,
        compositor: FrameCompositor,
        sink: S,
        clock: C,
        frame_interval: Duration,
    ) -> Self {
        Self {
            field,
            source,
            compositor,
            sink,
            clock,
            frame_interval,
            last_tick: None,
            frames: 0,
            state: LoopState::Stopped,
            events: None,
        }
    }

    /// Drain control events from `events` between frames.
    #[must_use]
    pub fn with_events(mut self, events: Receiver<ControlEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> LoopState {
        self.state
    }

    /// Frames presented so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Target time between frames.
    pub const fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// The column field.
    pub const fn field(&self) -> &ColumnField<R> {
        &self.field
    }

    /// The display sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The display sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The pacing clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Consume the loop, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Produce exactly one frame: advance, compose, present.
    pub fn tick(&mut self) -> Result<()> {
        let reset = self.field.advance_all();
        let frame = self.compositor.compose(&self.field, &mut self.source);
        self.sink.present(frame)?;
        self.frames += 1;
        if reset > 0 {
            trace!(frame = self.frames, reset, "columns respawned");
        }
        Ok(())
    }

    /// Run one pacing iteration.
    ///
    /// Ticks if a frame is due, then sleeps for whatever is left of the
    /// frame interval. Returns the time slept; zero when the frame ran over
    /// its budget, in which case the next frame is due immediately.
    pub fn step(&mut self) -> Result<Duration> {
        let now = self.clock.now();
        let due = self
            .last_tick
            .map_or(true, |last| now.duration_since(last) >= self.frame_interval);

        if due {
            self.tick()?;
            self.last_tick = Some(now);
        }

        let since = self
            .last_tick
            .map_or(Duration::ZERO, |last| self.clock.now().duration_since(last));
        let remaining = self.frame_interval.saturating_sub(since);
        if remaining.is_zero() {
            if due {
                trace!(
                    frame = self.frames,
                    overrun_us = u64::try_from((since - self.frame_interval).as_micros())
                        .unwrap_or(u64::MAX),
                    "frame over budget"
                );
            }
        } else {
            self.clock.sleep(remaining);
        }
        Ok(remaining)
    }

    /// Run until `stop` is raised, a quit event arrives, or presenting fails.
    ///
    /// A presentation failure is logged once and returned; the loop does
    /// not retry.
    pub fn run(&mut self, stop: &StopSignal) -> Result<()> {
        self.state = LoopState::Running;
        info!(
            width = self.field.width(),
            height = self.field.height(),
            interval_ms = u64::try_from(self.frame_interval.as_millis()).unwrap_or(u64::MAX),
            "animation started"
        );

        let result = loop {
            if stop.is_stopped() || self.drain_events() {
                break Ok(());
            }
            if let Err(err) = self.step() {
                error!(%err, frames = self.frames, "stopping animation");
                break Err(err);
            }
        };

        self.state = LoopState::Stopped;
        info!(frames = self.frames, "animation stopped");
        result
    }

    /// Adapt to a new terminal size.
    ///
    /// A zero-sized request is ignored; the previous grid stays in use.
    pub fn resize(&mut self, width: u16, height: u16) {
        if let Err(err) = self.field.resize(width, height) {
            warn!(%err, "ignoring resize");
            return;
        }
        self.sink.invalidate();
        debug!(width, height, "resized");
    }

    /// Apply pending control events. Returns `true` when asked to quit.
    fn drain_events(&mut self) -> bool {
        let Some(events) = self.events.clone() else {
            return false;
        };
        loop {
            match events.try_recv() {
                Ok(ControlEvent::Resize { width, height }) => self.resize(width, height),
                Ok(ControlEvent::Quit) => {
                    debug!("quit requested");
                    return true;
                }
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    debug!("control channel closed");
                    self.events = None;
                    return false;
                }
            }
        }
    }
}

impl<S, C, R: Rng> std::fmt::Debug for AnimationLoop<S, C, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationLoop")
            .field("width", &self.field.width())
            .field("height", &self.field.height())
            .field("frame_interval", &self.frame_interval)
            .field("frames", &self.frames)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
