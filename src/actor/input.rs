//! Input Actor: Dedicated thread for polling terminal events.
//!
//! Raw mode turns Ctrl-C into an ordinary key press, so this thread is what
//! lets the user end the animation. Quit keys raise the shared
//! [`StopSignal`]; resizes are forwarded to the animation loop.

use super::messages::ControlEvent;
use crate::animation::StopSignal;
use crate::error::{RainError, Result};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Input actor that polls terminal events.
#[derive(Debug)]
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Shared with the animation loop; also ends this thread.
    stop: StopSignal,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel to send control events to the animation loop.
    /// * `stop` - Raised on a quit key; the thread exits once it is raised.
    /// * `poll_timeout` - How long to wait for events before checking `stop`.
    pub fn spawn(
        sender: Sender<ControlEvent>,
        stop: StopSignal,
        poll_timeout: Duration,
    ) -> Result<Self> {
        let thread_stop = stop.clone();
        let handle = thread::Builder::new()
            .name("rain-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &thread_stop, || Self::poll_terminal(poll_timeout));
            })
            .map_err(RainError::Initialization)?;

        Ok(Self {
            handle: Some(handle),
            stop,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.stop.stop();
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Wait up to `timeout` for the next terminal event.
    fn poll_terminal(timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Main input polling loop.
    ///
    /// `next_event` yields `Ok(None)` when nothing arrived before its
    /// timeout. A failure to read input raises `stop`: raw mode hides
    /// Ctrl-C from the process, so without input nothing else could end it.
    fn run_loop<P>(sender: &Sender<ControlEvent>, stop: &StopSignal, mut next_event: P)
    where
        P: FnMut() -> io::Result<Option<Event>>,
    {
        while !stop.is_stopped() {
            match next_event() {
                // No event, continue loop (will check stop)
                Ok(None) => {}
                Ok(Some(event)) => match Self::convert_event(event) {
                    Some(ControlEvent::Quit) => {
                        debug!("quit key pressed");
                        stop.stop();
                    }
                    Some(control) => {
                        if sender.send(control).is_err() {
                            // Receiver dropped, exit
                            break;
                        }
                    }
                    None => {}
                },
                Err(err) => {
                    warn!(%err, "terminal input unavailable, stopping");
                    stop.stop();
                    break;
                }
            }
        }
    }

    /// Convert a crossterm event to a control event.
    fn convert_event(event: Event) -> Option<ControlEvent> {
        match event {
            Event::Key(key_event) => Self::convert_key(key_event),
            Event::Resize(width, height) => Some(ControlEvent::Resize { width, height }),
            _ => None,
        }
    }

    /// Map quit keys; every other key is ignored.
    fn convert_key(key: KeyEvent) -> Option<ControlEvent> {
        // Only process key press events (not release or repeat)
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(ControlEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(ControlEvent::Quit)
            }
            _ => None,
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
