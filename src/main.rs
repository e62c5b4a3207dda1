//! `digital-rain`: falling glyphs until `q`, `Esc` or `Ctrl-C`.

use crossbeam_channel::bounded;
use digital_rain::logging::DeferredLog;
use digital_rain::{
    AnimationConfig, AnimationLoop, InputActor, Result, StopSignal, TerminalSession, TerminalSink,
};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How long the input thread waits for an event before re-checking the stop signal.
const INPUT_POLL: Duration = Duration::from_millis(50);

fn main() -> ExitCode {
    let log = init_tracing();

    match run(&log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("digital-rain: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> DeferredLog {
    let log = DeferredLog::stderr();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(log.clone()))
        .with(filter)
        .init();
    log
}

fn run(log: &DeferredLog) -> Result<()> {
    // Records logged while the animation owns the screen are written after it is restored.
    let _held = log.hold();
    let session = TerminalSession::enter()?;
    let stop = StopSignal::new();
    let (tx, rx) = bounded(16);
    let input = InputActor::spawn(tx, stop.clone(), INPUT_POLL)?;

    let result = AnimationLoop::new(
        session.width(),
        session.height(),
        AnimationConfig::default(),
        TerminalSink::stdout(),
    )
    .map(|animation| animation.with_events(rx))
    .and_then(|mut animation| animation.run(&stop));

    stop.stop();
    input.join();
    // Restore the terminal before the caller prints anything.
    drop(session);
    result
}
