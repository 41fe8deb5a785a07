use std::rc::Rc;

use async_sequencing::{
    sequencer::{callbacks, chained, linear},
    EventLoop, EventLoopError, Promised, Run, SimulatedApi, UniformDelay,
};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), EventLoopError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    // nested callbacks
    let event_loop = EventLoop::new();
    let api = Rc::new(SimulatedApi::new(event_loop.clone(), UniformDelay::default()));
    callbacks::run(api, 5, |run| report("callbacks", run));
    event_loop.run();

    // chained futures
    let event_loop = EventLoop::new();
    let api = Promised::new(SimulatedApi::new(event_loop.clone(), UniformDelay::default()));
    report("chained", event_loop.block_on(chained::run(&api, 2))?);

    // async/await
    let event_loop = EventLoop::new();
    let api = Promised::new(SimulatedApi::new(event_loop.clone(), UniformDelay::default()));
    report("async/await", event_loop.block_on(linear::run(&api, 4))?);

    Ok(())
}

fn report(style: &str, run: Run) {
    println!("{}", summary(style, &run));
}

fn summary(style: &str, run: &Run) -> String {
    match &run.outcome {
        Ok(comments) => format!("Comments fetched ({style}): {comments:?}"),
        Err(error) => format!("Error in {style} process: {error}"),
    }
}
