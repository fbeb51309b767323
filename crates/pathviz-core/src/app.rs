//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::grid::{Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
pub enum Effect {
    /// A one-shot command, run on a background thread; a produced [`Msg`]
    /// is fed back into the message queue.
    Cmd(Box<dyn FnOnce() -> Option<Msg> + Send>),
    /// Multiple effects batched together.
    Batch(Vec<Effect>),
    /// Signal the application loop to stop.
    End,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cmd(_) => f.write_str("Effect::Cmd(..)"),
            Self::Batch(v) => f.debug_tuple("Effect::Batch").field(&v.len()).finish(),
            Self::End => f.write_str("Effect::End"),
        }
    }
}

/// Convenience constructor for an [`Effect::Cmd`].
pub fn cmd<F>(f: F) -> Effect
where
    F: FnOnce() -> Option<Msg> + Send + 'static,
{
    Effect::Cmd(Box::new(f))
}

// ---------------------------------------------------------------------------
// Model / Driver traits
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input, sending messages through `tx`. The implementation
    /// should honour `ctx.is_done()` and return promptly.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: crate::grid::Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the back-end.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application from a configuration.
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
        }
    }

    /// Run the main Model-View-Update loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model.
    /// 3. Enters the event loop: poll → update → draw → diff → flush.
    /// 4. Stops when the model returns `Effect::End`.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();

        tx.send(Msg::Init).ok();

        let mut prev_grid = Grid::new(self.width, self.height);
        let mut curr_grid = Grid::new(self.width, self.height);

        while !ctx.is_done() {
            // The driver pushes any pending input into tx, waiting at most
            // one short poll interval. Command threads send into the same
            // channel concurrently.
            if let Err(e) = self.driver.poll_msgs(&ctx, tx.clone()) {
                ctx.cancel();
                self.driver.close();
                return Err(e);
            }

            self.process_pending(&rx, &ctx, &tx, &mut prev_grid, &mut curr_grid)?;
        }

        self.driver.close();
        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        tx: &Sender<Msg>,
        prev_grid: &mut Grid,
        curr_grid: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Some(effect) = self.model.update(msg) {
                self.handle_effect(effect, ctx, tx);
            }
            needs_draw = true;
            if ctx.is_done() {
                return Ok(());
            }
        }

        if needs_draw {
            self.model.draw(curr_grid);
            let frame = compute_frame(prev_grid, curr_grid);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev_grid.copy_from(curr_grid);
        }

        Ok(())
    }

    fn handle_effect(&mut self, effect: Effect, ctx: &Context, tx: &Sender<Msg>) {
        match effect {
            Effect::End => ctx.cancel(),
            Effect::Cmd(f) => {
                let tx = tx.clone();
                let ctx = ctx.clone();
                thread::spawn(move || {
                    if let Some(msg) = f() {
                        if !ctx.is_done() {
                            tx.send(msg).ok();
                        }
                    }
                });
            }
            Effect::Batch(effects) => {
                for e in effects {
                    self.handle_effect(e, ctx, tx);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Frame;
    use std::time::Duration;

    struct NullDriver;

    impl Driver for NullDriver {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }
        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            _tx: Sender<Msg>,
        ) -> Result<(), Box<dyn std::error::Error>> {
            thread::sleep(Duration::from_millis(1));
            Ok(())
        }
        fn flush(&mut self, _frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }
        fn close(&mut self) {}
    }

    /// On Init, schedules a command that produces Quit; on Quit, ends.
    struct CountModel {
        updates: u32,
    }

    impl Model for CountModel {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            self.updates += 1;
            match msg {
                Msg::Init => Some(cmd(|| Some(Msg::Quit))),
                Msg::Quit => Some(Effect::End),
                _ => None,
            }
        }
        fn draw(&self, _grid: &mut Grid) {}
    }

    #[test]
    fn context_cancel() {
        let ctx = Context::new();
        assert!(!ctx.is_done());
        let clone = ctx.clone();
        clone.cancel();
        assert!(ctx.is_done());
    }

    #[test]
    fn cmd_message_feeds_back_into_loop() {
        let mut app = App::new(AppConfig {
            model: CountModel { updates: 0 },
            driver: NullDriver,
            width: 4,
            height: 4,
        });
        app.run().unwrap();
        // Init and the command-produced Quit both reached the model.
        assert!(app.model.updates >= 2);
    }

    #[test]
    fn batch_end_cancels() {
        struct EndModel;
        impl Model for EndModel {
            fn update(&mut self, msg: Msg) -> Option<Effect> {
                match msg {
                    Msg::Init => Some(Effect::Batch(vec![Effect::End])),
                    _ => None,
                }
            }
            fn draw(&self, _grid: &mut Grid) {}
        }
        let mut app = App::new(AppConfig {
            model: EndModel,
            driver: NullDriver,
            width: 2,
            height: 2,
        });
        app.run().unwrap();
    }
}
