//! Frame-sync engine: lazy backend start-up, periodic redraw and the
//! cooperative throttle applied after every drawing call.
//!
//! ```text
//! Uninitialized --first drawing call--> Initializing --> Running
//! Running --backend reports its surface closed--> Finished
//! ```

pub mod throttle;

pub use throttle::{Pacer, Throttle, Ticker};

use crate::backend::{Backend, Painter};
use crate::config::{ClosePolicy, Config};
use crate::error::{BackendError, EaselError};
use crate::scene::{SharedScene, registry};
use std::sync::Arc;
use std::time::Duration;

/// Lifecycle of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initializing,
    Running,
    Finished,
}

/// Timing and close behaviour for an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub frames_per_second: u32,
    pub tick_interval: Option<Duration>,
    pub on_close: ClosePolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for EngineOptions {
    fn from(config: &Config) -> Self {
        Self {
            frames_per_second: config.timing.frames_per_second.max(1),
            tick_interval: config.tick_interval(),
            on_close: config.lifecycle.on_close,
        }
    }
}

/// Drives a backend against a shared scene.
pub struct Engine {
    backend: Box<dyn Backend>,
    scene: SharedScene,
    throttle: Throttle,
    options: EngineOptions,
    state: EngineState,
}

impl Engine {
    pub fn new(backend: Box<dyn Backend>, scene: SharedScene, options: EngineOptions) -> Self {
        Self {
            backend,
            scene,
            throttle: Throttle::new(options.tick_interval),
            options,
            state: EngineState::Uninitialized,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> &mut dyn Backend {
        self.backend.as_mut()
    }

    /// Handle to the throttle's permit, for releasing the caller by hand.
    pub fn pacer(&self) -> Pacer {
        self.throttle.pacer()
    }

    /// Starts the backend and the periodic redraw on first use.
    ///
    /// # Errors
    /// Returns the backend's start-up failure, or [`EaselError::Finished`]
    /// once the surface has been closed. A failed start leaves the engine
    /// uninitialized.
    pub fn ensure_started(&mut self) -> Result<(), EaselError> {
        match self.state {
            EngineState::Running => return Ok(()),
            EngineState::Finished => return Err(EaselError::Finished),
            EngineState::Uninitialized | EngineState::Initializing => {}
        }

        self.state = EngineState::Initializing;
        log::info!("Starting '{}' backend", self.backend.name());
        if let Err(err) = self.start() {
            log::warn!("Backend start-up failed: {}", err);
            self.backend.dispose();
            self.throttle.stop();
            self.state = EngineState::Uninitialized;
            return Err(err.into());
        }
        self.state = EngineState::Running;
        Ok(())
    }

    fn start(&mut self) -> Result<(), BackendError> {
        self.backend.init()?;

        let scene = Arc::clone(&self.scene);
        self.backend.schedule_frame_updates(
            Box::new(move |painter: &mut dyn Painter| {
                let frame = registry::lock(&scene).snapshot();
                frame.paint(painter);
            }),
            self.options.frames_per_second,
        );

        self.throttle.start()?;
        Ok(())
    }

    /// Called after every drawing call: ends the run if the surface was
    /// closed, otherwise suspends the caller until the next tick.
    ///
    /// # Errors
    /// Returns [`EaselError::Finished`] under [`ClosePolicy::Error`] once the
    /// surface is closed. Under [`ClosePolicy::Exit`] the process terminates
    /// instead.
    pub fn yield_now(&mut self) -> Result<(), EaselError> {
        if self.state == EngineState::Finished {
            return Err(EaselError::Finished);
        }
        if self.backend.is_finished() {
            self.finish();
            return match self.options.on_close {
                ClosePolicy::Exit => {
                    log::info!("Surface closed, exiting");
                    std::process::exit(0);
                }
                ClosePolicy::Error => Err(EaselError::Finished),
            };
        }
        self.throttle.wait();
        Ok(())
    }

    fn finish(&mut self) {
        log::info!("'{}' backend finished", self.backend.name());
        self.shutdown();
        self.state = EngineState::Finished;
    }

    /// Stops the ticker and releases the backend.
    pub fn shutdown(&mut self) {
        self.throttle.stop();
        if matches!(
            self.state,
            EngineState::Running | EngineState::Initializing
        ) {
            self.backend.dispose();
            self.state = EngineState::Uninitialized;
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{Call, FakeBackend};
    use crate::scene::{Element, Paint, Rectangle, Scene};
    use std::sync::atomic::Ordering;

    fn options(on_close: ClosePolicy) -> EngineOptions {
        EngineOptions {
            frames_per_second: 30,
            tick_interval: None,
            on_close,
        }
    }

    fn engine(backend: &FakeBackend, scene: &SharedScene) -> Engine {
        Engine::new(
            Box::new(backend.clone()),
            Arc::clone(scene),
            options(ClosePolicy::Error),
        )
    }

    #[test]
    fn first_start_initializes_and_schedules_once() {
        let backend = FakeBackend::new();
        let scene = Scene::shared();
        let mut engine = engine(&backend, &scene);
        assert_eq!(engine.state(), EngineState::Uninitialized);

        engine.ensure_started().unwrap();
        engine.ensure_started().unwrap();
        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(backend.inner.init_calls.load(Ordering::SeqCst), 1);
        assert_eq!(*backend.inner.frames_per_second.lock().unwrap(), Some(30));
    }

    #[test]
    fn scheduled_frame_paints_the_scene() {
        let backend = FakeBackend::new();
        let scene = Scene::shared();
        let mut engine = engine(&backend, &scene);
        engine.ensure_started().unwrap();

        registry::lock(&scene).add(Element::new(Rectangle {
            x: 1,
            y: 2,
            width: 3,
            height: 4,
            paint: Paint::default(),
        }));
        let painter = backend.render_frame();
        assert!(painter.calls.contains(&Call::FillRect(1, 2, 3, 4)));
    }

    #[test]
    fn closed_surface_finishes_under_error_policy() {
        let backend = FakeBackend::new();
        let scene = Scene::shared();
        let mut engine = engine(&backend, &scene);
        engine.ensure_started().unwrap();
        engine.yield_now().unwrap();

        backend.close();
        assert!(matches!(engine.yield_now(), Err(EaselError::Finished)));
        assert_eq!(engine.state(), EngineState::Finished);
        assert!(backend.inner.disposed.load(Ordering::SeqCst));
        assert!(matches!(engine.ensure_started(), Err(EaselError::Finished)));
    }

    #[test]
    fn throttled_yield_waits_for_a_tick() {
        let backend = FakeBackend::new();
        let scene = Scene::shared();
        let mut engine = Engine::new(
            Box::new(backend.clone()),
            scene,
            EngineOptions {
                tick_interval: Some(Duration::from_millis(1)),
                ..options(ClosePolicy::Error)
            },
        );
        engine.ensure_started().unwrap();
        for _ in 0..5 {
            engine.yield_now().unwrap();
        }
        engine.shutdown();
        assert_eq!(engine.state(), EngineState::Uninitialized);
    }
}
