//! Offscreen backend: a render thread painting into a Cairo image surface.
//!
//! The surface never appears on screen. It "closes" when a [`CloseHandle`] is
//! triggered or after the configured number of frames, and can write its
//! last frame to a PNG file when disposed.

use super::{Backend, FrameCallback, FrameRequest, Painter};
use crate::config::Config;
use crate::draw::{CairoPainter, Color};
use crate::error::BackendError;
use crate::input::{Key, KeyboardState};
use crate::util;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, mpsc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long the render thread sleeps between command checks when no frame is due.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Settings for a [`HeadlessBackend`].
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub title: String,
    pub background: String,
    pub aspect: (u32, u32),
    pub frame_path: Option<PathBuf>,
    pub max_frames: Option<u64>,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for HeadlessOptions {
    fn from(config: &Config) -> Self {
        Self {
            title: config.canvas.title.clone(),
            background: config.canvas.background.clone(),
            aspect: (config.canvas.aspect_width, config.canvas.aspect_height),
            frame_path: config.output.frame_path.clone(),
            max_frames: config.output.max_frames,
        }
    }
}

enum Command {
    Schedule {
        callback: FrameCallback,
        interval: Duration,
    },
    Request(FrameRequest),
    Stop,
}

#[derive(Debug)]
struct Shared {
    initialized: AtomicBool,
    closed: AtomicBool,
    frames: AtomicU64,
    size: Mutex<(i32, i32)>,
}

impl Shared {
    fn size(&self) -> (i32, i32) {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_size(&self, size: (i32, i32)) {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner) = size;
    }
}

/// Closes a headless surface from any thread, like a user closing a window.
#[derive(Debug, Clone)]
pub struct CloseHandle {
    shared: Arc<Shared>,
}

impl CloseHandle {
    pub fn close(&self) {
        if !self.shared.closed.swap(true, Ordering::AcqRel) {
            log::info!("Headless surface closed");
        }
    }
}

/// Backend rendering into an offscreen Cairo surface on its own thread.
pub struct HeadlessBackend {
    options: HeadlessOptions,
    shared: Arc<Shared>,
    keyboard: KeyboardState,
    commands: Option<mpsc::Sender<Command>>,
    thread: Option<JoinHandle<()>>,
}

impl HeadlessBackend {
    pub fn new(options: HeadlessOptions) -> Self {
        let (w, h) = options.aspect;
        let size = util::aspect_dimensions(w, h).unwrap_or((util::LOGICAL_SIZE, util::LOGICAL_SIZE));
        Self {
            options,
            shared: Arc::new(Shared {
                initialized: AtomicBool::new(false),
                closed: AtomicBool::new(false),
                frames: AtomicU64::new(0),
                size: Mutex::new(size),
            }),
            keyboard: KeyboardState::new(),
            commands: None,
            thread: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(HeadlessOptions::from(config))
    }

    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Handle for injecting key presses, standing in for a window's key events.
    pub fn keyboard(&self) -> KeyboardState {
        self.keyboard.clone()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.shared.frames.load(Ordering::Acquire)
    }

    /// Current logical surface size.
    pub fn size(&self) -> (i32, i32) {
        self.shared.size()
    }

    fn send(&self, command: Command) {
        let Some(commands) = &self.commands else {
            log::debug!("Ignoring frame command for uninitialized headless backend");
            return;
        };
        if commands.send(command).is_err() {
            log::debug!("Render thread is gone, dropping frame command");
        }
    }
}

impl Backend for HeadlessBackend {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn init(&mut self) -> Result<(), BackendError> {
        if self.thread.is_some() {
            return Ok(());
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), BackendError>>();
        let shared = Arc::clone(&self.shared);
        let options = self.options.clone();

        let handle = thread::Builder::new()
            .name("easel-render".to_string())
            .spawn(move || render_loop(command_rx, ready_tx, shared, options))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                let _ = handle.join();
                return Err(err);
            }
            Err(mpsc::RecvError) => {
                let _ = handle.join();
                return Err(BackendError::SurfaceCreation(
                    "render thread exited before signaling readiness".to_string(),
                ));
            }
        }

        let (w, h) = self.shared.size();
        log::info!("'{}' headless surface ready ({}x{})", self.options.title, w, h);
        self.commands = Some(command_tx);
        self.thread = Some(handle);
        self.shared.initialized.store(true, Ordering::Release);
        Ok(())
    }

    fn dispose(&mut self) {
        if let Some(commands) = self.commands.take() {
            let _ = commands.send(Command::Stop);
        }
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                log::warn!("Render thread panicked");
            }
            log::debug!("Headless backend disposed");
        }
        self.keyboard.release_all();
    }

    fn is_finished(&self) -> bool {
        self.shared.initialized.load(Ordering::Acquire) && self.shared.closed.load(Ordering::Acquire)
    }

    fn schedule_frame_updates(&mut self, callback: FrameCallback, frames_per_second: u32) {
        let interval = Duration::from_secs_f64(1.0 / f64::from(frames_per_second.max(1)));
        self.send(Command::Schedule { callback, interval });
    }

    fn request_animation_frame(&mut self, callback: FrameRequest) {
        self.send(Command::Request(callback));
    }

    fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        match util::aspect_dimensions(width, height) {
            Some(size) => {
                log::debug!("Aspect ratio {}:{} -> {}x{}", width, height, size.0, size.1);
                self.shared.set_size(size);
            }
            None => log::warn!("Ignoring aspect ratio {}:{}", width, height),
        }
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.keyboard.is_pressed(key)
    }

    fn pressed_keys(&self) -> Vec<Key> {
        self.keyboard.pressed()
    }
}

impl Drop for HeadlessBackend {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn render_loop(
    commands: mpsc::Receiver<Command>,
    ready: mpsc::Sender<Result<(), BackendError>>,
    shared: Arc<Shared>,
    options: HeadlessOptions,
) {
    let (width, height) = shared.size();
    let mut painter = match CairoPainter::new(width, height) {
        Ok(painter) => painter,
        Err(err) => {
            let _ = ready.send(Err(err));
            return;
        }
    };
    painter.set_background(Color::parse(&options.background));
    if ready.send(Ok(())).is_err() {
        return;
    }

    let mut callback: Option<FrameCallback> = None;
    let mut interval: Option<Duration> = None;
    let mut requests: Vec<FrameRequest> = Vec::new();
    let mut next_frame = Instant::now();

    loop {
        let due = (interval.is_some() || !requests.is_empty())
            && !shared.closed.load(Ordering::Acquire);
        let timeout = if due {
            next_frame.saturating_duration_since(Instant::now())
        } else {
            IDLE_POLL
        };

        match commands.recv_timeout(timeout) {
            Ok(Command::Schedule {
                callback: scheduled,
                interval: every,
            }) => {
                callback = Some(scheduled);
                interval = Some(every);
                next_frame = Instant::now();
                continue;
            }
            Ok(Command::Request(request)) => {
                if interval.is_none() {
                    next_frame = Instant::now();
                }
                requests.push(request);
                continue;
            }
            Ok(Command::Stop) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }

        if !due {
            continue;
        }

        let (width, height) = shared.size();
        if let Err(err) = painter.resize(width, height) {
            log::warn!("Could not resize surface: {}", err);
        }
        if let Some(callback) = callback.as_mut() {
            callback(&mut painter as &mut dyn Painter);
        }
        for request in requests.drain(..) {
            request(&mut painter as &mut dyn Painter);
        }

        let frames = shared.frames.fetch_add(1, Ordering::AcqRel) + 1;
        if options.max_frames.is_some_and(|max| frames >= max) {
            shared.closed.store(true, Ordering::Release);
            log::info!("Headless surface closed after {} frames", frames);
        }

        next_frame += interval.unwrap_or_default();
        let now = Instant::now();
        if next_frame < now {
            next_frame = now;
        }
    }

    if let Some(path) = &options.frame_path {
        if let Err(err) = painter.write_png(path) {
            log::warn!("{}", err);
        }
    }
}
