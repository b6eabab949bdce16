//! The scene: a set of bodies, each driven by its own worker thread.
//!
//! Every body is owned by exactly one worker, which is the only writer of
//! its phase. After each tick the worker publishes the new phase and
//! position into a per-body slot that the renderer reads through
//! [`Scene::snapshot`]. A slot is written under one lock, so a snapshot of a
//! single body is never torn; snapshots across bodies are not synchronised
//! and may mix bodies that already ticked this frame with ones that have
//! not.
//!
//! Shared controls (reference point, freeze flag, speed scale) are read by
//! every worker once per tick, so changes take effect within one tick
//! interval.
//!
//! Workers sleep on a shutdown channel rather than a plain sleep. Dropping
//! the sender wakes all of them at once, and [`Scene::shutdown`] joins them
//! and takes their bodies back, so a stopped scene can be started again
//! from the phases it held.

use crate::body::{Body, Rgb};
use crate::config::SystemConfig;
use crate::error::SceneError;
use crate::time::{TickClock, TickPolicy};
use crossbeam::atomic::AtomicCell;
use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use glam::DVec2;
use log::{debug, error, info, trace, warn};
use parking_lot::RwLock;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Largest accepted speed scale.
pub const MAX_SPEED_SCALE: f64 = 10.0;

/// Body worker entry point. Yields `None` if its body was never handed over.
type WorkerFn = Box<dyn FnOnce() -> Option<Body> + Send + 'static>;

/// Starts a named worker thread.
type SpawnFn = fn(&str, WorkerFn) -> io::Result<JoinHandle<Option<Body>>>;

fn spawn_named(name: &str, work: WorkerFn) -> io::Result<JoinHandle<Option<Body>>> {
    thread::Builder::new().name(name.to_owned()).spawn(work)
}

/// Something that can be asked to redraw the whole scene.
///
/// Workers call this after every tick. Implementations may coalesce or
/// drop requests; the renderer always reads the latest published state.
pub trait Redraw: Send + Sync {
    fn request_redraw(&self);
}

impl<F> Redraw for F
where
    F: Fn() + Send + Sync,
{
    fn request_redraw(&self) {
        self()
    }
}

/// Timing settings shared by all workers of a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
    /// Sleep between two ticks of one worker.
    pub tick_interval: Duration,
    pub tick_policy: TickPolicy,
    /// Initial multiplier on every per-tick phase increment.
    pub speed_scale: f64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(5),
            tick_policy: TickPolicy::Fixed,
            speed_scale: 1.0,
        }
    }
}

/// Identity and geometry of a body, fixed once it joins a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo {
    pub name: String,
    pub color: Rgb,
    pub diameter: f64,
    pub orbit_radius: f64,
    pub angular_speed: f64,
    pub reference_offset: DVec2,
}

impl BodyInfo {
    fn of(body: &Body) -> Self {
        Self {
            name: body.name().to_owned(),
            color: body.color(),
            diameter: body.diameter(),
            orbit_radius: body.orbit_radius(),
            angular_speed: body.angular_speed(),
            reference_offset: body.reference_offset(),
        }
    }
}

/// The mutable part of a body as last published by its worker.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Motion {
    phase: f64,
    position: DVec2,
}

/// Read-only view of one body at the moment it was sampled.
#[derive(Clone, Debug)]
pub struct BodySnapshot {
    pub info: Arc<BodyInfo>,
    pub phase: f64,
    pub position: DVec2,
}

impl BodySnapshot {
    #[inline]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.info.color
    }

    #[inline]
    pub fn draw_radius(&self) -> f64 {
        self.info.diameter / 2.0
    }

    #[inline]
    pub fn orbit_center(&self, reference_point: DVec2) -> DVec2 {
        reference_point + self.info.reference_offset
    }
}

struct BodySlot {
    info: Arc<BodyInfo>,
    motion: RwLock<Motion>,
}

impl BodySlot {
    fn new(body: &Body) -> Self {
        Self {
            info: Arc::new(BodyInfo::of(body)),
            motion: RwLock::new(Motion {
                phase: body.phase(),
                position: body.position(),
            }),
        }
    }

    fn publish(&self, body: &Body) {
        *self.motion.write() = Motion {
            phase: body.phase(),
            position: body.position(),
        };
    }

    fn snapshot(&self) -> BodySnapshot {
        let motion = *self.motion.read();
        BodySnapshot {
            info: Arc::clone(&self.info),
            phase: motion.phase,
            position: motion.position,
        }
    }
}

/// State read by every worker on every tick.
struct Controls {
    reference_point: RwLock<DVec2>,
    frozen: AtomicBool,
    speed_scale: AtomicCell<f64>,
    ticks: AtomicU64,
}

impl Controls {
    fn reference_point(&self) -> DVec2 {
        *self.reference_point.read()
    }

    fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }
}

struct Worker {
    handle: JoinHandle<Option<Body>>,
    slot: Arc<BodySlot>,
}

/// A worker that could not be started, with its body handed back.
struct SpawnFailure {
    body: Body,
    slot: Arc<BodySlot>,
    error: SceneError,
}

/// An ordered set of bodies plus the workers that animate them.
///
/// Insertion order is draw order. Dropping the scene stops and joins all
/// workers.
pub struct Scene {
    settings: SceneSettings,
    controls: Arc<Controls>,
    /// Every body's published state, in insertion order.
    slots: Vec<Arc<BodySlot>>,
    /// Bodies not currently owned by a worker.
    idle: Vec<(Body, Arc<BodySlot>)>,
    workers: Vec<Worker>,
    /// Held only while running; dropping it stops every worker.
    shutdown: Option<Sender<()>>,
    /// Kept so bodies added while running can join the same shutdown.
    shutdown_rx: Option<Receiver<()>>,
    redraw: Option<Arc<dyn Redraw>>,
    spawn: SpawnFn,
}

impl Scene {
    /// Create an empty, stopped scene centred on `reference_point`.
    pub fn new(reference_point: DVec2, settings: SceneSettings) -> Self {
        Self {
            settings,
            controls: Arc::new(Controls {
                reference_point: RwLock::new(reference_point),
                frozen: AtomicBool::new(false),
                speed_scale: AtomicCell::new(sanitize_speed(settings.speed_scale)),
                ticks: AtomicU64::new(0),
            }),
            slots: Vec::new(),
            idle: Vec::new(),
            workers: Vec::new(),
            shutdown: None,
            shutdown_rx: None,
            redraw: None,
            spawn: spawn_named,
        }
    }

    #[cfg(test)]
    fn with_spawn(mut self, spawn: SpawnFn) -> Self {
        self.spawn = spawn;
        self
    }

    /// Build a stopped scene holding every body of a validated configuration.
    pub fn from_config(config: &SystemConfig, reference_point: DVec2) -> Result<Self, SceneError> {
        config.validate()?;

        let mut scene = Self::new(reference_point, config.scene_settings());
        for body in config.bodies() {
            scene.add_body(body)?;
        }
        Ok(scene)
    }

    /// Add a body at the end of the draw order.
    ///
    /// The body is projected around the current reference point right away.
    /// If the scene is running it gets its own worker immediately. When that
    /// worker cannot be started the body is still added, stopped, and gets a
    /// worker on the next [`start`](Self::start).
    pub fn add_body(&mut self, mut body: Body) -> Result<(), SceneError> {
        body.project(self.controls.reference_point());
        let slot = Arc::new(BodySlot::new(&body));
        self.slots.push(Arc::clone(&slot));

        match (self.shutdown_rx.clone(), self.redraw.clone()) {
            (Some(shutdown), Some(redraw)) => match self.spawn_worker(body, slot, shutdown, redraw) {
                Ok(worker) => self.workers.push(worker),
                Err(failure) => {
                    warn!("{}", failure.error);
                    self.idle.push((failure.body, failure.slot));
                    return Err(failure.error);
                }
            },
            _ => self.idle.push((body, slot)),
        }
        Ok(())
    }

    /// Start one worker per body.
    ///
    /// `redraw` is called after every tick of every worker. If any worker
    /// fails to start, the ones already started are stopped again and the
    /// scene is left stopped with every body in place.
    pub fn start(&mut self, redraw: Arc<dyn Redraw>) -> Result<(), SceneError> {
        if self.is_running() {
            return Err(SceneError::AlreadyRunning);
        }

        info!(
            "starting scene: {} bodies, tick interval {:?}, {:?} ticks",
            self.slots.len(),
            self.settings.tick_interval,
            self.settings.tick_policy
        );

        let (sender, receiver) = channel::bounded::<()>(0);
        self.shutdown = Some(sender);
        self.shutdown_rx = Some(receiver.clone());
        self.redraw = Some(Arc::clone(&redraw));

        let mut pending = std::mem::take(&mut self.idle).into_iter();
        while let Some((body, slot)) = pending.next() {
            match self.spawn_worker(body, slot, receiver.clone(), Arc::clone(&redraw)) {
                Ok(worker) => self.workers.push(worker),
                Err(failure) => {
                    error!("{}; stopping scene", failure.error);
                    self.idle.push((failure.body, failure.slot));
                    self.idle.extend(pending);
                    self.shutdown();
                    return Err(failure.error);
                }
            }
        }
        Ok(())
    }

    /// Start a worker for `body`.
    ///
    /// The body is handed to the thread only after it started, so a failed
    /// spawn gives it back.
    fn spawn_worker(
        &self,
        body: Body,
        slot: Arc<BodySlot>,
        shutdown: Receiver<()>,
        redraw: Arc<dyn Redraw>,
    ) -> Result<Worker, SpawnFailure> {
        let name = body.name().to_owned();
        let controls = Arc::clone(&self.controls);
        let worker_slot = Arc::clone(&slot);
        let settings = self.settings;
        let (handoff, incoming) = channel::bounded::<Body>(1);

        let work: WorkerFn = Box::new(move || {
            let body = incoming.recv().ok()?;
            Some(run_worker(body, &worker_slot, &controls, &shutdown, redraw.as_ref(), settings))
        });

        let handle = match (self.spawn)(&name, work) {
            Ok(handle) => handle,
            Err(source) => {
                return Err(SpawnFailure {
                    body,
                    slot,
                    error: SceneError::Spawn { name, source },
                })
            }
        };

        match handoff.send(body) {
            Ok(()) => Ok(Worker { handle, slot }),
            Err(channel::SendError(body)) => Err(SpawnFailure {
                body,
                slot,
                error: SceneError::Spawn {
                    name,
                    source: io::Error::other("worker exited before receiving its body"),
                },
            }),
        }
    }

    /// Signal every worker to stop and wait for all of them.
    ///
    /// Bodies return to the scene with the phase they held, so a later
    /// [`start`](Self::start) resumes from there. Returns the number of
    /// workers joined. Calling this on a stopped scene does nothing.
    pub fn shutdown(&mut self) -> usize {
        // Dropping the only sender disconnects every worker's receiver.
        self.shutdown = None;
        self.shutdown_rx = None;
        self.redraw = None;

        let workers = std::mem::take(&mut self.workers);
        let joined = workers.len();
        for worker in workers {
            match worker.handle.join() {
                Ok(Some(body)) => self.idle.push((body, worker.slot)),
                Ok(None) => warn!("worker for '{}' never received its body", worker.slot.info.name),
                Err(_) => warn!("worker for '{}' panicked; body is stopped", worker.slot.info.name),
            }
        }

        if joined > 0 {
            info!("scene stopped, {} workers joined", joined);
        }
        joined
    }

    /// Whether workers are currently running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.shutdown.is_some()
    }

    /// Latest published state of every body, in draw order.
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.slots.iter().map(|slot| slot.snapshot()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn settings(&self) -> SceneSettings {
        self.settings
    }

    // ========== Shared controls ==========

    /// The shared origin every orbit centre is offset from.
    pub fn reference_point(&self) -> DVec2 {
        self.controls.reference_point()
    }

    /// Move the reference point by `delta`.
    ///
    /// Running bodies pick the change up on their next tick.
    pub fn pan(&mut self, delta: DVec2) {
        {
            let mut reference = self.controls.reference_point.write();
            *reference += delta;
            trace!("panned by {:?} to {:?}", delta, *reference);
        }
        self.reproject_idle();
    }

    pub fn set_reference_point(&mut self, reference_point: DVec2) {
        *self.controls.reference_point.write() = reference_point;
        self.reproject_idle();
    }

    /// Stopped bodies have no worker to follow the reference point for them.
    fn reproject_idle(&mut self) {
        let reference = self.controls.reference_point();
        for (body, slot) in &mut self.idle {
            body.project(reference);
            slot.publish(body);
        }
    }

    pub fn freeze(&self) {
        self.set_frozen(true);
    }

    pub fn unfreeze(&self) {
        self.set_frozen(false);
    }

    pub fn set_frozen(&self, frozen: bool) {
        let was = self.controls.frozen.swap(frozen, Ordering::AcqRel);
        if was != frozen {
            info!("{}", if frozen { "scene frozen" } else { "scene unfrozen" });
        }
    }

    /// Flip the freeze flag, returning the new state.
    pub fn toggle_freeze(&self) -> bool {
        let frozen = !self.is_frozen();
        self.set_frozen(frozen);
        frozen
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.controls.is_frozen()
    }

    /// Set the multiplier on every per-tick phase increment.
    ///
    /// Negative or non-finite values are treated as zero.
    pub fn set_speed_scale(&self, speed_scale: f64) {
        self.controls.speed_scale.store(sanitize_speed(speed_scale));
    }

    #[inline]
    pub fn speed_scale(&self) -> f64 {
        self.controls.speed_scale.load()
    }

    /// Total ticks performed by all workers since the scene was created.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.controls.ticks.load(Ordering::Relaxed)
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Body worker loop: tick, publish, request a redraw, then sleep until the
/// next tick or until the scene shuts down.
fn run_worker(
    mut body: Body,
    slot: &BodySlot,
    controls: &Controls,
    shutdown: &Receiver<()>,
    redraw: &dyn Redraw,
    settings: SceneSettings,
) -> Body {
    debug!("worker '{}' started", body.name());
    let mut clock = TickClock::new(settings.tick_policy, settings.tick_interval);

    loop {
        let delta = clock.tick() * controls.speed_scale.load();
        body.tick(controls.is_frozen(), delta, controls.reference_point());
        slot.publish(&body);
        controls.ticks.fetch_add(1, Ordering::Relaxed);
        redraw.request_redraw();

        match shutdown.recv_timeout(settings.tick_interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    debug!("worker '{}' stopped after {} ticks", body.name(), clock.tick_count());
    body
}

fn sanitize_speed(speed_scale: f64) -> f64 {
    if speed_scale.is_finite() {
        speed_scale.clamp(0.0, MAX_SPEED_SCALE)
    } else {
        0.0
    }
}
