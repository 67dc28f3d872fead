//! Tokio driver for a [`RotationController`].
//!
//! A host component calls [`RotationDriver::start`] when it mounts and
//! [`RotationDriver::stop`] when it unmounts. The driver task owns the
//! controller and every timer it has scheduled, so stopping the task is all
//! the cleanup there is: no callback can fire against a torn-down carousel.

use std::time::Instant;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{Direction, RotationController, RotationEvent, RotationSnapshot};

/// Capacity of the event broadcast channel. Slow subscribers lag rather
/// than block the driver.
const EVENT_BUFFER: usize = 64;

/// Input forwarded from the host component's event handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationCommand {
    Advance(Direction),
    JumpTo(usize),
    InteractionStart,
    InteractionEnd,
    PointerDown(f32),
    PointerMove(f32),
    PointerUp,
    /// The item list changed; carries the new item count.
    Reset(usize),
}

/// Current time on the tokio clock, as the controller expects it.
///
/// Hosts should build controllers with this rather than
/// `std::time::Instant::now()` so a paused test clock applies to both.
pub fn clock_now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Handle to a running rotation task.
pub struct RotationDriver {
    commands: mpsc::UnboundedSender<RotationCommand>,
    events: broadcast::Sender<RotationEvent>,
    snapshot: watch::Receiver<RotationSnapshot>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<RotationController>>,
}

impl RotationDriver {
    /// Spawn the driver task. Must be called from within a tokio runtime.
    pub fn start(controller: RotationController) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let (snapshot_tx, snapshot) = watch::channel(controller.snapshot());
        let cancel = CancellationToken::new();

        tracing::debug!(
            item_count = controller.item_count(),
            loop_mode = controller.config().loop_mode,
            "Rotation driver starting"
        );

        let handle = tokio::spawn(run(
            controller,
            command_rx,
            events.clone(),
            snapshot_tx,
            cancel.clone(),
        ));

        Self {
            commands,
            events,
            snapshot,
            cancel,
            handle: Some(handle),
        }
    }

    /// Queue a command. Returns `false` once the task has stopped.
    pub fn send(&self, command: RotationCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Receive every [`RotationEvent`] emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<RotationEvent> {
        self.events.subscribe()
    }

    /// Watch the latest controller state.
    pub fn snapshot(&self) -> watch::Receiver<RotationSnapshot> {
        self.snapshot.clone()
    }

    /// Cancel the task and wait for it, returning the final controller state.
    ///
    /// Returns `None` if the task panicked.
    pub async fn stop(mut self) -> Option<RotationController> {
        self.cancel.cancel();
        let handle = self.handle.take()?;
        match handle.await {
            Ok(controller) => Some(controller),
            Err(e) => {
                tracing::error!(error = %e, "Rotation driver task failed");
                None
            }
        }
    }
}

impl Drop for RotationDriver {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(
    mut controller: RotationController,
    mut commands: mpsc::UnboundedReceiver<RotationCommand>,
    events: broadcast::Sender<RotationEvent>,
    snapshot: watch::Sender<RotationSnapshot>,
    cancel: CancellationToken,
) -> RotationController {
    loop {
        let deadline = controller.next_deadline();

        let emitted = tokio::select! {
            _ = cancel.cancelled() => break,
            command = commands.recv() => match command {
                Some(command) => apply(&mut controller, command, clock_now()),
                None => break,
            },
            _ = sleep_until(deadline) => controller.poll(clock_now()),
        };

        for event in emitted {
            // No subscribers is fine; the snapshot still carries the state.
            let _ = events.send(event);
        }
        snapshot.send_replace(controller.snapshot());
    }

    tracing::debug!("Rotation driver stopped");
    controller
}

fn apply(
    controller: &mut RotationController,
    command: RotationCommand,
    now: Instant,
) -> Vec<RotationEvent> {
    match command {
        RotationCommand::Advance(direction) => controller.advance(direction, now),
        RotationCommand::JumpTo(index) => controller.jump_to(index, now),
        RotationCommand::InteractionStart => {
            controller.interaction_start(now);
            Vec::new()
        }
        RotationCommand::InteractionEnd => {
            controller.interaction_end(now);
            Vec::new()
        }
        RotationCommand::PointerDown(x) => {
            controller.pointer_down(x, now);
            Vec::new()
        }
        RotationCommand::PointerMove(x) => {
            controller.pointer_move(x);
            Vec::new()
        }
        RotationCommand::PointerUp => controller.pointer_up(now),
        RotationCommand::Reset(item_count) => {
            controller.reset(item_count, now);
            Vec::new()
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}
