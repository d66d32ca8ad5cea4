use std::io::Write;

use tokio::{
    sync::oneshot,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    pointer::{Pointer, PointerError, Position},
    Config,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoverState {
    Running,
    Stopped,
}

/// What the loop reports back once it has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSummary {
    pub moves: u64,
}

pub struct Mover<P, W> {
    config: Config,
    pointer: P,
    progress: W,
    moves: u64,
    state: MoverState,
}

impl<P: Pointer, W: Write> Mover<P, W> {
    /// `progress` receives one `.` per move when not verbose.
    pub fn new(config: Config, pointer: P, progress: W) -> Self {
        Self {
            config,
            pointer,
            progress,
            moves: 0,
            state: MoverState::Running,
        }
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn state(&self) -> MoverState {
        self.state
    }

    pub fn progress(&self) -> &W {
        &self.progress
    }

    /// Moves the pointer once. Failures are logged and leave the counter alone.
    pub fn tick(&mut self) -> Result<Position, PointerError> {
        match self.try_move() {
            Ok(to) => {
                self.moves += 1;
                if self.config.verbose() {
                    tracing::info!("Move #{} - Mouse position: {to}", self.moves);
                } else {
                    _ = self.progress.write_all(b".");
                    _ = self.progress.flush();
                }
                Ok(to)
            }
            Err(e) => {
                tracing::warn!("Error moving mouse: {e}");
                Err(e)
            }
        }
    }

    fn try_move(&mut self) -> Result<Position, PointerError> {
        let from = self.pointer.position()?;
        tracing::debug!("Current position: {from}");

        let to = from.offset(self.config.distance());
        self.pointer.set_position(to)?;
        tracing::debug!("Moved to: {to}");

        Ok(to)
    }

    /// Ticks once per interval until `cancel` fires.
    pub async fn run(&mut self, cancel: &CancellationToken) -> MoveSummary {
        if self.state == MoverState::Stopped {
            return self.summary();
        }

        let period = self.config.interval();
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    _ = self.tick();
                }
            }
        }

        if self.config.verbose() {
            tracing::info!(
                "Context cancelled, stopping mouse mover (total moves: {})",
                self.moves
            );
        }
        self.state = MoverState::Stopped;
        self.summary()
    }

    fn summary(&self) -> MoveSummary {
        MoveSummary { moves: self.moves }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("mouse mover exited without reporting completion")]
pub struct MoverGone;

/// Owner side of a running mover: cancel it, then wait for it to finish.
pub struct MoverHandle {
    cancel: CancellationToken,
    done: oneshot::Receiver<MoveSummary>,
}

impl MoverHandle {
    /// Starts the mover as a task on the current `LocalSet`.
    pub fn spawn<P, W>(mut mover: Mover<P, W>) -> Self
    where
        P: Pointer + 'static,
        W: Write + 'static,
    {
        let cancel = CancellationToken::new();
        let (done_tx, done) = oneshot::channel();

        let token = cancel.clone();
        tokio::task::spawn_local(async move {
            let summary = mover.run(&token).await;
            _ = done_tx.send(summary);
        });

        Self { cancel, done }
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn shutdown(self) -> Result<MoveSummary, MoverGone> {
        self.cancel.cancel();
        self.done.await.map_err(|_| MoverGone)
    }
}
