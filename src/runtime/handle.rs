use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, warn};

use crate::{
    commit::{self, CommitContext, SetSlots},
    core::{
        previous::find_previous_cloned,
        store::{EntryStore, StoreError},
    },
    entry::WorkoutEntry,
    types::{EntryId, ExerciseId},
};

use super::events::LogEvent;

/// Errors returned through a [`WorkoutLogHandle`].
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The store rejected or failed to persist a mutation.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The runtime task is gone.
    #[error("workout log runtime is not running")]
    ChannelClosed,
}

/// Runtime sizing.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Bound of the command queue.
    pub command_queue_bound: usize,
    /// Capacity of the event broadcast buffer.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Cloneable client for a store owned by the runtime task.
#[derive(Clone)]
pub struct WorkoutLogHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<LogEvent>,
}

enum Command {
    EntriesOn {
        date: NaiveDate,
        resp: oneshot::Sender<Vec<WorkoutEntry>>,
    },
    Get {
        id: EntryId,
        resp: oneshot::Sender<Option<WorkoutEntry>>,
    },
    FindPrevious {
        exercise_id: ExerciseId,
        date: NaiveDate,
        exclude_id: Option<EntryId>,
        resp: oneshot::Sender<Option<WorkoutEntry>>,
    },
    Commit {
        slots: Box<SetSlots>,
        ctx: CommitContext,
        resp: oneshot::Sender<Result<Option<WorkoutEntry>, RuntimeError>>,
    },
    Remove {
        id: EntryId,
        resp: oneshot::Sender<Result<WorkoutEntry, RuntimeError>>,
    },
    Shutdown {
        resp: oneshot::Sender<EntryStore>,
    },
}

/// Moves `store` onto its own task and returns a handle to it.
///
/// All commands are applied one at a time, so each mutation is followed by
/// exactly one flush before the next command runs.
pub fn spawn_workout_log(store: EntryStore, config: RuntimeConfig) -> WorkoutLogHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<LogEvent>(config.event_capacity);

    let events_tx_loop = events_tx.clone();
    tokio::spawn(async move {
        let mut store = store;
        while let Some(cmd) = cmd_rx.recv().await {
            if let Some(resp) = handle_command(cmd, &mut store, &events_tx_loop) {
                let _ = resp.send(store);
                return;
            }
        }
        debug!("workout log handles dropped, runtime exiting");
    });

    WorkoutLogHandle { cmd_tx, events_tx }
}

impl WorkoutLogHandle {
    /// Subscribes to mutation events.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.events_tx.subscribe()
    }

    /// Entries on `date`, in collection order.
    pub async fn entries_on(&self, date: NaiveDate) -> Result<Vec<WorkoutEntry>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::EntriesOn { date, resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// One entry by id.
    pub async fn get(&self, id: impl Into<EntryId>) -> Result<Option<WorkoutEntry>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Get { id: id.into(), resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Previous record for an exercise as of `date`.
    pub async fn find_previous(
        &self,
        exercise_id: impl Into<ExerciseId>,
        date: NaiveDate,
        exclude_id: Option<EntryId>,
    ) -> Result<Option<WorkoutEntry>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::FindPrevious {
            exercise_id: exercise_id.into(),
            date,
            exclude_id,
            resp: tx,
        })
        .await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Commits edit slots; `Ok(None)` when nothing valid was entered.
    pub async fn commit(
        &self,
        slots: SetSlots,
        ctx: CommitContext,
    ) -> Result<Option<WorkoutEntry>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Commit {
            slots: Box::new(slots),
            ctx,
            resp: tx,
        })
        .await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Removes one entry.
    pub async fn remove(&self, id: impl Into<EntryId>) -> Result<WorkoutEntry, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Remove { id: id.into(), resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Stops the runtime and returns the store it owned.
    pub async fn shutdown(&self) -> Result<EntryStore, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Shutdown { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    async fn send(&self, cmd: Command) -> Result<(), RuntimeError> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| RuntimeError::ChannelClosed)
    }
}

// Returns the shutdown responder when the loop should stop.
fn handle_command(
    cmd: Command,
    store: &mut EntryStore,
    events_tx: &broadcast::Sender<LogEvent>,
) -> Option<oneshot::Sender<EntryStore>> {
    match cmd {
        Command::EntriesOn { date, resp } => {
            let _ = resp.send(store.entries_on_cloned(date));
        }
        Command::Get { id, resp } => {
            let _ = resp.send(store.get_cloned(&id));
        }
        Command::FindPrevious {
            exercise_id,
            date,
            exclude_id,
            resp,
        } => {
            let _ = resp.send(find_previous_cloned(
                store,
                &exercise_id,
                date,
                exclude_id.as_deref(),
            ));
        }
        Command::Commit { slots, ctx, resp } => {
            let res = commit::commit(store, &slots, &ctx).map_err(RuntimeError::from);
            match &res {
                Ok(Some(entry)) => {
                    let _ = events_tx.send(LogEvent::Committed { id: entry.id.clone() });
                }
                Ok(None) => {}
                Err(err) => warn!(error = %err, "commit failed"),
            }
            let _ = resp.send(res);
        }
        Command::Remove { id, resp } => {
            let res = store.remove(&id).map_err(RuntimeError::from);
            match &res {
                Ok(entry) => {
                    let _ = events_tx.send(LogEvent::Removed { id: entry.id.clone() });
                }
                Err(err) => warn!(%id, error = %err, "remove failed"),
            }
            let _ = resp.send(res);
        }
        Command::Shutdown { resp } => return Some(resp),
    }
    None
}
