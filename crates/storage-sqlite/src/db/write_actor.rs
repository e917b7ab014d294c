//! Single-writer actor for SQLite.
//!
//! SQLite allows many readers but only one writer. All mutating repository
//! calls are funneled through one background task that owns a dedicated
//! connection and runs each job inside an immediate transaction, so writes
//! never contend for the write lock and a multi-statement job (e.g.
//! persisting a duplicated trip aggregate) is atomic.

use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};
use tripfolio_core::errors::Result;

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for submitting write jobs to the actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Runs `job` on the writer's connection, inside an immediate
    /// transaction, and returns its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |conn| job(conn).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                reply_tx,
            ))
            .await
            .expect("writer actor channel closed; the actor has stopped");

        reply_rx
            .await
            .expect("writer actor dropped the reply sender")
            .map(|boxed| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor result had unexpected type"))
            })
    }
}

/// Spawns the writer actor. The returned handle is cheap to clone and is
/// shared by every repository.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("failed to acquire the writer actor's connection");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // Receiver may have been dropped (request cancelled); that's fine.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
