//! Explicit unit of work over a sea-orm connection.
//!
//! Writes are queued per entity set and applied by [`UnitOfWork::save_changes`]
//! inside one transaction. Reads go straight to the connection and never see
//! queued writes.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IntoActiveModel, Select, TransactionTrait,
};

use crate::error::OrderingServiceError;

type PendingOp =
    Box<dyn for<'t> FnOnce(&'t DatabaseTransaction) -> BoxFuture<'t, Result<(), DbErr>> + Send>;

fn pending_op<F>(op: F) -> PendingOp
where
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> BoxFuture<'t, Result<(), DbErr>> + Send + 'static,
{
    Box::new(op)
}

/// Holds the row produced by a queued insert once the unit of work commits.
#[derive(Debug)]
pub struct Inserted<M>(Arc<Mutex<Option<M>>>);

impl<M> Inserted<M> {
    /// `None` until a successful commit, and after the row was taken.
    pub fn take(&self) -> Option<M> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

pub struct UnitOfWork {
    db: DatabaseConnection,
    pending: Vec<PendingOp>,
}

impl UnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            pending: Vec::new(),
        }
    }

    /// Connection for reads issued alongside this unit of work.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Mutable view over the rows of entity `E`.
    pub fn set<E: EntityTrait>(&mut self) -> EntitySet<'_, E> {
        EntitySet {
            pending: &mut self.pending,
            _entity: PhantomData,
        }
    }

    /// Number of queued operations.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Apply every queued operation, in order, in one transaction.
    ///
    /// Returns the number of applied operations. On failure nothing is kept
    /// and the queue is emptied either way.
    pub async fn save_changes(&mut self) -> Result<usize, OrderingServiceError> {
        let ops = std::mem::take(&mut self.pending);
        if ops.is_empty() {
            return Ok(0);
        }
        let count = ops.len();
        let txn = self.db.begin().await?;
        for op in ops {
            let applied = op(&txn).await;
            if let Err(err) = applied {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                return Err(err.into());
            }
        }
        txn.commit().await?;
        tracing::debug!(operations = count, "unit of work committed");
        Ok(count)
    }
}

/// Queues writes for entity `E` on its unit of work.
pub struct EntitySet<'u, E: EntityTrait> {
    pending: &'u mut Vec<PendingOp>,
    _entity: PhantomData<E>,
}

impl<E> EntitySet<'_, E>
where
    E: EntityTrait,
    E::ActiveModel: Send + 'static,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + 'static,
{
    /// Query builder over the entity's table.
    pub fn find(&self) -> Select<E> {
        E::find()
    }

    pub fn add(&mut self, model: E::ActiveModel) -> Inserted<E::Model> {
        let slot = Arc::new(Mutex::new(None));
        let inserted = Inserted(Arc::clone(&slot));
        self.pending.push(pending_op(move |txn| {
            Box::pin(async move {
                let row = model.insert(txn).await?;
                *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(row);
                Ok(())
            })
        }));
        inserted
    }

    pub fn update(&mut self, model: E::ActiveModel) {
        self.pending.push(pending_op(move |txn| {
            Box::pin(async move {
                model.update(txn).await?;
                Ok(())
            })
        }));
    }

    pub fn remove(&mut self, model: E::ActiveModel) {
        self.pending.push(pending_op(move |txn| {
            Box::pin(async move {
                model.delete(txn).await?;
                Ok(())
            })
        }));
    }
}
