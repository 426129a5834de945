//! Database connection and transaction handle.

use crate::clock::{Clock, SystemClock};
use crate::context::{CancelToken, Context};
use crate::error::{Error, Result};
use crate::models::*;
use native_db::transaction::{RTransaction, RwTransaction};
use native_db::*;
use sovereign_core::Timestamp;
use std::path::Path;
use std::sync::{Arc, LazyLock};

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredResource>().unwrap();
    models.define::<StoredBuilding>().unwrap();
    models.define::<StoredBuildingCost>().unwrap();
    models.define::<StoredBuildingResourceProduction>().unwrap();
    models.define::<StoredBuildingResourceStorage>().unwrap();
    models.define::<StoredPlanet>().unwrap();
    models.define::<StoredPlanetResource>().unwrap();
    models.define::<StoredPlanetResourceProduction>().unwrap();
    models.define::<StoredPlanetResourceStorage>().unwrap();
    models.define::<StoredPlanetBuilding>().unwrap();
    models.define::<StoredBuildingAction>().unwrap();
    models.define::<StoredBuildingActionCost>().unwrap();
    models.define::<StoredBuildingActionResourceProduction>().unwrap();
    models.define::<StoredBuildingActionResourceStorage>().unwrap();
    models.define::<StoredSequence>().unwrap();
    models
});

/// Connection to the game database.
///
/// Write transactions are serialized by the underlying store; stale writes
/// are caught by row versions in the repositories.
pub struct Connection {
    db: Database<'static>,
    clock: Arc<dyn Clock>,
}

impl Connection {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        log::info!("Opened database at {}", path.as_ref().display());
        Ok(Self::from_database(db))
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self::from_database(db))
    }

    fn from_database(db: Database<'static>) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock transactions take their timestamp from.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Begin a write transaction stamped with the clock's current instant.
    ///
    /// Dropping the returned handle without calling [`Transaction::commit`]
    /// rolls every write back.
    pub fn begin(&self, ctx: &Context) -> Result<Transaction<'_>> {
        if ctx.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let rw = self.db.rw_transaction()?;
        Ok(self.stamp(Access::Write(rw), ctx))
    }

    /// Begin a read-only transaction.
    ///
    /// It sees the last committed state and does not wait for, or block,
    /// writers. Repository writes through it fail with [`Error::ReadOnly`].
    pub fn read(&self, ctx: &Context) -> Result<Transaction<'_>> {
        if ctx.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let r = self.db.r_transaction()?;
        Ok(self.stamp(Access::Read(r), ctx))
    }

    fn stamp<'db>(&self, access: Access<'db>, ctx: &Context) -> Transaction<'db> {
        let timestamp = self.clock.now();
        log::trace!("Began transaction at {}", timestamp);
        Transaction {
            access,
            timestamp,
            cancel: ctx.cancel_token().clone(),
        }
    }
}

/// Store access held by a transaction.
pub(crate) enum Access<'db> {
    Read(RTransaction<'db>),
    Write(RwTransaction<'db>),
}

/// Transaction handle passed explicitly to every repository call.
pub struct Transaction<'db> {
    access: Access<'db>,
    timestamp: Timestamp,
    cancel: CancelToken,
}

impl<'db> Transaction<'db> {
    /// Instant the transaction started at.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.access, Access::Read(_))
    }

    /// Fail with [`Error::Cancelled`] once the caller cancelled.
    pub fn ensure_active(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    /// Read access to the store, checked for cancellation.
    pub(crate) fn access(&self) -> Result<&Access<'db>> {
        self.ensure_active()?;
        Ok(&self.access)
    }

    /// Write access to the store, checked for cancellation.
    pub(crate) fn rw(&self) -> Result<&RwTransaction<'db>> {
        match self.access()? {
            Access::Write(rw) => Ok(rw),
            Access::Read(_) => Err(Error::ReadOnly),
        }
    }

    /// Commit every write made through this transaction.
    ///
    /// Committing a read-only transaction only releases it.
    pub fn commit(self) -> Result<()> {
        self.ensure_active()?;
        if let Access::Write(rw) = self.access {
            rw.commit()?;
        }
        log::trace!("Committed transaction started at {}", self.timestamp);
        Ok(())
    }

    /// Discard the transaction.
    pub fn close(self) {
        log::trace!("Closed transaction started at {}", self.timestamp);
    }
}
