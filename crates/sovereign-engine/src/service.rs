//! Service facade: one entry point per state-changing operation, each
//! owning its transactions.

use crate::action::ActionEngine;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::planet::PlanetService;
use crate::resource::advance_planet;
use sovereign_core::{
    ActionId, ActionRequest, BuildingAction, CompletionTime, PlanetId, PlanetResource, Timestamp,
};
use sovereign_db::repositories::{building_actions, planets};
use sovereign_db::{Connection, Context};
use std::sync::Arc;

/// Outcome of [`Service::process_actions_until`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Actions settled, in the order they were applied
    pub settled: Vec<ActionId>,
}

impl ProcessReport {
    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }
}

/// Transactional facade over the planet-state store
///
/// `Service` is `Send + Sync`; hosts share it between threads behind an
/// `Arc`. Write transactions are serialized by the store.
pub struct Service {
    conn: Connection,
    actions: ActionEngine,
}

impl Service {
    pub fn new(conn: Connection, completion: Arc<dyn CompletionTime>) -> Self {
        Self {
            conn,
            actions: ActionEngine::new(completion),
        }
    }

    /// Build a service from configuration, opening its database.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let conn = config.connect()?;
        Ok(Self::new(conn, Arc::new(config.completion.clone())))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Planet lifecycle operations sharing this service's connection
    pub fn planets(&self) -> PlanetService<'_> {
        PlanetService::new(&self.conn)
    }

    /// Advance every resource of `planet` to `until` in one transaction.
    pub fn update_planet_until(
        &self,
        ctx: &Context,
        planet: PlanetId,
        until: Timestamp,
    ) -> Result<Vec<PlanetResource>> {
        let tx = self.conn.begin(ctx)?;
        if planets::get(&tx, planet)?.is_none() {
            return Err(sovereign_db::Error::NotFound(planet.to_string()).into());
        }
        let written = advance_planet(&tx, planet, until)?;
        tx.commit()?;
        Ok(written)
    }

    /// Settle every action of `planet` due at `until`, one transaction
    /// per action, in `(completed_at, id)` order.
    ///
    /// The first failure stops processing; actions settled before it stay
    /// committed and a later call resumes with the next one.
    pub fn process_actions_until(
        &self,
        ctx: &Context,
        planet: PlanetId,
        until: Timestamp,
    ) -> Result<ProcessReport> {
        let due = {
            let tx = self.conn.read(ctx)?;
            let due = building_actions::list_before_completion_time(&tx, planet, until)?;
            tx.close();
            due
        };

        let mut report = ProcessReport::default();
        for action in due {
            if let Err(err) = self.settle(ctx, &action, &mut report) {
                log::warn!(
                    "Stopped processing {} at {}: {} ({} settled)",
                    planet,
                    action.id,
                    err,
                    report.settled.len()
                );
                return Err(err);
            }
        }

        if !report.is_empty() {
            log::info!("Settled {} actions on {}", report.settled.len(), planet);
        }
        Ok(report)
    }

    fn settle(&self, ctx: &Context, action: &BuildingAction, report: &mut ProcessReport) -> Result<()> {
        let tx = self.conn.begin(ctx)?;
        // Another caller may have settled it since the listing.
        if building_actions::get(&tx, action.id)?.is_none() {
            log::debug!("{} was already settled", action.id);
            return Ok(());
        }
        self.actions.complete(&tx, action)?;
        tx.commit()?;
        report.settled.push(action.id);
        Ok(())
    }

    /// Advance the planet to now, then schedule the upgrade.
    pub fn create_action(&self, ctx: &Context, request: ActionRequest) -> Result<BuildingAction> {
        let tx = self.conn.begin(ctx)?;
        advance_planet(&tx, request.planet, tx.timestamp())?;
        let action = self.actions.create(&tx, request)?;
        tx.commit()?;
        Ok(action)
    }

    /// Cancel a pending action, refunding its cost.
    pub fn delete_action(&self, ctx: &Context, id: ActionId) -> Result<BuildingAction> {
        let tx = self.conn.begin(ctx)?;
        let action = self.actions.delete(&tx, id)?;
        tx.commit()?;
        Ok(action)
    }

    /// Bring a planet up to `until` before serving it: settle due actions,
    /// then integrate resources.
    pub fn sync_planet(&self, ctx: &Context, planet: PlanetId, until: Timestamp) -> Result<()> {
        self.process_actions_until(ctx, planet, until)
            .map_err(|e| Error::ActionSchedulingFailed(Box::new(e)))?;
        self.update_planet_until(ctx, planet, until)
            .map_err(|e| Error::PlanetResourceUpdateFailed(Box::new(e)))?;
        Ok(())
    }
}
