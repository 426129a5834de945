//! Planet Economy Demo
//!
//! Loads a catalog from RON, creates one homeworld per worker thread and
//! lets every worker queue mine upgrades on its planet while a manual
//! clock moves forward ten minutes per round.

use chrono::{TimeDelta, TimeZone, Utc};
use sovereign_core::{ActionRequest, BuildingId, PlanetId, PlayerId};
use sovereign_db::{Clock, Context, ManualClock};
use sovereign_engine::{EngineConfig, Service};
use sovereign_script::{install_catalog, Catalog, Loader};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;

const ROUNDS: usize = 12;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== Sovereign Planet Economy Demo ===\n");

    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");

    let mut loader = Loader::new();
    loader.load_file(data.join("catalog.ron"))?;
    let catalog = loader.finish()?;
    let config = EngineConfig::load(data.join("engine.ron"))?;

    let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).single().unwrap_or_default();
    let clock = Arc::new(ManualClock::new(start));
    let conn = config.connect()?.with_clock(clock.clone());
    let service = Service::new(conn, Arc::new(config.completion.clone()));

    let ctx = Context::new();
    {
        let tx = service.connection().begin(&ctx)?;
        install_catalog(&tx, &catalog)?;
        tx.commit()?;
    }

    let workers = num_cpus::get().clamp(1, 8);
    let mut planets = Vec::with_capacity(workers);
    for n in 0..workers {
        let player = PlayerId::new(n as u64 + 1);
        let planet =
            service
                .planets()
                .create_planet(&ctx, player, &format!("Homeworld {}", n + 1), true)?;
        planets.push(planet.id);
    }
    println!("Created {} homeworlds, one per worker\n", workers);

    let buildings: Vec<BuildingId> = catalog.buildings.iter().map(|b| b.building.id).collect();

    for round in 0..ROUNDS {
        clock.advance(TimeDelta::minutes(10));
        let now = clock.now();

        std::thread::scope(|scope| {
            for (worker, planet) in planets.iter().enumerate() {
                let service = &service;
                let ctx = &ctx;
                let building = buildings[(round + worker) % buildings.len()];
                scope.spawn(move || run_worker(service, ctx, *planet, building, now));
            }
        });

        println!("After round {} ({}):", round + 1, now.format("%H:%M"));
        report(&service, &ctx, &catalog, &planets)?;
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}

/// One worker turn: catch the planet up, then try to queue an upgrade.
fn run_worker(
    service: &Service,
    ctx: &Context,
    planet: PlanetId,
    building: BuildingId,
    now: sovereign_core::Timestamp,
) {
    if let Err(err) = service.sync_planet(ctx, planet, now) {
        log::warn!("Could not sync {}: {}", planet, err);
        return;
    }
    match service.create_action(ctx, ActionRequest::new(planet, building)) {
        Ok(action) => log::info!(
            "{} queued {} level {}, done at {}",
            planet,
            building,
            action.desired_level,
            action.completed_at.format("%H:%M:%S")
        ),
        // Busy or too poor this round; try again next round.
        Err(err) if err.http_status() == 400 || err.http_status() == 409 => {
            log::debug!("{} skipped {}: {}", planet, building, err)
        }
        Err(err) => log::warn!("{} failed to queue {}: {}", planet, building, err),
    }
}

fn report(
    service: &Service,
    ctx: &Context,
    catalog: &Catalog,
    planets: &[PlanetId],
) -> Result<(), Box<dyn Error>> {
    for planet in planets {
        let snapshot = service.planets().get_planet(ctx, *planet)?;
        let amounts: Vec<String> = snapshot
            .resources
            .iter()
            .map(|r| {
                let name = catalog
                    .resources
                    .iter()
                    .find(|c| c.id == r.resource)
                    .map(|c| c.name.as_str())
                    .unwrap_or("?");
                format!("{} {:.0}", name, r.amount)
            })
            .collect();
        let levels: Vec<String> = snapshot
            .buildings
            .iter()
            .map(|b| format!("{}:{}", b.building, b.level))
            .collect();
        println!(
            "  {} [{}] buildings [{}] pending {}",
            snapshot.planet.name,
            amounts.join(", "),
            levels.join(" "),
            snapshot.actions.len()
        );
    }
    Ok(())
}
