//! Resolved catalog and its installation into a store.

use crate::error::Result;
use sovereign_core::{BuildingSpec, Resource};
use sovereign_db::repositories::{buildings, resources};
use sovereign_db::Transaction;

/// Catalog with every name resolved to an id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub resources: Vec<Resource>,
    pub buildings: Vec<BuildingSpec>,
}

impl Catalog {
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn building(&self, name: &str) -> Option<&BuildingSpec> {
        self.buildings.iter().find(|b| b.building.name == name)
    }
}

/// Write every resource, building and curve of `catalog` through `tx`.
///
/// Installing over an existing catalog fails with a duplicate key; the
/// caller drops the transaction.
pub fn install_catalog(tx: &Transaction<'_>, catalog: &Catalog) -> Result<()> {
    for resource in &catalog.resources {
        resources::create(tx, resource)?;
    }
    for spec in &catalog.buildings {
        buildings::create(tx, &spec.building)?;
        for cost in &spec.costs {
            buildings::create_cost(tx, cost)?;
        }
        for production in &spec.productions {
            buildings::create_production(tx, production)?;
        }
        for storage in &spec.storages {
            buildings::create_storage(tx, storage)?;
        }
    }
    log::info!(
        "Installed catalog with {} resources and {} buildings",
        catalog.resources.len(),
        catalog.buildings.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::Loader;
    use sovereign_db::{Connection, Context};

    fn catalog() -> Catalog {
        let mut loader = Loader::new();
        loader
            .load_str(
                r#"(
                    resources: [(name: "metal", start_amount: 500.0, start_production: 60, start_storage: 10000)],
                    buildings: [(
                        name: "mine",
                        costs: [(resource: "metal", cost: 100, progress: 1.5)],
                        productions: [(resource: "metal", base: 30, progress: 1.1)],
                        storages: [(resource: "metal", base: 0)],
                    )],
                )"#,
            )
            .unwrap();
        loader.finish().unwrap()
    }

    #[test]
    fn test_install_round_trips_through_store() {
        let conn = Connection::in_memory().unwrap();
        let tx = conn.begin(&Context::new()).unwrap();
        let catalog = catalog();
        install_catalog(&tx, &catalog).unwrap();

        assert_eq!(resources::list(&tx).unwrap(), catalog.resources);
        let id = catalog.building("mine").unwrap().building.id;
        assert_eq!(
            buildings::spec(&tx, id).unwrap().as_ref(),
            catalog.building("mine")
        );
        assert_eq!(
            resources::get_by_name(&tx, "metal").unwrap().as_ref(),
            catalog.resource("metal")
        );
    }

    #[test]
    fn test_install_twice_fails() {
        let conn = Connection::in_memory().unwrap();
        let ctx = Context::new();
        let tx = conn.begin(&ctx).unwrap();
        install_catalog(&tx, &catalog()).unwrap();
        tx.commit().unwrap();

        let tx = conn.begin(&ctx).unwrap();
        let err = install_catalog(&tx, &catalog()).unwrap_err();
        assert!(matches!(
            err,
            Error::Store(sovereign_db::Error::DuplicateKey(_))
        ));
    }
}
