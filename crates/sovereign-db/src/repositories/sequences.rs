//! Persisted id sequences.

use crate::connection::Transaction;
use crate::error::Result;
use crate::models::StoredSequence;

pub(crate) const PLANET: &str = "planet";
pub(crate) const BUILDING_ACTION: &str = "building_action";

/// Hand out the next id of sequence `name`, starting at 1.
pub(crate) fn next(tx: &Transaction<'_>, name: &str) -> Result<u64> {
    let rw = tx.rw()?;
    let current: Option<StoredSequence> = rw.get().primary(name.to_string())?;
    match current {
        Some(current) => {
            let id = current.next;
            let bumped = StoredSequence {
                name: current.name.clone(),
                next: id + 1,
            };
            rw.update(current, bumped)?;
            Ok(id)
        }
        None => {
            rw.insert(StoredSequence {
                name: name.to_string(),
                next: 2,
            })?;
            Ok(1)
        }
    }
}
