//! Sovereign DB - Database layer using native_db
//!
//! Provides transactional storage for:
//! - The catalog (resources, buildings and their level curves)
//! - Planet state (amounts, productions, storages, building levels)
//! - Building actions in flight and their cost/delta sidecars
//!
//! All access goes through a [`Transaction`] obtained from
//! [`Connection::begin`] (read-write) or [`Connection::read`] (read-only);
//! the repositories never open one themselves.

mod clock;
mod connection;
mod context;
mod error;
mod keys;
mod models;
pub mod repositories;
#[cfg(test)]
mod testing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use connection::{Connection, Transaction};
pub use context::{CancelToken, Context};
pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{planet_resources, planets, resources};
    use crate::testing::{connection, install_catalog, t0, METAL};
    use chrono::TimeDelta;
    use sovereign_core::PlayerId;

    #[test]
    fn test_dropped_transaction_rolls_back() {
        let (conn, _clock) = connection();
        let ctx = Context::new();
        let tx = conn.begin(&ctx).unwrap();
        install_catalog(&tx);
        drop(tx);

        let tx = conn.begin(&ctx).unwrap();
        assert!(resources::list(&tx).unwrap().is_empty());
    }

    #[test]
    fn test_transaction_timestamp_comes_from_clock() {
        let (conn, clock) = connection();
        let ctx = Context::new();
        assert_eq!(conn.begin(&ctx).unwrap().timestamp(), t0());

        clock.advance(TimeDelta::seconds(90));
        let tx = conn.begin(&ctx).unwrap();
        assert_eq!(tx.timestamp(), t0() + TimeDelta::seconds(90));

        // Later clock moves do not affect an open transaction.
        clock.advance(TimeDelta::seconds(10));
        assert_eq!(tx.timestamp(), t0() + TimeDelta::seconds(90));
    }

    #[test]
    fn test_cancelled_context_fails_every_call() {
        let (conn, _clock) = connection();
        let token = CancelToken::new();
        let ctx = Context::with_cancel(token.clone());

        let tx = conn.begin(&ctx).unwrap();
        install_catalog(&tx);
        token.cancel();

        assert!(matches!(resources::list(&tx), Err(Error::Cancelled)));
        assert!(matches!(tx.commit(), Err(Error::Cancelled)));
        assert!(matches!(conn.begin(&ctx), Err(Error::Cancelled)));

        let tx = conn.begin(&Context::new()).unwrap();
        assert!(resources::list(&tx).unwrap().is_empty());
    }

    #[test]
    fn test_open_on_disk_persists_commits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sovereign.db");
        let ctx = Context::new();

        {
            let conn = Connection::open(&path).unwrap();
            let tx = conn.begin(&ctx).unwrap();
            install_catalog(&tx);
            planets::create(&tx, PlayerId(1), "Terra", true).unwrap();
            tx.commit().unwrap();
        }

        let conn = Connection::open(&path).unwrap();
        let tx = conn.begin(&ctx).unwrap();
        let stored = planets::list(&tx).unwrap();
        assert_eq!(stored.len(), 1);
        let metal = planet_resources::get_for_planet_and_resource(&tx, stored[0].id, METAL)
            .unwrap()
            .unwrap();
        assert_eq!(metal.amount, 500.0);
    }

    #[test]
    fn test_read_transaction_sees_committed_state_only() {
        let (conn, _clock) = connection();
        let ctx = Context::new();
        let tx = conn.begin(&ctx).unwrap();
        install_catalog(&tx);
        tx.commit().unwrap();

        let writer = conn.begin(&ctx).unwrap();
        planets::create(&writer, PlayerId(1), "Terra", true).unwrap();

        // Readers do not wait for the open writer.
        let reader = conn.read(&ctx).unwrap();
        assert!(reader.is_read_only());
        assert_eq!(resources::list(&reader).unwrap().len(), 1);
        assert!(planets::list(&reader).unwrap().is_empty());
        reader.close();

        writer.commit().unwrap();
        let reader = conn.read(&ctx).unwrap();
        assert_eq!(planets::list(&reader).unwrap().len(), 1);
    }

    #[test]
    fn test_read_transaction_rejects_writes() {
        let (conn, _clock) = connection();
        let tx = conn.read(&Context::new()).unwrap();
        let err = planets::create(&tx, PlayerId(1), "Terra", true).unwrap_err();
        assert!(matches!(err, Error::ReadOnly));
        tx.commit().unwrap();
    }

    #[test]
    fn test_read_on_cancelled_context_fails() {
        let (conn, _clock) = connection();
        let token = CancelToken::new();
        let ctx = Context::with_cancel(token.clone());
        token.cancel();
        assert!(matches!(conn.read(&ctx), Err(Error::Cancelled)));
    }
}
