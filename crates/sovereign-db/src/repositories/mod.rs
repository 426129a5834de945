//! Per-entity repositories.
//!
//! Every function takes the caller's [`Transaction`](crate::Transaction);
//! nothing here opens or commits one. `update` functions implement the
//! optimistic lock: the caller's `version` must match the stored row, and
//! the written row carries `version + 1`. Lookups and listings also work
//! through a read-only transaction from
//! [`Connection::read`](crate::Connection::read).

/// Evaluate `$body` with `$r` bound to whichever store access `$tx` holds.
macro_rules! read {
    ($tx:expr, $r:ident => $body:expr) => {
        match $tx.access()? {
            $crate::connection::Access::Read($r) => $body,
            $crate::connection::Access::Write($r) => $body,
        }
    };
}

/// Collect every row of `$model` whose primary key starts with `$prefix`.
macro_rules! scan_prefix {
    ($rw:expr, $model:ty, $prefix:expr) => {{
        let scan = $rw.scan().primary::<$model>()?;
        let rows: std::result::Result<Vec<$model>, _> = scan.start_with($prefix)?.collect();
        rows?
    }};
}

/// Collect every row of `$model`.
macro_rules! scan_all {
    ($rw:expr, $model:ty) => {{
        let scan = $rw.scan().primary::<$model>()?;
        let rows: std::result::Result<Vec<$model>, _> = scan.all()?.collect();
        rows?
    }};
}

pub mod action_sidecars;
pub mod building_actions;
pub mod buildings;
pub mod planet_buildings;
pub mod planet_productions;
pub mod planet_resources;
pub mod planet_storages;
pub mod planets;
pub mod resources;
pub(crate) mod sequences;
