//! Cart Repositories

mod entries;

pub(crate) use entries::{JoinedCartEntry, SqliteCartEntriesRepository};
