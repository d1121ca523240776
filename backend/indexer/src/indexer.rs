//! Background task that polls the Soroban RPC and writes decoded FundMe
//! events to the database.

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::db::{self, Cursor};
use crate::errors::Result;
use crate::rpc::{self, RpcClient};

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub rpc: RpcClient,
}

/// Poll until `shutdown` is cancelled.
pub async fn run(state: Arc<IndexerState>, shutdown: CancellationToken) {
    info!("Indexer starting for contract {}", state.rpc.contract_id());

    let saved = db::load_cursor(&state.pool).await.unwrap_or_else(|e| {
        error!("Could not load cursor, starting fresh: {e}");
        Cursor::default()
    });

    let mut cursor = if saved.last_ledger > 0 {
        saved
    } else {
        Cursor {
            last_ledger: i64::from(state.config.start_ledger),
            last_cursor: saved.last_cursor,
        }
    };

    info!("Resuming from ledger {}", cursor.last_ledger);

    loop {
        // The RPC client retries until the endpoint answers, so a poll can
        // run indefinitely. An interrupted poll rolls back its insert
        // transaction and is redone from the saved cursor on restart.
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Indexer stopping mid-poll at ledger {}", cursor.last_ledger);
                return;
            }
            result = poll_once(&state, &cursor) => match result {
                Ok(next) => cursor = next,
                Err(e) => error!("Indexer poll error: {e}"),
            },
        }

        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Indexer stopping at ledger {}", cursor.last_ledger);
                return;
            }
            _ = tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)) => {}
        }
    }
}

/// Fetch one page, store it, and persist the cursor to resume from.
async fn poll_once(state: &IndexerState, cursor: &Cursor) -> Result<Cursor> {
    let start_ledger = u32::try_from(cursor.last_ledger).unwrap_or(0);
    let page = state
        .rpc
        .fetch_events(
            start_ledger,
            cursor.last_cursor.as_deref(),
            state.config.events_per_page,
        )
        .await?;

    if !page.events.is_empty() {
        let decoded = rpc::decode_events(&page.events, state.rpc.contract_id());
        let inserted = db::insert_events(&state.pool, &decoded).await?;
        info!(
            "Polled {} raw events → {} new records stored",
            page.events.len(),
            inserted
        );
    }

    let next = next_cursor(cursor, page.cursor, page.latest_ledger);
    db::save_cursor(&state.pool, &next).await?;
    Ok(next)
}

/// The RPC's pagination cursor wins when present; the ledger only moves
/// forward.
fn next_cursor(current: &Cursor, page_cursor: Option<String>, latest_ledger: Option<u64>) -> Cursor {
    let last_ledger = latest_ledger
        .and_then(|l| i64::try_from(l).ok())
        .map(|l| l.max(current.last_ledger))
        .unwrap_or(current.last_ledger);

    Cursor {
        last_ledger,
        last_cursor: page_cursor.or_else(|| current.last_cursor.clone()),
    }
}
