use chrono::Utc;
use ipgeo_core::auth::Session;
use ipgeo_core::geo::GeoRecord;
use ipgeo_core::store::{LogEntry, LogStore, StoreError};

/// Appends a self-lookup to the remote log.
///
/// Runs detached: the outcome only reaches the log file, never the UI.
pub async fn append_log(
    store: LogStore,
    session: Session,
    record: GeoRecord,
) -> Result<(), StoreError> {
    let entry = LogEntry::from_record(&session.user.id, &record, Utc::now());
    let result = store.append(&session, &entry).await;
    match &result {
        Ok(()) => tracing::info!(table = %store.table(), ip = %entry.ip_address, "lookup logged"),
        Err(e) => tracing::warn!(table = %store.table(), error = %e, "failed to log lookup"),
    }
    result
}
