//! Provider configuration sync: fetch, compare, create or replace.

use reelsync_core::configuration::StoredConfiguration;
use reelsync_core::report::SyncOutcome;
use reelsync_core::{Service, SyncError};
use reelsync_store::collections;

use crate::remote::{CatalogSource, RecordStore};

/// Bring the stored configuration singleton in line with the provider.
pub async fn sync_configuration<S, R>(source: &S, store: &R) -> SyncOutcome
where
    S: CatalogSource,
    R: RecordStore,
{
    match reconcile(source, store).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "Configuration sync failed");
            SyncOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

async fn reconcile<S, R>(source: &S, store: &R) -> Result<SyncOutcome, SyncError>
where
    S: CatalogSource,
    R: RecordStore,
{
    let fresh = source.fetch_configuration().await?;
    let existing = store.list(collections::CONFIGURATIONS, None).await?;

    let Some(first) = existing.into_iter().next() else {
        tracing::info!("No configuration stored, creating it");
        store
            .create(collections::CONFIGURATIONS, &fresh.to_record())
            .await?;
        tracing::info!("Configuration created");
        return Ok(SyncOutcome::ConfigurationCreated);
    };

    let stored: StoredConfiguration =
        serde_json::from_value(first).map_err(|e| SyncError::Decode {
            service: Service::Store,
            message: e.to_string(),
        })?;

    let changed = stored.snapshot().changed_fields(&fresh);
    if changed.is_empty() {
        tracing::info!("Configuration unchanged");
        return Ok(SyncOutcome::ConfigurationUnchanged);
    }

    tracing::info!(
        document_id = %stored.document_id,
        ?changed,
        "Configuration differs, updating"
    );
    store
        .update(
            collections::CONFIGURATIONS,
            &stored.document_id,
            &fresh.to_record(),
        )
        .await?;
    tracing::info!("Configuration updated");

    Ok(SyncOutcome::ConfigurationUpdated {
        changed: changed.into_iter().map(String::from).collect(),
    })
}
