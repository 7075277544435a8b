use std::{collections::HashSet, sync::Arc};

use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use shared::{
    domain::{Address, AddressDraft, AddressId},
    error::StoreError,
};
use storage::AddressBookStore;

pub mod view;

pub use view::{page_window, ColumnDescriptor, GridView, SortField, SortOrder, ViewSnapshot};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error("draft rejected by validation: {0}")]
    ValidationRejected(String),
    #[error("another mutation is still pending for address {0}")]
    MutationInFlight(AddressId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Events pushed to the rendering surface. A refresh carries the full derived
/// view so renderers never reach back into client state.
#[derive(Debug, Clone)]
pub enum BookEvent {
    ViewRefreshed(ViewSnapshot),
    MutationFailed { message: String },
}

/// What [`AddressBookClient::submit_edit`] did with the editing surface's
/// payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Cancelled,
    Created(AddressId),
    Updated(AddressId),
}

struct ClientInner {
    canonical: Vec<Address>,
    view: GridView,
    pending: HashSet<AddressId>,
}

/// Mutation coordinator and sole writer of the address book. All CRUD funnels
/// through here; after every applied mutation the canonical collection is
/// re-listed and the grid view recomputed before the call returns.
pub struct AddressBookClient {
    store: Arc<dyn AddressBookStore>,
    inner: Mutex<ClientInner>,
    events: broadcast::Sender<BookEvent>,
}

impl AddressBookClient {
    pub fn new(store: Arc<dyn AddressBookStore>, page_size: usize) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            store,
            inner: Mutex::new(ClientInner {
                canonical: Vec::new(),
                view: GridView::new(page_size),
                pending: HashSet::new(),
            }),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<BookEvent> {
        self.events.subscribe()
    }

    /// Re-lists the canonical collection from the store and recomputes the
    /// visible rows. Every mutation path ends here before it is settled.
    pub async fn refresh(&self) -> Result<ViewSnapshot, MutationError> {
        let canonical = self.store.list().await.map_err(|err| {
            warn!(error = %err, "address list refresh failed");
            MutationError::from(err)
        })?;

        let mut inner = self.inner.lock().await;
        inner.view.recompute(&canonical);
        inner.canonical = canonical;
        let snapshot = inner.view.snapshot();
        drop(inner);

        let _ = self.events.send(BookEvent::ViewRefreshed(snapshot.clone()));
        Ok(snapshot)
    }

    /// Stores new filter text and recomputes from the current canonical
    /// snapshot. Empty text clears the filter.
    pub async fn set_search(&self, text: impl Into<String>) -> ViewSnapshot {
        let mut inner = self.inner.lock().await;
        inner.view.set_search(text);
        Self::recompute_locked(&mut inner);
        let snapshot = inner.view.snapshot();
        drop(inner);
        let _ = self.events.send(BookEvent::ViewRefreshed(snapshot.clone()));
        snapshot
    }

    /// Cycles the sort state of one column and recomputes. Cycling back to
    /// none still re-derives, so the view never serves stale rows.
    pub async fn toggle_sort(&self, field: SortField) -> ViewSnapshot {
        let mut inner = self.inner.lock().await;
        let order = inner.view.toggle_sort(field);
        debug!(?field, ?order, "sort intent transition");
        Self::recompute_locked(&mut inner);
        let snapshot = inner.view.snapshot();
        drop(inner);
        let _ = self.events.send(BookEvent::ViewRefreshed(snapshot.clone()));
        snapshot
    }

    pub async fn set_page(&self, page_index: usize) -> ViewSnapshot {
        let mut inner = self.inner.lock().await;
        inner.view.set_page(page_index);
        inner.view.snapshot()
    }

    pub async fn set_page_size(&self, page_size: usize) -> ViewSnapshot {
        let mut inner = self.inner.lock().await;
        inner.view.set_page_size(page_size);
        inner.view.snapshot()
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        self.inner.lock().await.view.snapshot()
    }

    pub async fn columns(&self) -> Vec<ColumnDescriptor> {
        self.inner.lock().await.view.columns().to_vec()
    }

    /// Applies an editing-surface result: `None` is a cancellation and a
    /// no-op; a draft whose id matches an existing entry dispatches an
    /// update, anything else a create. Field constraints are the editing
    /// surface's job, but malformed drafts that reach this far are surfaced
    /// as `ValidationRejected` instead of touching the store.
    pub async fn submit_edit(
        &self,
        draft: Option<AddressDraft>,
    ) -> Result<EditOutcome, MutationError> {
        let Some(draft) = draft else {
            debug!("edit cancelled; nothing to apply");
            return Ok(EditOutcome::Cancelled);
        };

        if let Err(reason) = validate_draft(&draft) {
            self.report_failure("submit_edit", &reason);
            return Err(MutationError::ValidationRejected(reason));
        }

        let exists = match draft.id {
            Some(id) => {
                let inner = self.inner.lock().await;
                inner.canonical.iter().any(|entry| entry.id == id)
            }
            None => false,
        };

        let address = draft.into_address();
        if exists {
            let id = address.id;
            self.update_address(address).await?;
            Ok(EditOutcome::Updated(id))
        } else {
            let created = self.create_address(address).await?;
            Ok(EditOutcome::Created(created.id))
        }
    }

    pub async fn create_address(&self, address: Address) -> Result<Address, MutationError> {
        let id = address.id;
        self.begin_mutation(id).await?;
        let result = self.store.create(address).await;
        self.finish_mutation(id).await;

        match result {
            Ok(created) => {
                info!(address_id = %created.id, "address created");
                self.refresh().await?;
                Ok(created)
            }
            Err(err) => {
                self.report_failure("create", &err.to_string());
                Err(err.into())
            }
        }
    }

    pub async fn update_address(&self, address: Address) -> Result<(), MutationError> {
        let id = address.id;
        self.begin_mutation(id).await?;
        let result = self.store.update(address).await;
        self.finish_mutation(id).await;

        match result {
            Ok(()) => {
                info!(address_id = %id, "address updated");
                self.refresh().await?;
                Ok(())
            }
            Err(err) => {
                self.report_failure("update", &err.to_string());
                Err(err.into())
            }
        }
    }

    pub async fn delete_address(&self, id: AddressId) -> Result<(), MutationError> {
        self.begin_mutation(id).await?;
        let result = self.store.delete(id).await;
        self.finish_mutation(id).await;

        match result {
            // Deleting an id that is already gone is benign.
            Ok(()) | Err(StoreError::NotFound(_)) => {
                info!(address_id = %id, "address deleted");
                self.refresh().await?;
                Ok(())
            }
            Err(err) => {
                self.report_failure("delete", &err.to_string());
                Err(err.into())
            }
        }
    }

    fn recompute_locked(inner: &mut ClientInner) {
        inner.view.recompute(&inner.canonical);
    }

    /// At-most-one in-flight mutation per id: a second mutation targeting an
    /// id whose earlier one has not resolved is rejected, not queued.
    async fn begin_mutation(&self, id: AddressId) -> Result<(), MutationError> {
        let mut inner = self.inner.lock().await;
        if !inner.pending.insert(id) {
            warn!(address_id = %id, "rejected concurrent mutation for same id");
            return Err(MutationError::MutationInFlight(id));
        }
        Ok(())
    }

    async fn finish_mutation(&self, id: AddressId) {
        self.inner.lock().await.pending.remove(&id);
    }

    fn report_failure(&self, operation: &str, message: &str) {
        warn!(operation, message, "mutation failed; canonical state unchanged");
        let _ = self.events.send(BookEvent::MutationFailed {
            message: format!("{operation}: {message}"),
        });
    }
}

/// Backstop for constraints the editing surface enforces upstream: name and
/// surname non-empty, phone number all digits when present.
fn validate_draft(draft: &AddressDraft) -> Result<(), String> {
    if draft.name.trim().is_empty() {
        return Err("name must not be empty".into());
    }
    if draft.surname.trim().is_empty() {
        return Err("surname must not be empty".into());
    }
    if let Some(phone) = &draft.phone_number {
        if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("phone number must be digits only, got {phone:?}"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
