//! Domain state store.
//!
//! [`DataStore`] owns the session's copy of every collection. Callers read
//! through it and mutate through it; nothing else writes to the snapshot.
//!
//! A mutation is confirmed by the remote store before it touches local state.
//! Once applied, an activity entry is appended in the background. That append
//! is best effort: if it fails the mutation still stands and the failure is
//! only logged.

pub mod notify;
pub mod snapshot;

pub use notify::{Notification, NotificationKind, NotificationReceiver, Notifier};
pub use snapshot::{Collection, LoadState, Snapshot};

use crate::{
    client::RecordClient,
    errors::Result,
    models::{
        ActivityAction, ActivityLogDraft, ActivityLogEntry, EntityKind, PlantingSchedule,
        PriceSnapshot, Product, ProductDraft, ScheduleDraft,
    },
};
use chrono::Utc;
use snapshot::LoadStates;
use std::{future::Future, sync::Arc};
use tokio::{
    sync::{Mutex, RwLock},
    task::JoinSet,
};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default)]
struct StoreState {
    snapshot: Snapshot,
    load: LoadStates,
}

/// The session's authoritative in-memory view of the remote store.
#[derive(Debug)]
pub struct DataStore {
    client: RecordClient,
    actor: String,
    state: Arc<RwLock<StoreState>>,
    notifier: Notifier,
    pending_logs: Mutex<JoinSet<()>>,
}

impl DataStore {
    /// Creates an empty store. `actor` is recorded as the user on every
    /// activity entry this store writes.
    pub fn new(client: RecordClient, actor: impl Into<String>) -> (Self, NotificationReceiver) {
        let (notifier, receiver) = Notifier::channel();
        let store = Self {
            client,
            actor: actor.into(),
            state: Arc::new(RwLock::new(StoreState::default())),
            notifier,
            pending_logs: Mutex::new(JoinSet::new()),
        };
        (store, receiver)
    }

    /// Loads all four collections concurrently.
    ///
    /// Each collection becomes ready on its own. One that fails stays empty and
    /// produces one failure notification; the others are unaffected.
    #[instrument(skip(self))]
    pub async fn load(&self) {
        {
            let mut state = self.state.write().await;
            for collection in Collection::ALL {
                state.load.set(collection, LoadState::Loading);
            }
        }

        tokio::join!(
            self.load_collection(Collection::Products, self.client.list_products(), |s, v| {
                s.products = v;
            }),
            self.load_collection(Collection::Schedules, self.client.list_schedules(), |s, v| {
                s.schedules = v;
            }),
            self.load_collection(
                Collection::PriceHistory,
                self.client.list_price_history(),
                |s, v| s.price_history = v,
            ),
            self.load_collection(
                Collection::ActivityLogs,
                self.client.list_activity_logs(),
                |s, v| {
                    s.activity_logs = v;
                    s.normalize_activity();
                },
            ),
        );

        info!("Data store loaded");
    }

    async fn load_collection<T>(
        &self,
        collection: Collection,
        fetch: impl Future<Output = Result<Vec<T>>>,
        apply: impl FnOnce(&mut Snapshot, Vec<T>),
    ) {
        let result = fetch.await;
        let mut state = self.state.write().await;
        match result {
            Ok(records) => {
                debug!("Loaded {} {}", records.len(), collection.label());
                apply(&mut state.snapshot, records);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", collection.label(), e);
                self.notifier
                    .failure("Could not load data", format!("Loading {} failed: {e}", collection.label()));
            }
        }
        state.load.set(collection, LoadState::Ready);
    }

    // Reads

    /// A copy of every collection.
    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.snapshot.clone()
    }

    /// Current products.
    pub async fn products(&self) -> Vec<Product> {
        self.state.read().await.snapshot.products.clone()
    }

    /// Current planting schedules.
    pub async fn schedules(&self) -> Vec<PlantingSchedule> {
        self.state.read().await.snapshot.schedules.clone()
    }

    /// Current price history, oldest month first.
    pub async fn price_history(&self) -> Vec<PriceSnapshot> {
        self.state.read().await.snapshot.price_history.clone()
    }

    /// Current activity log, newest first.
    pub async fn activity_logs(&self) -> Vec<ActivityLogEntry> {
        self.state.read().await.snapshot.activity_logs.clone()
    }

    /// True until every collection has resolved.
    pub async fn is_loading(&self) -> bool {
        !self.state.read().await.load.all_ready()
    }

    /// Load progress of one collection.
    pub async fn load_state(&self, collection: Collection) -> LoadState {
        self.state.read().await.load.get(collection)
    }

    /// The actor recorded on activity entries.
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }

    // Products

    /// Adds a product. Returns the stored record, or `None` after a failure
    /// notification.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_product(&self, draft: &ProductDraft) -> Option<Product> {
        match self.client.create_product(draft).await {
            Ok(product) => {
                self.state.write().await.snapshot.products.push(product.clone());
                self.notifier
                    .success("Product added", format!("Added {} to the inventory", product.name));
                self.record_activity(
                    ActivityAction::Add,
                    EntityKind::Product,
                    &product.name,
                    format!("Added product {}", product.name),
                )
                .await;
                Some(product)
            }
            Err(e) => {
                warn!("Adding product failed: {}", e);
                self.notifier.failure("Could not add product", e.to_string());
                None
            }
        }
    }

    /// Replaces a product with `product`.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn update_product(&self, product: &Product) -> Option<Product> {
        match self.client.update_product(product).await {
            Ok(updated) => {
                {
                    let mut state = self.state.write().await;
                    if let Some(slot) = state
                        .snapshot
                        .products
                        .iter_mut()
                        .find(|p| p.id == updated.id)
                    {
                        *slot = updated.clone();
                    }
                }
                self.notifier
                    .success("Product updated", format!("Updated {}", updated.name));
                self.record_activity(
                    ActivityAction::Update,
                    EntityKind::Product,
                    &updated.name,
                    format!("Updated product {}", updated.name),
                )
                .await;
                Some(updated)
            }
            Err(e) => {
                warn!("Updating product failed: {}", e);
                self.notifier.failure("Could not update product", e.to_string());
                None
            }
        }
    }

    /// Deletes a product by identity. Returns the number of rows the store
    /// removed (0 if it was already gone).
    ///
    /// The name for the activity entry comes from the local snapshot; a
    /// product that is not held locally is still deleted but not logged.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Option<u64> {
        let known = self
            .state
            .read()
            .await
            .snapshot
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned();

        match self.client.remove_product(id).await {
            Ok(changes) => {
                self.state
                    .write()
                    .await
                    .snapshot
                    .products
                    .retain(|p| p.id != id);
                let label = known.as_ref().map_or(id, |p| p.name.as_str());
                self.notifier
                    .success("Product deleted", format!("Removed {label} from the inventory"));
                if let Some(product) = known {
                    self.record_activity(
                        ActivityAction::Delete,
                        EntityKind::Product,
                        &product.name,
                        format!("Deleted product {}", product.name),
                    )
                    .await;
                }
                Some(changes)
            }
            Err(e) => {
                warn!("Deleting product failed: {}", e);
                self.notifier.failure("Could not delete product", e.to_string());
                None
            }
        }
    }

    // Schedules

    /// Adds a planting schedule.
    #[instrument(skip(self, draft), fields(crop = %draft.crop_name))]
    pub async fn add_schedule(&self, draft: &ScheduleDraft) -> Option<PlantingSchedule> {
        match self.client.create_schedule(draft).await {
            Ok(schedule) => {
                self.state.write().await.snapshot.schedules.push(schedule.clone());
                self.notifier.success(
                    "Schedule added",
                    format!("Added a planting schedule for {}", schedule.crop_name),
                );
                self.record_activity(
                    ActivityAction::Add,
                    EntityKind::Schedule,
                    &schedule.crop_name,
                    format!("Added planting schedule {}", schedule.crop_name),
                )
                .await;
                Some(schedule)
            }
            Err(e) => {
                warn!("Adding schedule failed: {}", e);
                self.notifier.failure("Could not add schedule", e.to_string());
                None
            }
        }
    }

    /// Replaces a planting schedule.
    #[instrument(skip(self, schedule), fields(id = %schedule.id))]
    pub async fn update_schedule(&self, schedule: &PlantingSchedule) -> Option<PlantingSchedule> {
        match self.client.update_schedule(schedule).await {
            Ok(updated) => {
                {
                    let mut state = self.state.write().await;
                    if let Some(slot) = state
                        .snapshot
                        .schedules
                        .iter_mut()
                        .find(|s| s.id == updated.id)
                    {
                        *slot = updated.clone();
                    }
                }
                self.notifier.success(
                    "Schedule updated",
                    format!("Updated the planting schedule for {}", updated.crop_name),
                );
                self.record_activity(
                    ActivityAction::Update,
                    EntityKind::Schedule,
                    &updated.crop_name,
                    format!("Updated planting schedule {}", updated.crop_name),
                )
                .await;
                Some(updated)
            }
            Err(e) => {
                warn!("Updating schedule failed: {}", e);
                self.notifier.failure("Could not update schedule", e.to_string());
                None
            }
        }
    }

    /// Deletes a planting schedule by identity.
    #[instrument(skip(self))]
    pub async fn delete_schedule(&self, id: &str) -> Option<u64> {
        let known = self
            .state
            .read()
            .await
            .snapshot
            .schedules
            .iter()
            .find(|s| s.id == id)
            .cloned();

        match self.client.remove_schedule(id).await {
            Ok(changes) => {
                self.state
                    .write()
                    .await
                    .snapshot
                    .schedules
                    .retain(|s| s.id != id);
                let label = known.as_ref().map_or(id, |s| s.crop_name.as_str());
                self.notifier.success(
                    "Schedule deleted",
                    format!("Removed the planting schedule for {label}"),
                );
                if let Some(schedule) = known {
                    self.record_activity(
                        ActivityAction::Delete,
                        EntityKind::Schedule,
                        &schedule.crop_name,
                        format!("Deleted planting schedule {}", schedule.crop_name),
                    )
                    .await;
                }
                Some(changes)
            }
            Err(e) => {
                warn!("Deleting schedule failed: {}", e);
                self.notifier.failure("Could not delete schedule", e.to_string());
                None
            }
        }
    }

    // Activity log

    /// Queues an activity append. The caller does not wait for it.
    async fn record_activity(
        &self,
        action: ActivityAction,
        entity_type: EntityKind,
        item_name: &str,
        details: String,
    ) {
        let draft = ActivityLogDraft {
            action,
            entity_type,
            item_name: item_name.to_string(),
            user: self.actor.clone(),
            timestamp: Utc::now(),
            details,
        };
        let client = self.client.clone();
        let state = Arc::clone(&self.state);

        let mut pending = self.pending_logs.lock().await;
        while pending.try_join_next().is_some() {}
        pending.spawn(async move {
            match client.create_activity_log(&draft).await {
                Ok(entry) => state.write().await.snapshot.push_activity(entry),
                Err(e) => warn!("Activity log append failed for {}: {}", draft.item_name, e),
            }
        });
    }

    /// Waits for every queued activity append to finish.
    pub async fn settle(&self) {
        let mut pending = self.pending_logs.lock().await;
        while let Some(result) = pending.join_next().await {
            if let Err(e) = result {
                warn!("Activity log task did not complete: {}", e);
            }
        }
    }
}
