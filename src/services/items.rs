use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::inventory_item::{self, Entity as InventoryItems, ItemStatus};
use crate::entities::{category, location};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// Fields accepted when creating an item. Identity, timestamps, and status
/// are assigned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewItem {
    /// Trimmed on write; must be 1 to 120 characters after trimming
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Defaults to 1 when omitted
    #[validate(range(min = 0))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub location: Option<String>,
    pub gps_lat: Option<f64>,
    pub gps_lng: Option<f64>,
    pub maintenance_due: Option<NaiveDate>,
    pub maintenance_notes: Option<String>,
}

fn default_quantity() -> i32 {
    1
}

/// Partial update. Outer `Option` distinguishes "field absent" from "set to
/// null" for nullable columns; `status` is deliberately not here — lifecycle
/// state only moves through the dedicated operations.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ItemPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    pub quantity: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub gps_lat: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub gps_lng: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub maintenance_due: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub maintenance_notes: Option<Option<String>>,
}

/// Maps a present-but-null JSON value to `Some(None)` and an absent field to
/// `None` (via `#[serde(default)]`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Optional predicates for `list`; results are always ordered by id ascending.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ItemFilter {
    pub status: Option<ItemStatus>,
    pub category: Option<String>,
    pub has_coordinates: Option<bool>,
}

/// Record Store and Lifecycle Operations over `inventory_items`.
///
/// Every mutation runs in one transaction: the row is read, validated
/// against the requested change, and written back together with a refreshed
/// `updated_at`. Rejected operations leave the row untouched.
#[derive(Clone)]
pub struct ItemService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl ItemService {
    /// Creates a new item service instance
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Creates a new item with a generated id, `available` status, and
    /// `created_at == updated_at`.
    #[instrument(skip(self))]
    pub async fn create(&self, new_item: NewItem) -> Result<inventory_item::Model, ServiceError> {
        new_item.validate()?;
        validate_coordinate_pair(new_item.gps_lat, new_item.gps_lng)?;
        let name = normalize_name(&new_item.name)?;

        let now = Utc::now();
        let model = inventory_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(new_item.description.clone()),
            category: Set(new_item.category.clone()),
            quantity: Set(new_item.quantity),
            location: Set(new_item.location.clone()),
            gps_lat: Set(new_item.gps_lat),
            gps_lng: Set(new_item.gps_lng),
            status: Set(ItemStatus::Available),
            last_checked_in: Set(None),
            last_checked_out: Set(None),
            maintenance_due: Set(new_item.maintenance_due),
            maintenance_notes: Set(new_item.maintenance_notes.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(self.db.as_ref()).await?;
        self.record_lookups(created.category.as_deref(), created.location.as_deref())
            .await;

        info!(item_id = %created.id, "Item created");
        self.emit(Event::ItemCreated(created.id)).await;
        Ok(created)
    }

    /// Gets an item by id
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<inventory_item::Model, ServiceError> {
        InventoryItems::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item with ID {} not found", id)))
    }

    /// Applies a validated partial update and refreshes `updated_at`.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: Uuid,
        patch: ItemPatch,
    ) -> Result<inventory_item::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = fetch_for_update(&txn, id).await?;

        let mut lat = existing.gps_lat;
        let mut lng = existing.gps_lng;
        if let Some(v) = patch.gps_lat {
            lat = v;
        }
        if let Some(v) = patch.gps_lng {
            lng = v;
        }
        validate_coordinate_pair(lat, lng)?;

        let mut active: inventory_item::ActiveModel = existing.into();

        if let Some(name) = patch.name {
            active.name = Set(normalize_name(&name)?);
        }
        if let Some(quantity) = patch.quantity {
            if quantity < 0 {
                return Err(ServiceError::ValidationError(
                    "quantity must not be negative".to_string(),
                ));
            }
            active.quantity = Set(quantity);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(location) = patch.location {
            active.location = Set(location);
        }
        if let Some(v) = patch.gps_lat {
            active.gps_lat = Set(v);
        }
        if let Some(v) = patch.gps_lng {
            active.gps_lng = Set(v);
        }
        if let Some(due) = patch.maintenance_due {
            active.maintenance_due = Set(due);
        }
        if let Some(notes) = patch.maintenance_notes {
            active.maintenance_notes = Set(notes);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        self.record_lookups(updated.category.as_deref(), updated.location.as_deref())
            .await;
        self.emit(Event::ItemUpdated(updated.id)).await;
        Ok(updated)
    }

    /// Hard-deletes an item. Repeated deletes of the same id keep failing
    /// with `NotFound` (idempotent absence, not idempotent success).
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = InventoryItems::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Item with ID {} not found",
                id
            )));
        }

        info!(item_id = %id, "Item deleted");
        self.emit(Event::ItemDeleted(id)).await;
        Ok(())
    }

    /// Lists items matching the filter, ordered by id ascending.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: ItemFilter,
    ) -> Result<Vec<inventory_item::Model>, ServiceError> {
        let mut query = InventoryItems::find();

        if let Some(status) = filter.status {
            query = query.filter(inventory_item::Column::Status.eq(status));
        }
        if let Some(category) = filter.category {
            query = query.filter(inventory_item::Column::Category.eq(category));
        }
        match filter.has_coordinates {
            Some(true) => {
                query = query
                    .filter(inventory_item::Column::GpsLat.is_not_null())
                    .filter(inventory_item::Column::GpsLng.is_not_null());
            }
            Some(false) => {
                query = query.filter(
                    sea_orm::Condition::any()
                        .add(inventory_item::Column::GpsLat.is_null())
                        .add(inventory_item::Column::GpsLng.is_null()),
                );
            }
            None => {}
        }

        let items = query
            .order_by_asc(inventory_item::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(items)
    }

    /// available -> checked_out, stamping `last_checked_out`.
    #[instrument(skip(self))]
    pub async fn check_out(&self, id: Uuid) -> Result<inventory_item::Model, ServiceError> {
        let updated = self
            .transition(id, |item, active, now| {
                require_status(item, &[ItemStatus::Available], "check out")?;
                active.status = Set(ItemStatus::CheckedOut);
                active.last_checked_out = Set(Some(now));
                Ok(())
            })
            .await?;
        self.emit(Event::ItemCheckedOut(id)).await;
        Ok(updated)
    }

    /// checked_out -> available, stamping `last_checked_in`.
    #[instrument(skip(self))]
    pub async fn check_in(&self, id: Uuid) -> Result<inventory_item::Model, ServiceError> {
        let updated = self
            .transition(id, |item, active, now| {
                require_status(item, &[ItemStatus::CheckedOut], "check in")?;
                active.status = Set(ItemStatus::Available);
                active.last_checked_in = Set(Some(now));
                Ok(())
            })
            .await?;
        self.emit(Event::ItemCheckedIn(id)).await;
        Ok(updated)
    }

    /// available/checked_out -> maintenance. Always moves status; the
    /// transition is explicit rather than inferred from the due date.
    #[instrument(skip(self))]
    pub async fn schedule_maintenance(
        &self,
        id: Uuid,
        due: NaiveDate,
        notes: Option<String>,
    ) -> Result<inventory_item::Model, ServiceError> {
        let updated = self
            .transition(id, move |item, active, _now| {
                require_status(
                    item,
                    &[ItemStatus::Available, ItemStatus::CheckedOut],
                    "schedule maintenance",
                )?;
                active.status = Set(ItemStatus::Maintenance);
                active.maintenance_due = Set(Some(due));
                active.maintenance_notes = Set(notes);
                Ok(())
            })
            .await?;
        self.emit(Event::MaintenanceScheduled { item_id: id, due })
            .await;
        Ok(updated)
    }

    /// maintenance -> available; clears the due date, retains the notes as
    /// the record of the last service.
    #[instrument(skip(self))]
    pub async fn complete_maintenance(
        &self,
        id: Uuid,
    ) -> Result<inventory_item::Model, ServiceError> {
        let updated = self
            .transition(id, |item, active, _now| {
                require_status(item, &[ItemStatus::Maintenance], "complete maintenance")?;
                active.status = Set(ItemStatus::Available);
                active.maintenance_due = Set(None);
                Ok(())
            })
            .await?;
        self.emit(Event::MaintenanceCompleted(id)).await;
        Ok(updated)
    }

    /// any non-retired -> retired. Terminal: there is no reactivate.
    #[instrument(skip(self))]
    pub async fn retire(&self, id: Uuid) -> Result<inventory_item::Model, ServiceError> {
        let updated = self
            .transition(id, |item, active, _now| {
                if item.status == ItemStatus::Retired {
                    return Err(ServiceError::InvalidTransition(format!(
                        "cannot retire item {}: already retired",
                        item.id
                    )));
                }
                active.status = Set(ItemStatus::Retired);
                Ok(())
            })
            .await?;
        self.emit(Event::ItemRetired(id)).await;
        Ok(updated)
    }

    /// Shared read-validate-write cycle for lifecycle operations. The closure
    /// rejects illegal transitions before anything is written; commit happens
    /// only on success, so a failed call leaves the row unchanged.
    async fn transition<F>(
        &self,
        id: Uuid,
        apply: F,
    ) -> Result<inventory_item::Model, ServiceError>
    where
        F: FnOnce(
            &inventory_item::Model,
            &mut inventory_item::ActiveModel,
            DateTime<Utc>,
        ) -> Result<(), ServiceError>,
    {
        let txn = self.db.begin().await?;
        let existing = fetch_for_update(&txn, id).await?;

        let now = Utc::now();
        let mut active: inventory_item::ActiveModel = existing.clone().into();
        apply(&existing, &mut active, now)?;
        active.updated_at = Set(now);

        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Best-effort upsert into the autocomplete lookup tables. Failures are
    /// logged, never surfaced: the item write has already committed.
    async fn record_lookups(&self, category_name: Option<&str>, location_name: Option<&str>) {
        if let Some(name) = category_name.map(str::trim).filter(|n| !n.is_empty()) {
            let insert = category::Entity::insert(category::ActiveModel {
                name: Set(name.to_string()),
                ..Default::default()
            })
            .on_conflict(
                OnConflict::column(category::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await;
            if let Err(e) = insert {
                warn!(error = %e, name, "Failed to record category lookup");
            }
        }

        if let Some(name) = location_name.map(str::trim).filter(|n| !n.is_empty()) {
            let insert = location::Entity::insert(location::ActiveModel {
                name: Set(name.to_string()),
                ..Default::default()
            })
            .on_conflict(
                OnConflict::column(location::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await;
            if let Err(e) = insert {
                warn!(error = %e, name, "Failed to record location lookup");
            }
        }
    }

    /// Events are observational; a full channel must not fail a committed
    /// mutation.
    async fn emit(&self, event: Event) {
        if let Err(e) = self.event_sender.send(event).await {
            warn!(error = %e, "Failed to emit event");
        }
    }
}

async fn fetch_for_update(
    txn: &DatabaseTransaction,
    id: Uuid,
) -> Result<inventory_item::Model, ServiceError> {
    InventoryItems::find_by_id(id)
        .one(txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item with ID {} not found", id)))
}

fn require_status(
    item: &inventory_item::Model,
    allowed: &[ItemStatus],
    operation: &str,
) -> Result<(), ServiceError> {
    if allowed.contains(&item.status) {
        Ok(())
    } else {
        Err(ServiceError::InvalidTransition(format!(
            "cannot {} item {} while status is {}",
            operation, item.id, item.status
        )))
    }
}

/// Trims surrounding whitespace and enforces the stored length bound, so a
/// blank or whitespace-only name never reaches the table. Length counts
/// characters, not bytes; create and update share this check.
fn normalize_name(raw: &str) -> Result<String, ServiceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().count() > 120 {
        return Err(ServiceError::ValidationError(
            "name must be between 1 and 120 characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_coordinate_pair(lat: Option<f64>, lng: Option<f64>) -> Result<(), ServiceError> {
    match (lat, lng) {
        (Some(_), None) | (None, Some(_)) => Err(ServiceError::ValidationError(
            "gps_lat and gps_lng must be provided together".to_string(),
        )),
        _ => Ok(()),
    }
}
