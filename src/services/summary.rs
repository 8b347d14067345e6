use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::alerts;
use crate::entities::inventory_item::{self, Entity as InventoryItems, ItemStatus};
use crate::entities::{category, location};
use crate::errors::ServiceError;

/// Dashboard payload: counts per status plus the maintenance-alert list.
#[derive(Debug, Serialize, ToSchema)]
pub struct Summary {
    pub counts_by_status: BTreeMap<ItemStatus, u64>,
    pub maintenance_alerts: Vec<inventory_item::Model>,
}

/// Marker record consumed by the external map renderer.
#[derive(Debug, Serialize, ToSchema)]
pub struct MapMarker {
    pub id: Uuid,
    pub name: String,
    pub gps_lat: f64,
    pub gps_lng: f64,
}

/// Read-only facade over the item table for dashboard and map consumers.
#[derive(Clone)]
pub struct SummaryService {
    db: Arc<DatabaseConnection>,
}

impl SummaryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Computes the dashboard summary over a single table snapshot so counts
    /// and the alert list always agree.
    #[instrument(skip(self))]
    pub async fn summary(
        &self,
        now: DateTime<Utc>,
        alert_window: Duration,
    ) -> Result<Summary, ServiceError> {
        let items = InventoryItems::find()
            .order_by_asc(inventory_item::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(Summary {
            counts_by_status: alerts::status_counts(&items),
            maintenance_alerts: alerts::maintenance_alerts(&items, now, alert_window),
        })
    }

    /// Items carrying a complete coordinate pair, projected to map markers.
    #[instrument(skip(self))]
    pub async fn items_with_coordinates(&self) -> Result<Vec<MapMarker>, ServiceError> {
        let items = InventoryItems::find()
            .order_by_asc(inventory_item::Column::Id)
            .all(self.db.as_ref())
            .await?;

        let markers = items
            .into_iter()
            .filter_map(|item| match (item.gps_lat, item.gps_lng) {
                (Some(lat), Some(lng)) => Some(MapMarker {
                    id: item.id,
                    name: item.name,
                    gps_lat: lat,
                    gps_lng: lng,
                }),
                _ => None,
            })
            .collect();

        Ok(markers)
    }

    /// Distinct category names for UI autocomplete.
    #[instrument(skip(self))]
    pub async fn category_names(&self) -> Result<Vec<String>, ServiceError> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(|r| r.name).collect())
    }

    /// Distinct location names for UI autocomplete.
    #[instrument(skip(self))]
    pub async fn location_names(&self) -> Result<Vec<String>, ServiceError> {
        let rows = location::Entity::find()
            .order_by_asc(location::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(|r| r.name).collect())
    }
}
