use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "YardTrack API",
        version = "0.1.0",
        description = r#"
# YardTrack Inventory API

Single-tenant inventory bookkeeping for construction equipment and materials:
item identity, location, quantity, lifecycle status, and maintenance schedule.

## Lifecycle

Items move between `available`, `checked_out`, `maintenance`, and `retired`
only through the dedicated lifecycle endpoints. Illegal transitions are
rejected with `400` and leave the stored record unchanged. `retired` is
terminal.

## Alerts

Maintenance alerts are computed on read against the configured lookahead
window (`maintenance_alert_days`, default 7); nothing is stored or pushed.

## Error Handling

Errors use a consistent JSON body with appropriate HTTP status codes:

```json
{
  "error": "Bad Request",
  "message": "Invalid transition: cannot check out item while status is checked_out",
  "timestamp": "2026-03-01T00:00:00Z"
}
```
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    paths(
        crate::handlers::items::list_items,
        crate::handlers::items::create_item,
        crate::handlers::items::get_item,
        crate::handlers::items::update_item,
        crate::handlers::items::delete_item,
        crate::handlers::items::check_out_item,
        crate::handlers::items::check_in_item,
        crate::handlers::items::schedule_maintenance,
        crate::handlers::items::complete_maintenance,
        crate::handlers::items::retire_item,
        crate::handlers::summary::get_summary,
        crate::handlers::summary::get_map_items,
        crate::handlers::summary::list_categories,
        crate::handlers::summary::list_locations,
    ),
    components(schemas(
        crate::entities::inventory_item::Model,
        crate::entities::inventory_item::ItemStatus,
        crate::services::items::NewItem,
        crate::services::items::ItemPatch,
        crate::services::summary::Summary,
        crate::services::summary::MapMarker,
        crate::handlers::items::ScheduleMaintenanceRequest,
        crate::errors::ErrorResponse,
    )),
    tags(
        (name = "items", description = "Item CRUD and lifecycle operations"),
        (name = "summary", description = "Dashboard summary, map markers, and autocomplete lookups")
    )
)]
pub struct ApiDoc;

/// Mounts Swagger UI at /docs backed by the generated OpenAPI document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
