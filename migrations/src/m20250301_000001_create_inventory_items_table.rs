use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InventoryItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InventoryItems::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::Name)
                            .string_len(120)
                            .not_null(),
                    )
                    .col(ColumnDef::new(InventoryItems::Description).text().null())
                    .col(ColumnDef::new(InventoryItems::Category).string().null())
                    .col(
                        ColumnDef::new(InventoryItems::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(InventoryItems::Location).string().null())
                    .col(ColumnDef::new(InventoryItems::GpsLat).double().null())
                    .col(ColumnDef::new(InventoryItems::GpsLng).double().null())
                    .col(
                        ColumnDef::new(InventoryItems::Status)
                            .string_len(32)
                            .not_null()
                            .default("available"),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::LastCheckedIn)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::LastCheckedOut)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(InventoryItems::MaintenanceDue).date().null())
                    .col(
                        ColumnDef::new(InventoryItems::MaintenanceNotes)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Dashboard queries filter on status; maintenance alerts scan by due date.
        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_items_status")
                    .table(InventoryItems::Table)
                    .col(InventoryItems::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_items_maintenance_due")
                    .table(InventoryItems::Table)
                    .col(InventoryItems::MaintenanceDue)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum InventoryItems {
    Table,
    Id,
    Name,
    Description,
    Category,
    Quantity,
    Location,
    GpsLat,
    GpsLng,
    Status,
    LastCheckedIn,
    LastCheckedOut,
    MaintenanceDue,
    MaintenanceNotes,
    CreatedAt,
    UpdatedAt,
}
