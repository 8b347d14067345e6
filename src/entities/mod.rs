pub mod category;
pub mod inventory_item;
pub mod location;

pub use inventory_item::ItemStatus;
