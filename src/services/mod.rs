pub mod items;
pub mod summary;
