pub mod add_item;
pub mod budget;
