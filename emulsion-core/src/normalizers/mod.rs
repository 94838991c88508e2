//! Generic handlers for the field model.

mod field_item;
mod field_item_list;

pub use field_item::FieldItemNormalizer;
pub use field_item_list::FieldItemListNormalizer;
