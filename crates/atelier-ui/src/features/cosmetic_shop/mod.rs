//! Cosmetic shop item editor.
//!
//! # Design
//! - The form keeps the raw request DTO and validates it only on submit.
//! - The picker is a listing controller over cosmetics whose search text is
//!   the query filter; the selected cosmetic stays in the option list even
//!   when the current search page does not contain it.

pub mod form;
pub mod picker;

pub use form::ShopItemForm;
pub use picker::{CosmeticOption, CosmeticPicker, picker_options};
