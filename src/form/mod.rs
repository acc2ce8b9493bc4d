//! Form module - classification, autofill and the per-category field stores.

pub mod autofill;
pub mod classify;
pub mod handlers;
pub mod store;

pub use autofill::{autofill, Term};
pub use classify::{classify, CategoryPartition};
pub use store::{FormSnapshot, FormStore};
