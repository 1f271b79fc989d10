//! Table schema, column definitions, and record storage.

mod column;
mod query;
mod record;
#[allow(clippy::module_inception)]
mod table;
pub(crate) mod validation;

pub use column::Column;
pub use query::Filter;
pub use record::Record;
pub use table::Table;
