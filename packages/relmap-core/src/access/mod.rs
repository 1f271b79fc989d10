//! Generic table access layer.
//!
//! Column-keyed CRUD, query, count, and delete primitives over one table,
//! plus the predicate builders they consume.

mod column_values;
mod result_set;
mod row;
mod table_dao;
mod where_clause;

pub use column_values::ColumnValues;
pub use result_set::{ResultSet, ResultSetIter};
pub use row::Row;
pub use table_dao::TableDao;
pub use where_clause::WhereClause;
