pub mod errors;
pub mod menus;
pub mod model;
pub mod tabular;

pub use errors::{ParserError, RowFailure};
pub use menus::read_menu_export;
pub use model::{CheckRow, MenuRecord, OrderRow, TimeEntryRow};
pub use tabular::{read_check_rows, read_order_rows, read_time_entries, RowSet};

#[cfg(test)]
mod tests;
