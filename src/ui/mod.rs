pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{confirm, dim, error, header, info, muted, record, success, warn};
pub use table::{records_table, stats_table};
pub use theme::{theme, Theme};
