pub mod columns;
pub mod config;
pub mod error;
pub mod season;
pub mod table;

pub use error::{EcoError, Result};
pub use season::Season;
pub use table::Table;
