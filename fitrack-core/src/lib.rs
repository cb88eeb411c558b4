pub mod db;
pub mod error;
pub mod locale;
pub mod logging;
pub mod reports;
pub mod seed;

pub use db::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use locale::Language;
