pub mod core;
pub mod scraping;
pub mod search;

// --- Primary core exports ---
pub use crate::core::types;
pub use crate::core::types::*;
pub use crate::core::AppState;
pub use scraping::{FetchError, PageScraper};
