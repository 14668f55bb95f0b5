pub mod app_state;
pub mod config;
pub mod registry;
pub mod types;

pub use app_state::AppState;
