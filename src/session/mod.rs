pub mod lifecycle;

pub use lifecycle::{App, AppEvent, GameSummary, MenuItem, Screen};
