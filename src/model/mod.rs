pub mod config;
pub mod document;
pub mod history;
pub mod line;
pub mod task;

pub use config::*;
pub use document::*;
pub use history::*;
pub use line::*;
pub use task::*;
