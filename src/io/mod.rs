pub mod autosave;
pub mod config_io;
pub mod document_io;
pub mod logging;

pub use autosave::{AutosaveEvent, Autosaver, SharedDocument};
pub use config_io::{ConfigError, read_config};
pub use document_io::{DocumentError, load_document, save_document};
