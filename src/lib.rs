pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod input;
pub mod key;
pub mod merge;
pub mod partition;
pub mod scanner;
pub mod swar;
pub mod table;
pub mod temperature;

pub use config::Config;
pub use engine::{aggregate, scan_section, summarize, summarize_file};
pub use error::{Error, ParseErrorKind, Result};
pub use format::Summary;
pub use input::Input;
pub use key::{KeyHasher, NameKey};
pub use temperature::Temperature;
