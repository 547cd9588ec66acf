pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use config::AppConfig;
pub use error::AuraError;
pub use result::AuraResult;
pub use traits::{CsvSource, FileSource, TextSource};
