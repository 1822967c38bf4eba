pub mod traits;
pub mod evolution;
pub mod evaluation;
pub mod catalog;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use evaluation::{EvalConfig, EvalConfigKey};
pub use catalog::CatalogConfig;
pub use traits::ConfigSection;
