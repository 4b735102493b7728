pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::demo::DemoLookup;
pub use adapters::nspd::NspdClient;
pub use config::CliConfig;
pub use core::session::{DisplayMode, SessionController, SessionState};
pub use domain::model::{CadastralNumber, Coordinate, CostEstimate, ParcelRecord};
pub use domain::ports::{ConfigProvider, Notifier, ParcelLookup};
pub use domain::services::estimate;
pub use utils::error::{Result, SurveyError};
pub use utils::validation::is_valid_cadastral_number;
