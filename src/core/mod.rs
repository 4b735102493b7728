pub mod session;

pub use crate::domain::model::{CadastralNumber, Coordinate, CostEstimate, ParcelRecord};
pub use crate::domain::ports::{ConfigProvider, Notifier, ParcelLookup};
pub use crate::utils::error::Result;
