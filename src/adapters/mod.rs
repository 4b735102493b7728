// Adapters layer: concrete implementations of the lookup port.

pub mod demo;
pub mod nspd;
