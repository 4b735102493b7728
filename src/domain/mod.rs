// Domain layer: models, ports and the pricing service. No I/O here.

pub mod model;
pub mod ports;
pub mod services;
