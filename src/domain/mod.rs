// Domain layer: models and ports.

pub mod model;
pub mod ports;
