// Domain layer: core models and ports (interfaces). No transport or framework types here.

pub mod model;
pub mod ports;
