// Domain layer: favorites models and the ports the screen consumes.

pub mod model;
pub mod ports;
