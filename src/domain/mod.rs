// Domain layer: passenger model and the ports (interfaces) around it.

pub mod model;
pub mod ports;
