// Domain layer: records and the ports the repositories and binaries talk through.

pub mod model;
pub mod ports;
