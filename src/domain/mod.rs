// Domain layer: plate/judgment models, fixed symbol tables and ports (interfaces).

pub mod model;
pub mod ports;
pub mod vocabulary;
