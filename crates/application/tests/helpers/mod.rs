pub mod mock_ports;
pub mod queries;

pub use mock_ports::*;
pub use queries::*;
