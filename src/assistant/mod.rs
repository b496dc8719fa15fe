pub mod prompt;
pub mod registry;
pub mod transport;
pub mod transports;
pub mod types;
