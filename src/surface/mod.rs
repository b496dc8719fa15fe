pub mod snapshot;
pub mod traits;
pub mod tree;
pub mod types;
