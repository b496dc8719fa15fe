pub mod parser;
pub mod resolver;
pub mod types;
