pub mod connection;
pub mod constants;
pub mod decode;
pub mod selection;
pub mod session;
pub mod stack;
pub mod types;
