pub mod configuration;
pub mod controller;
pub mod error_handling;
pub mod storage;
pub mod web_interface;

pub use controller::Controller;
pub use storage::{FileStorage, TimeRecord, TimeStorage};
