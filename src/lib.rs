pub mod error;
pub mod file;
pub mod gui;
pub mod math;
pub mod model;
