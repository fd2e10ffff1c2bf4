pub mod controller;
pub mod dispatch;

pub use controller::{Applied, Controller, Operation};
pub use dispatch::Dispatcher;
