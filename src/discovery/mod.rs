pub mod controller;
pub mod simulator;

pub use controller::DiscoveryController;
