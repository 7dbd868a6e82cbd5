//! Business logic services for the Smart Irrigation System

pub mod predictor;
pub mod simulator;
pub mod trainer;

pub use predictor::PredictionContext;
pub use simulator::SimulatorService;
pub use trainer::TrainerService;
