// Library exports for taskpilot
// This allows the modules to be imported in tests and external code

pub mod config;
pub mod health;
pub mod listener;
pub mod llm;
pub mod planning;
