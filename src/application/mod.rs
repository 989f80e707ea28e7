//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Plugin management and command dispatch gating
//! - Errors: Domain-specific errors

pub mod errors;
pub mod services;
