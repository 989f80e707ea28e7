//! Domain layer - Core business logic
//! 
//! This layer contains:
//! - Entities: Core business objects (Plugin, Command, Role)

pub mod entities;
