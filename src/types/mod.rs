// Autoclick shared type definitions

pub mod errors;
pub mod message;
pub mod page;
pub mod rule;
pub mod settings;
