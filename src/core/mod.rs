pub mod actor;
pub mod dialogue;
pub mod line;
pub mod network;
pub mod resources;
pub mod script;
