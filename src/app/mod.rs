//! Application core: port traits, the command interpreter, and the
//! monitor service that runs the control-loop phases.

pub mod commands;
pub mod ports;
pub mod service;
