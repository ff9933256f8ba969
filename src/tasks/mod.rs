//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: drains due cache deadlines at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
