//! Filesystem helpers shared by the deployment steps.

pub mod fs;
pub mod lookup;
