pub mod error;
pub mod net;
pub mod sim;
pub mod topo;
pub mod wdm;

pub use error::{Result, SimError};

#[cfg(test)]
mod test;
