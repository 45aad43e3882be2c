pub mod network;
pub mod resolver;
pub mod sequencer;

pub use resolver::resolve;
pub use sequencer::{Knocker, SocketKnocker, run, run_with};
