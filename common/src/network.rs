pub mod family;
pub mod host;
pub mod knock;
