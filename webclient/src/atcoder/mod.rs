pub mod client;
pub mod urls;
mod helper;

pub use client::*;
pub use urls::*;
