pub mod config;
pub mod constructor;
pub mod dump;
pub mod error;
pub mod image;
pub mod msg;

pub use constructor::generate_bytes;
pub use error::Error;
pub use image::{Header, Image};
