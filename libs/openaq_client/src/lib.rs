pub mod client;
pub mod error;
pub mod models;


pub use client::OpenAqClient;
pub use error::{OpenAqClientResult, OpenAqError};
