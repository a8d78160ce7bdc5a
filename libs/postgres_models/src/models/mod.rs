pub mod locations;
pub mod measurements;
