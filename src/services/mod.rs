pub mod error;
pub mod kick;
pub mod search;
pub mod youtube;
