pub mod helpers;
pub mod types;
pub mod visitor;
