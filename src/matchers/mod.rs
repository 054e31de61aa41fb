pub mod aggregate;
pub mod body;
pub(crate) mod comparison;
pub mod resolution;
pub mod strategies;
pub mod strategy;
