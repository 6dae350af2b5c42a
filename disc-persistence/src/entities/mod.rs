pub mod collections;
pub mod prelude;
