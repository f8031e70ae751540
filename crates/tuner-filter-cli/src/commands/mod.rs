pub mod build;
pub mod describe;
pub mod lint;
