pub mod ids;
pub mod point;
pub mod timestamp;
