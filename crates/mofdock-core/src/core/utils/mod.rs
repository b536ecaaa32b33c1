pub mod geometry;
pub mod hull;
pub mod optimize;
