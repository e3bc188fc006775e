pub mod animate;
pub mod sample;
