pub mod absence;
pub mod decay;
pub mod scoring;
