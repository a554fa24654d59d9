pub mod absence;
pub mod elo;
