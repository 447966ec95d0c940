pub mod observation;
pub mod station;
