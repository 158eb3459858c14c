pub mod socket;
pub mod timer;
