mod appointment;
mod choice;
mod doctor;
mod patient;

pub use appointment::*;
pub use choice::*;
pub use doctor::*;
pub use patient::*;
