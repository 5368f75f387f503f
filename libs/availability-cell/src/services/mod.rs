pub mod availability;
pub mod doctor;
pub mod selector;
