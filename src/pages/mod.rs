pub mod calendar;
pub mod goals;
pub mod settings;
