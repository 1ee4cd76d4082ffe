pub mod trip;
pub mod views;
pub mod year;
