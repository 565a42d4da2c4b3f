pub mod academics;
pub mod fees;
pub mod people;
