pub mod calculator;
pub mod offers;
