pub mod display;
pub mod instruction;
pub mod keypad;
pub mod processor;
pub mod ram;
pub mod registers;
pub mod rom;
pub mod timer;
