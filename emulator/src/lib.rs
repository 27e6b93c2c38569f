pub mod debugger;
pub mod programs;
pub mod system;
pub mod terminal;
