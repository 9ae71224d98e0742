pub mod grammar;
pub mod parser;
pub mod production;
pub mod terminal;
pub mod variable;
