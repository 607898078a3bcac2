pub mod commands;
pub mod error;
pub mod flags;
pub mod highlight;
pub mod path;
pub mod session;
pub mod shell;
pub mod tokenize;
