pub mod cli;
pub mod interactive;
pub mod page;
pub mod web;
