// Front-end for the pick'em pool: command-line interface and the terminal
// standings dashboard.

pub mod cli;
pub mod commands;
pub mod report;
pub mod tui;
