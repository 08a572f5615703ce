pub mod calendar;
pub mod commands;
pub mod render;
