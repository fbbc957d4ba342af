//! A desktop viewer that loads a CSV dataset, shows it as a paginated table
//! and narrows the rows by exact column value picked from dropdowns.

pub mod app;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
