//! `Tasklist`: single-user task list editor library.

pub mod app;
pub mod config;
pub mod storage;
pub mod tasks;
pub mod ui;
