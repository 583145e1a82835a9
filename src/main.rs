#![allow(warnings)]
//! Taller UI Frontend Entry Point

mod config;
mod logger;
mod error;
mod models;
mod dom;
mod scheduler;
mod storage;
mod cookies;
mod client;
mod fetch;
mod commands;
mod notify;
mod coordinator;
mod active_repair;
mod theme;
mod progress;
mod components;
mod app;

#[cfg(test)]
mod testing;

fn main() {
    console_error_panic_hook::set_once();
    app::start();
}
