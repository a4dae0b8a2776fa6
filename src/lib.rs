// src/lib.rs
#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod error;

pub mod walker;
pub mod resolver;
pub mod aggregator;
pub mod emitter;
pub mod synth;

pub mod commands;
