// src/lib.rs

//! Wasserportal station publisher library

pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
