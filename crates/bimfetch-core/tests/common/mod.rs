#![allow(dead_code)]

pub mod loaders;
pub mod model_server;
