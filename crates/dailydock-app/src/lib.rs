// Application layer - wires domain and infrastructure into the daily run

pub mod application;
