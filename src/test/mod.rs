mod batch;
mod config;
mod routing;
mod simulator;
mod traffic;
