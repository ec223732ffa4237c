pub mod batch;
pub mod config;
pub mod error;
pub mod mesh;
pub mod sched;
pub mod sim;
pub mod topo;
pub mod trace;
pub mod traffic;

#[cfg(test)]
mod test;
