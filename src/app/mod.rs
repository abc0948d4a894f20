// Application layer: wiring config, loading and presentation together.

pub mod presenter;
pub mod session;
pub mod wiki;
