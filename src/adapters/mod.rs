// Adapters layer: concrete implementations for the domain ports. Everything
// here is intentionally thin; real infrastructure lives outside the desk.

pub mod local;
pub mod memory;
pub mod webhook;
