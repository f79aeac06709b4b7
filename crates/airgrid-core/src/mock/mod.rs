// ── Mock data layer ──
//
// Mirrors the remote gateway's method set over an injectable, seeded
// in-memory store with deterministic pseudo-latency. Construct a fresh
// `MockStore` per test; nothing here is process-global.

mod collection;
mod gateway;
mod latency;
mod seed;
mod store;

pub use gateway::MockGateway;
pub use latency::LatencyProfile;
pub use store::MockStore;
