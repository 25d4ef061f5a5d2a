pub mod control;
pub mod dns;
pub mod flow;
pub mod lifecycle;

// Re-export use cases
pub use control::ProxyControlUseCase;
pub use dns::{HandleDnsQueryUseCase, QueryOutcome};
pub use flow::ServeFlowUseCase;
pub use lifecycle::ProxyLifecycle;
