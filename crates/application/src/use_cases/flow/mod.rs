mod serve_flow;

pub use serve_flow::ServeFlowUseCase;
