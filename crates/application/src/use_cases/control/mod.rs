mod proxy_control;

pub use proxy_control::ProxyControlUseCase;
