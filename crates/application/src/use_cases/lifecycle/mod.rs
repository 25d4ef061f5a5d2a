mod proxy_lifecycle;

pub use proxy_lifecycle::ProxyLifecycle;
