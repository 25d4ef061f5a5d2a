mod control;
mod proxy;

pub use control::control_use_case;
pub use proxy::ProxyServices;
