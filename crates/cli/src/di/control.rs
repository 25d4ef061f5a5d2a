use netoverride_application::use_cases::ProxyControlUseCase;
use netoverride_domain::Config;
use netoverride_infrastructure::control::FileResolverControl;
use std::sync::Arc;

pub fn control_use_case(config: &Config) -> ProxyControlUseCase {
    let control = Arc::new(FileResolverControl::new(&config.control.state_path));
    ProxyControlUseCase::new(control)
}
