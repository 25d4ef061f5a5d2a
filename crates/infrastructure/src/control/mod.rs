pub mod file_resolver_control;

pub use file_resolver_control::FileResolverControl;
