pub mod config;
pub mod configmap;
pub mod status;
pub mod validate;
