pub mod app_module;
pub mod app_router;
pub mod config;
pub mod transform;
