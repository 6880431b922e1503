pub mod transform_controller;
pub mod transform_error;
pub mod transform_service;
pub mod transformation_type;
