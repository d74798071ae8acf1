pub mod batch;
pub mod config;
pub mod mask;
pub mod sam2;
pub mod settings;
