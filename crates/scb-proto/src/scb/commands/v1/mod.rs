mod common;
mod core;
mod settings;

pub mod core_service_client;
pub mod settings_service_client;

pub use self::common::*;
pub use self::core::*;
pub use self::settings::*;
