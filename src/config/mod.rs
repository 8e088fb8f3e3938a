pub mod desk_config;

pub use desk_config::DeskConfig;
