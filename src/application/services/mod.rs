//! Application services - Reply policies and connection lifecycle

pub mod command_service;
pub mod gateway_service;
pub mod message_service;

pub use command_service::CommandService;
pub use gateway_service::run_gateway;
pub use message_service::MessageService;
