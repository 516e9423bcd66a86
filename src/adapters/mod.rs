// Adapters layer: concrete notification gateways.

pub mod http_gateway;
pub mod log_gateway;

pub use http_gateway::HttpNotificationGateway;
pub use log_gateway::LogNotificationGateway;
