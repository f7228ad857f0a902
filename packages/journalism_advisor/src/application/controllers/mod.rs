pub mod health_controller;
pub mod mcp_controller;
pub mod terminal_controller;
