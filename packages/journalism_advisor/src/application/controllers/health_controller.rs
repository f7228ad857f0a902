//! Health check endpoints for the HTTP surface.

use axum::response::Json;

/// Health check endpoint
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "journalism_advisor",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Root endpoint - provides server information
pub async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Journalism AI Advisor",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Decision-tree advisor recommending AI tools and prompts for journalism tasks, over MCP",
        "endpoints": {
            "mcp": "/mcp",
            "health": "/health"
        },
        "session_isolation": true
    }))
}
