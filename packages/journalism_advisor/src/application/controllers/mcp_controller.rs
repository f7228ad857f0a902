use crate::domain::services::{AdvisorSession, DecisionTree, ProgressEstimator, ToolCatalog};
use random_source::ThreadRandom;
use rmcp::{handler::server::tool::ToolRouter, handler::server::wrapper::Parameters, model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo}, schemars::JsonSchema, tool, tool_handler, tool_router, ServerHandler};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectOptionRequest {
    /// Exact text of one of the options offered by the current question
    pub option_text: String,
}

/// AdvisorServer exposes the journalism tool questionnaire as MCP tools.
///
/// A model client walks the decision tree on behalf of its user: it reads the
/// current question, answers it with one of the offered options and finally
/// reads back the recommended tools and prompts.
///
/// Each server instance owns one [`AdvisorSession`], so every MCP session
/// (one `mcp-session-id` in HTTP mode) navigates independently. The decision
/// tree and the tool catalog are loaded once at start-up and shared; the
/// session itself is only created when the first tool call arrives.
pub struct AdvisorServer {
    tree: Arc<DecisionTree>,
    catalog: Arc<ToolCatalog>,
    progress: ProgressEstimator,
    /// Lazy-initialized navigation session
    session: OnceCell<Arc<Mutex<AdvisorSession>>>,
    /// MCP tool router for handling method dispatch
    tool_router: ToolRouter<AdvisorServer>,
}

impl AdvisorServer {
    /// Creates a server over an already validated tree and catalog.
    ///
    /// # Example
    /// ```rust,no_run
    /// use journalism_advisor::application::controllers::mcp_controller::AdvisorServer;
    /// use journalism_advisor::services::{DecisionTree, ProgressEstimator, ToolCatalog};
    /// use std::sync::Arc;
    ///
    /// let server = AdvisorServer::new(
    ///     Arc::new(DecisionTree::builtin().unwrap()),
    ///     Arc::new(ToolCatalog::builtin().unwrap()),
    ///     ProgressEstimator::default(),
    /// );
    /// ```
    pub fn new(tree: Arc<DecisionTree>, catalog: Arc<ToolCatalog>, progress: ProgressEstimator) -> AdvisorServer {
        AdvisorServer {
            tree,
            catalog,
            progress,
            session: OnceCell::new(),
            tool_router: Self::tool_router(),
        }
    }

    async fn get_session(&self) -> &Arc<Mutex<AdvisorSession>> {
        self.session
            .get_or_init(|| async {
                let session = AdvisorSession::new(self.tree.clone(), self.catalog.clone(), self.progress);
                Arc::new(Mutex::new(session))
            })
            .await
    }
}

#[tool_router]
impl AdvisorServer {
    /// MCP Tool: Shows the question the user is currently answering.
    ///
    /// # Returns
    /// - Asking: progress, question, previous answers and the numbered options
    /// - Recommending: the recommended tools with prompts and tips
    /// - Error: "Failed to show current step: {error_description}"
    #[tool(description = "Show the current question and its options, or the recommendation once the questionnaire is finished")]
    async fn current_step(&self) -> String {
        let session = self.get_session().await;
        let session = session.lock().await;

        match session.view() {
            Ok(view) => view.to_string(),
            Err(e) => format!("Failed to show current step: {}", e),
        }
    }

    /// MCP Tool: Answers the current question.
    ///
    /// # MCP Tool Parameters
    /// - `option_text` (string): must match one of the offered options exactly
    ///
    /// # Returns
    /// - Success: the next question or the recommendation
    /// - Error: "Failed to select option: {error_description}"; the session is unchanged
    ///
    /// # Example MCP Request
    /// ```json
    /// {
    ///   "method": "tools/call",
    ///   "params": {
    ///     "name": "select_option",
    ///     "arguments": {
    ///       "option_text": "Editing & refining"
    ///     }
    ///   }
    /// }
    /// ```
    #[tool(description = "Answer the current question with the exact text of one of its options")]
    async fn select_option(&self, Parameters(request): Parameters<SelectOptionRequest>) -> String {
        let session = self.get_session().await;
        let mut session = session.lock().await;

        if let Err(e) = session.select_option(&request.option_text) {
            return format!("Failed to select option: {}", e);
        }
        match session.view() {
            Ok(view) => view.to_string(),
            Err(e) => format!("Failed to select option: {}", e),
        }
    }

    /// MCP Tool: Undoes the last answer. At the first question this is a no-op.
    #[tool(description = "Go back to the previous question, undoing the last answer")]
    async fn go_back(&self) -> String {
        let session = self.get_session().await;
        let mut session = session.lock().await;

        if let Err(e) = session.go_back() {
            return format!("Failed to go back: {}", e);
        }
        match session.view() {
            Ok(view) => view.to_string(),
            Err(e) => format!("Failed to go back: {}", e),
        }
    }

    #[tool(description = "Start the questionnaire over from the first question")]
    async fn restart(&self) -> String {
        let session = self.get_session().await;
        let mut session = session.lock().await;

        if let Err(e) = session.restart() {
            return format!("Failed to restart: {}", e);
        }
        match session.view() {
            Ok(view) => view.to_string(),
            Err(e) => format!("Failed to restart: {}", e),
        }
    }

    /// MCP Tool: Lists the tools gathered so far.
    ///
    /// Only the answer that reached the recommendation carries tools, so before
    /// that point the list is empty.
    #[tool(description = "List the recommended tools, prompts and tips gathered so far")]
    async fn recommendations(&self) -> String {
        let session = self.get_session().await;
        let session = session.lock().await;

        let tools = session.selected_tools();
        if tools.is_empty() {
            return "No recommendations yet. Keep answering the questions.".to_string();
        }
        tools.iter().map(|tool| tool.to_string()).collect::<Vec<_>>().join("\n")
    }

    #[tool(description = "Show how far through the questionnaire the session is, as a percentage")]
    async fn progress(&self) -> String {
        let session = self.get_session().await;
        let session = session.lock().await;

        format!(
            "Progress: {}% ({} question(s) answered)",
            session.progress(),
            session.history().len()
        )
    }

    /// MCP Tool: "Surprise me". Picks any workflow in the tree at random
    /// without moving the session.
    #[tool(description = "Suggest a random AI workflow from anywhere in the decision tree")]
    async fn random_workflow(&self) -> String {
        let session = self.get_session().await;
        let session = session.lock().await;

        match session.random_workflow(&mut ThreadRandom) {
            Some(tool) => format!("Random workflow:\n{}", tool),
            None => "Failed to pick a random workflow: the tree has no recommendations".to_string(),
        }
    }

    #[tool(description = "Compare the AI products named in the current recommendation")]
    async fn compare_tools(&self) -> String {
        let session = self.get_session().await;
        let session = session.lock().await;

        let profiles = session.compare_tools();
        if profiles.is_empty() {
            return "Nothing to compare yet. Finish the questionnaire to get product recommendations.".to_string();
        }
        profiles.iter().map(|profile| profile.to_string()).collect::<Vec<_>>().join("\n")
    }

    #[tool(description = "Summarize the decision tree: node, option and recommendation counts and path lengths")]
    async fn tree_summary(&self) -> String {
        match self.tree.stats() {
            Ok(stats) => stats.to_string(),
            Err(e) => format!("Failed to summarize tree: {}", e),
        }
    }
}

#[tool_handler]
impl ServerHandler for AdvisorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Journalism AI Advisor MCP Server\n\n\
                This server walks a journalist through a short questionnaire and recommends \
                AI tools, ready-made prompts and tips for the task at hand.\n\n\
                Available tools:\n\
                - current_step: Show the current question and options\n\
                - select_option: Answer with the exact option text\n\
                - go_back: Undo the last answer\n\
                - restart: Start over\n\
                - recommendations: List the recommended tools\n\
                - progress: Show completion percentage\n\
                - random_workflow: Suggest a random workflow\n\
                - compare_tools: Compare the recommended AI products\n\
                - tree_summary: Describe the decision tree\n\n\
                Start with current_step, then call select_option until the recommendation is shown."
                    .to_string(),
            ),
        }
    }
}
