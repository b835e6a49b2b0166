//! MCP server exposing the assistant tool set using rmcp.
//!
//! This is how an LLM agent invokes the tools: every feature is registered
//! on the tool router with a schema-documented parameter struct. Tool
//! failures come back as spoken-style sentences in the result text rather
//! than protocol errors, so the agent can relay them verbatim.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rmcp::handler::server::tool::{Parameters, ToolRouter};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::transport::sse_server::SseServerConfig;
use rmcp::transport::SseServer;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::tools::fun::FunKind;
use crate::tools::{
    calendar, currency, email, files, fun, math, news, password, search, system, units, weather,
    wiki, Toolbox,
};

/// Render a tool result as MCP content, turning errors into sentences.
fn reply(tool: &str, result: anyhow::Result<String>) -> Result<CallToolResult, McpError> {
    let text = match result {
        Ok(text) => text,
        Err(e) => {
            error!("Tool '{tool}' failed: {e:#}");
            format!("Sorry, that didn't work: {e:#}")
        }
    };
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

// --- Tool parameter structs ---

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct WeatherRequest {
    #[schemars(description = "City name, e.g. 'London' or 'New York'")]
    pub city: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct SearchRequest {
    #[schemars(description = "The search query")]
    pub query: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct EmailRequest {
    #[schemars(description = "Recipient email address")]
    pub to_email: String,
    #[schemars(description = "Email subject line")]
    pub subject: String,
    #[schemars(description = "Plain-text message body")]
    pub message: String,
    #[schemars(description = "Optional CC address")]
    pub cc_email: Option<String>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct AddTaskRequest {
    #[schemars(description = "The task to add to the to-do list")]
    pub task: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct FindFileRequest {
    #[schemars(description = "Exact file name to look for")]
    pub filename: String,
    #[schemars(description = "Folder to search — accepts spoken phrases like 'my downloads folder' (default: current directory)")]
    pub search_dir: Option<String>,
    #[schemars(description = "Maximum folder depth to search (default: 5)")]
    pub max_depth: Option<usize>,
    #[schemars(description = "Set true to actually read the file after it was found")]
    pub confirm: Option<bool>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct WriteNoteRequest {
    #[schemars(description = "Text to append to the current note")]
    pub note: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct PasswordRequest {
    #[schemars(description = "Password length, minimum 6 (default: 12)")]
    pub length: Option<usize>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct MathRequest {
    #[schemars(description = "Math expression to evaluate, e.g. '2 + 2 * 3' or 'sqrt(16)'")]
    pub expression: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct WikipediaRequest {
    #[schemars(description = "Topic to summarize")]
    pub topic: String,
    #[schemars(description = "Number of sentences to return (default: 2)")]
    pub sentences: Option<usize>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct NewsRequest {
    #[schemars(description = "Two-letter country code (default from config, usually 'us')")]
    pub country: Option<String>,
    #[schemars(description = "Number of headlines (default: 5)")]
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct FunRequest {
    #[schemars(description = "'joke' or 'quote' (default: joke)")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct CurrencyRequest {
    #[schemars(description = "Amount to convert")]
    pub amount: f64,
    #[schemars(description = "Source currency code, e.g. 'USD'")]
    pub from_currency: String,
    #[schemars(description = "Target currency code, e.g. 'EUR'")]
    pub to_currency: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct UnitsRequest {
    #[schemars(description = "Value to convert")]
    pub value: f64,
    #[schemars(description = "Source unit, e.g. 'meters' or 'celsius'")]
    pub from_unit: String,
    #[schemars(description = "Target unit, e.g. 'feet' or 'fahrenheit'")]
    pub to_unit: String,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct TimerRequest {
    #[schemars(description = "Timer length in seconds")]
    pub seconds: u64,
    #[schemars(description = "Optional label announced when the timer fires")]
    pub label: Option<String>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct CalendarEventsRequest {
    #[schemars(description = "Days ahead to look. Omit to have the assistant ask the user first")]
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize, rmcp::schemars::JsonSchema)]
pub struct AddEventRequest {
    #[schemars(description = "Event title. Omit to have the assistant ask the user")]
    pub summary: Option<String>,
    #[schemars(description = "Start time in ISO 8601, e.g. '2025-07-22T15:00:00+05:30'")]
    pub start_time: Option<String>,
    #[schemars(description = "End time in ISO 8601")]
    pub end_time: Option<String>,
    #[schemars(description = "Optional event description")]
    pub description: Option<String>,
}

// --- MCP Server handler ---

#[derive(Clone)]
pub struct AssistantMcp {
    toolbox: Arc<Toolbox>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AssistantMcp {
    pub fn new(toolbox: Arc<Toolbox>) -> Self {
        Self {
            toolbox,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Get current weather for a city.")]
    async fn get_weather(
        &self,
        Parameters(req): Parameters<WeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = weather::get_weather(
            &self.toolbox.client,
            &self.toolbox.config.weather,
            &req.city,
        )
        .await;
        reply("get_weather", result)
    }

    #[tool(description = "Search the web using DuckDuckGo.")]
    async fn search_web(
        &self,
        Parameters(req): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result =
            search::search_web(&self.toolbox.client, &self.toolbox.config.search, &req.query)
                .await;
        reply("search_web", result)
    }

    #[tool(description = "Send a plain-text email over SMTP. Credentials come from the GMAIL_USER / GMAIL_PASSWORD environment.")]
    async fn send_email(
        &self,
        Parameters(req): Parameters<EmailRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = email::send_email(
            &self.toolbox.config.email,
            &req.to_email,
            &req.subject,
            &req.message,
            req.cc_email.as_deref(),
        )
        .await;
        reply("send_email", result)
    }

    #[tool(description = "Add a task to the to-do list.")]
    async fn add_task(
        &self,
        Parameters(req): Parameters<AddTaskRequest>,
    ) -> Result<CallToolResult, McpError> {
        reply("add_task", Ok(self.toolbox.tasks.add(&req.task)))
    }

    #[tool(description = "List all to-do tasks.")]
    async fn list_tasks(&self) -> Result<CallToolResult, McpError> {
        reply("list_tasks", Ok(self.toolbox.tasks.list()))
    }

    #[tool(description = "Clear all to-do tasks.")]
    async fn clear_tasks(&self) -> Result<CallToolResult, McpError> {
        reply("clear_tasks", Ok(self.toolbox.tasks.clear()))
    }

    #[tool(description = "Find a file by name and return its contents. Accepts spoken folder phrases for search_dir. Asks for confirmation before reading; call again with confirm=true to read.")]
    async fn find_and_read_file(
        &self,
        Parameters(req): Parameters<FindFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = files::find_and_read_file(
            &req.filename,
            req.search_dir.as_deref().unwrap_or("."),
            req.max_depth.unwrap_or(files::DEFAULT_MAX_DEPTH),
            req.confirm.unwrap_or(false),
        );
        reply("find_and_read_file", result)
    }

    #[tool(description = "Append new info to the current note, or start a new note if none exist.")]
    async fn write_note(
        &self,
        Parameters(req): Parameters<WriteNoteRequest>,
    ) -> Result<CallToolResult, McpError> {
        reply("write_note", Ok(self.toolbox.notes.write(&req.note)))
    }

    #[tool(description = "Show all notes.")]
    async fn show_notes(&self) -> Result<CallToolResult, McpError> {
        reply("show_notes", Ok(self.toolbox.notes.show()))
    }

    #[tool(description = "Generate a secure password.")]
    async fn generate_password(
        &self,
        Parameters(req): Parameters<PasswordRequest>,
    ) -> Result<CallToolResult, McpError> {
        reply(
            "generate_password",
            password::generate_password(req.length.unwrap_or(12)),
        )
    }

    #[tool(description = "Get system information: CPU, RAM, and disk usage.")]
    async fn get_system_info(&self) -> Result<CallToolResult, McpError> {
        reply("get_system_info", system::get_system_info().await)
    }

    #[tool(description = "Evaluate a math expression.")]
    async fn solve_math(
        &self,
        Parameters(req): Parameters<MathRequest>,
    ) -> Result<CallToolResult, McpError> {
        reply("solve_math", math::solve_math(&req.expression))
    }

    #[tool(description = "Get a short summary of a Wikipedia topic.")]
    async fn wikipedia_summary(
        &self,
        Parameters(req): Parameters<WikipediaRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = wiki::wikipedia_summary(
            &self.toolbox.client,
            &self.toolbox.config.wikipedia,
            &req.topic,
            req.sentences.unwrap_or(2),
        )
        .await;
        reply("wikipedia_summary", result)
    }

    #[tool(description = "Get latest news headlines (top stories).")]
    async fn get_news_headlines(
        &self,
        Parameters(req): Parameters<NewsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = news::get_news_headlines(
            &self.toolbox.client,
            &self.toolbox.config.news,
            req.country.as_deref(),
            req.count,
        )
        .await;
        reply("get_news_headlines", result)
    }

    #[tool(description = "Get a random joke or inspirational quote.")]
    async fn get_joke_or_quote(
        &self,
        Parameters(req): Parameters<FunRequest>,
    ) -> Result<CallToolResult, McpError> {
        let kind = FunKind::from_str(req.kind.as_deref().unwrap_or("joke"));
        reply(
            "get_joke_or_quote",
            fun::get_joke_or_quote(&self.toolbox.client, kind).await,
        )
    }

    #[tool(description = "Convert an amount between currencies.")]
    async fn convert_currency(
        &self,
        Parameters(req): Parameters<CurrencyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = currency::convert_currency(
            &self.toolbox.client,
            &self.toolbox.config.currency,
            req.amount,
            &req.from_currency,
            &req.to_currency,
        )
        .await;
        reply("convert_currency", result)
    }

    #[tool(description = "Convert between units (e.g. meters to feet, celsius to fahrenheit).")]
    async fn convert_units(
        &self,
        Parameters(req): Parameters<UnitsRequest>,
    ) -> Result<CallToolResult, McpError> {
        reply(
            "convert_units",
            units::convert_units(req.value, &req.from_unit, &req.to_unit),
        )
    }

    #[tool(description = "Set a timer. A desktop notification fires when time is up.")]
    async fn set_timer(
        &self,
        Parameters(req): Parameters<TimerRequest>,
    ) -> Result<CallToolResult, McpError> {
        reply(
            "set_timer",
            self.toolbox.timers.set(req.seconds, req.label.as_deref()),
        )
    }

    #[tool(description = "List active timers with remaining time.")]
    async fn list_timers(&self) -> Result<CallToolResult, McpError> {
        reply("list_timers", Ok(self.toolbox.timers.list()))
    }

    #[tool(description = "Cancel all active timers.")]
    async fn cancel_timers(&self) -> Result<CallToolResult, McpError> {
        reply("cancel_timers", Ok(self.toolbox.timers.cancel_all()))
    }

    #[tool(description = "List upcoming Google Calendar events. Omit 'days' to have the assistant ask the user how far ahead to look.")]
    async fn get_calendar_events(
        &self,
        Parameters(req): Parameters<CalendarEventsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = calendar::get_calendar_events(
            &self.toolbox.client,
            &self.toolbox.config.calendar,
            req.days,
        )
        .await;
        reply("get_calendar_events", result)
    }

    #[tool(description = "Add an event to Google Calendar. Missing required fields come back as questions for the user.")]
    async fn add_calendar_event(
        &self,
        Parameters(req): Parameters<AddEventRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = calendar::add_calendar_event(
            &self.toolbox.client,
            &self.toolbox.config.calendar,
            req.summary.as_deref(),
            req.start_time.as_deref(),
            req.end_time.as_deref(),
            req.description.as_deref().unwrap_or(""),
        )
        .await;
        reply("add_calendar_event", result)
    }
}

#[tool_handler]
impl ServerHandler for AssistantMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Personal assistant tool set: weather, web search, email, to-dos, notes, \
                 files, passwords, system info, math, Wikipedia, news, jokes, currency and \
                 unit conversion, timers, and Google Calendar."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Start the MCP SSE server on the given port (runs in background).
pub async fn start_mcp_server(toolbox: Arc<Toolbox>, port: u16) {
    let addr: SocketAddr = ([127, 0, 0, 1], port).into();

    let config = SseServerConfig {
        bind: addr,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: CancellationToken::new(),
        sse_keep_alive: Some(Duration::from_secs(15)),
    };

    match SseServer::serve_with_config(config).await {
        Ok(sse_server) => {
            info!("MCP SSE server listening on http://{addr}/sse");
            sse_server.with_service(move || AssistantMcp::new(toolbox.clone()));
        }
        Err(e) => {
            warn!("Failed to start MCP server on {addr}: {e}");
        }
    }
}
