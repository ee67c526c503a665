//! Scheduler gateway: asks an external AI service to turn a plain task
//! list into a kid-friendly schedule with breaks. Every failure path
//! degrades to a deterministic fallback so user input is never lost.

use crate::domain::DEFAULT_EMOJI;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use std::time::Duration;
use thiserror::Error;

/// Simplified task sent to the scheduler
#[derive(Debug, Clone, Serialize)]
pub struct TaskDescriptor {
    pub title: String,
    pub subject: String,
    pub estimated_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// One entry of the optimized schedule returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub title: String,
    pub subject: String,
    pub estimated_minutes: u32,
    pub is_break: bool,
    pub emoji: String,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Fixed message shown when the motivational call fails at timer start
pub const DEFAULT_START_MESSAGE: &str = "You've got this — one step at a time!";
/// Fixed message shown when the motivational call fails at completion
pub const DEFAULT_DONE_MESSAGE: &str = "Great job! One more thing off your list.";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no API key configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Http(String),
    #[error("service returned status {0}")]
    Status(u16),
    #[error("reply had no content")]
    MissingContent,
    #[error("could not parse schedule: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Endpoint settings, read from the environment
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl GatewayConfig {
    /// Read HOMEROOM_API_URL / HOMEROOM_API_KEY / HOMEROOM_MODEL.
    /// Returns None when no key is set; the gateway then answers with fallbacks only.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("HOMEROOM_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }

        let api_url = std::env::var("HOMEROOM_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());
        let model =
            std::env::var("HOMEROOM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Some(Self {
            api_url,
            api_key,
            model,
        })
    }
}

// Chat-completions wire types (only the fields we touch)

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for the external scheduling service
#[derive(Debug, Clone)]
pub struct SchedulerGateway {
    config: Option<GatewayConfig>,
}

impl SchedulerGateway {
    pub fn from_env() -> Self {
        Self {
            config: GatewayConfig::from_env(),
        }
    }

    #[cfg(test)]
    pub fn disabled() -> Self {
        Self { config: None }
    }

    /// Ask the service for an optimized schedule. Never fails: any
    /// transport or parse problem yields the deterministic fallback.
    pub fn optimize(
        &self,
        descriptors: &[TaskDescriptor],
        available_time_minutes: Option<u32>,
    ) -> Vec<ScheduledItem> {
        match self.try_optimize(descriptors, available_time_minutes) {
            Ok(items) => items,
            Err(_) => fallback_schedule(descriptors),
        }
    }

    fn try_optimize(
        &self,
        descriptors: &[TaskDescriptor],
        available_time_minutes: Option<u32>,
    ) -> Result<Vec<ScheduledItem>, GatewayError> {
        let config = self.config.as_ref().ok_or(GatewayError::NotConfigured)?;

        let task_json = serde_json::to_string(descriptors)?;
        let mut prompt = format!(
            "Here are a child's homework tasks as JSON:\n{}\n\
             Reorder them into a motivating schedule, inserting short breaks \
             where helpful. Reply with ONLY a JSON array of objects with the \
             fields title, subject, estimated_minutes, is_break, emoji and an \
             optional reasoning.",
            task_json
        );
        if let Some(minutes) = available_time_minutes {
            prompt.push_str(&format!(
                "\nThe child has about {} minutes available in total.",
                minutes
            ));
        }

        let content = self.chat(
            config,
            "You plan homework schedules for children. Keep titles unchanged, \
             keep estimates realistic, and add breaks as items with is_break true.",
            prompt,
        )?;

        let items: Vec<ScheduledItem> = serde_json::from_str(extract_json(&content))?;
        if items.is_empty() {
            return Err(GatewayError::MissingContent);
        }
        Ok(items)
    }

    /// Fetch a short motivational line. Falls back to a fixed default,
    /// distinct for starting vs completed.
    pub fn motivation(&self, task_title: &str, is_complete: bool) -> String {
        self.try_motivation(task_title, is_complete)
            .unwrap_or_else(|_| default_motivation(is_complete).to_string())
    }

    fn try_motivation(
        &self,
        task_title: &str,
        is_complete: bool,
    ) -> Result<String, GatewayError> {
        let config = self.config.as_ref().ok_or(GatewayError::NotConfigured)?;

        let prompt = if is_complete {
            format!(
                "A child just finished the homework task \"{}\". \
                 Reply with one short cheerful sentence of praise, plain text.",
                task_title
            )
        } else {
            format!(
                "A child is about to start the homework task \"{}\". \
                 Reply with one short encouraging sentence, plain text.",
                task_title
            )
        };

        let content = self.chat(
            config,
            "You encourage children doing homework. One sentence, no markdown.",
            prompt,
        )?;

        let line = content.trim();
        if line.is_empty() {
            return Err(GatewayError::MissingContent);
        }
        Ok(line.to_string())
    }

    fn chat(
        &self,
        config: &GatewayConfig,
        system: &str,
        user: String,
    ) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.4,
        };

        let response = ureq::post(&config.api_url)
            .set("Authorization", &format!("Bearer {}", config.api_key))
            .timeout(Duration::from_secs(30))
            .send_json(serde_json::to_value(&request)?);

        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(GatewayError::Status(code)),
            Err(e) => return Err(GatewayError::Http(e.to_string())),
        };

        let parsed: ChatResponse = response
            .into_json()
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(GatewayError::MissingContent)
    }
}

/// Deterministic 1:1 mapping used whenever the service cannot be reached
/// or its reply does not parse: original items, original order, no breaks.
pub fn fallback_schedule(descriptors: &[TaskDescriptor]) -> Vec<ScheduledItem> {
    descriptors
        .iter()
        .map(|d| ScheduledItem {
            title: d.title.clone(),
            subject: d.subject.clone(),
            estimated_minutes: d.estimated_minutes,
            is_break: false,
            emoji: d.emoji.clone().unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
            reasoning: None,
        })
        .collect()
}

/// The fixed default line for the motivational contract
pub fn default_motivation(is_complete: bool) -> &'static str {
    if is_complete {
        DEFAULT_DONE_MESSAGE
    } else {
        DEFAULT_START_MESSAGE
    }
}

/// Strip markdown code fences around the JSON array, if the model added any
fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();

    if let Some(rest) = trimmed.strip_prefix("```json").or_else(|| trimmed.strip_prefix("```")) {
        if let Some(inner) = rest.rsplit_once("```") {
            return inner.0.trim();
        }
    }

    trimmed
}

/// What the worker thread sends back to the event loop
#[derive(Debug)]
pub enum WorkerEvent {
    /// An optimized (or fallback) schedule, tagged with the day it was requested for
    Schedule {
        day_key: String,
        items: Vec<ScheduledItem>,
    },
    /// A motivational line to display
    Motivation { text: String },
}

/// Run the schedule request on a worker thread; the outcome arrives on `tx`.
/// The day key travels with the request so a reply that lands after the user
/// switched days can be discarded instead of applied to the wrong day.
pub fn spawn_optimize(
    gateway: SchedulerGateway,
    day_key: String,
    descriptors: Vec<TaskDescriptor>,
    available_time_minutes: Option<u32>,
    tx: Sender<WorkerEvent>,
) {
    std::thread::spawn(move || {
        let items = gateway.optimize(&descriptors, available_time_minutes);
        let _ = tx.send(WorkerEvent::Schedule { day_key, items });
    });
}

/// Fetch a motivational line on a worker thread
pub fn spawn_motivation(
    gateway: SchedulerGateway,
    task_title: String,
    is_complete: bool,
    tx: Sender<WorkerEvent>,
) {
    std::thread::spawn(move || {
        let text = gateway.motivation(&task_title, is_complete);
        let _ = tx.send(WorkerEvent::Motivation { text });
    });
}
