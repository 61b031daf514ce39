// ABOUTME: Scripted collaborators standing in for vision and language-model backends
// ABOUTME: Record what they were asked and answer from a fixed script
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use mealwise_server::errors::{AppError, AppResult, ErrorCode};
use mealwise_server::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use mealwise_server::vision::LabelDetector;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Detector answering with fixed labels, or failing
pub struct ScriptedDetector {
    reply: Result<Vec<String>, ErrorCode>,
    seen: Mutex<Vec<(PathBuf, bool)>>,
}

impl ScriptedDetector {
    pub fn labels(labels: &[&str]) -> Self {
        Self {
            reply: Ok(labels.iter().map(|l| (*l).to_owned()).collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(code: ErrorCode) -> Self {
        Self {
            reply: Err(code),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Paths handed to `detect`, with whether the file existed at that moment
    pub fn seen(&self) -> Vec<(PathBuf, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LabelDetector for ScriptedDetector {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn detect(&self, image_path: &Path) -> AppResult<Vec<String>> {
        self.seen
            .lock()
            .unwrap()
            .push((image_path.to_path_buf(), image_path.exists()));
        match &self.reply {
            Ok(labels) => Ok(labels.clone()),
            Err(code) => Err(AppError::new(*code, "scripted detector failure")),
        }
    }
}

/// Language model answering with fixed text, or failing
pub struct ScriptedLlm {
    reply: Result<String, ErrorCode>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedLlm {
    pub fn replying(content: impl Into<String>) -> Self {
        Self {
            reply: Ok(content.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(code: ErrorCode) -> Self {
        Self {
            reply: Err(code),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Concatenated content of every message of the only request received
    pub fn single_prompt(&self) -> String {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one model call");
        requests[0]
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Err(code) => Err(AppError::new(*code, "scripted model failure")),
        }
    }
}

/// One schema-conforming program
pub fn program_json(id: &str, calories: u32) -> Value {
    json!({
        "id": id,
        "name": format!("Program {id}"),
        "dailyCalories": calories,
        "description": "Structured deficit with whole foods",
        "dailyMeals": {
            "breakfast": "Greek yogurt with berries",
            "lunch": "Chicken and quinoa bowl",
            "dinner": "Baked salmon with vegetables",
            "snacks": "Apple and almonds"
        },
        "weeklyPlan": "Rotate proteins daily",
        "nutritionTargets": {"protein": "30%", "carbs": "40%", "fat": "30%"},
        "tips": ["Prepare meals ahead"],
        "notes": "Adjust portions weekly"
    })
}

/// Model reply wrapping `count` programs in a fenced json block
pub fn fenced_program_reply(count: usize) -> String {
    let programs: Vec<Value> = (0..count)
        .map(|i| program_json(&format!("p{i}"), 1600 + 100 * i as u32))
        .collect();
    format!(
        "Here are your programs:\n```json\n{}\n```\nEnjoy!",
        serde_json::to_string_pretty(&json!({ "programs": programs })).unwrap()
    )
}
