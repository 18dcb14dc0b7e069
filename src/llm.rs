//! Language-model client for syllabus skill extraction

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::SyllabusConfig;
use crate::error::{Error, Result};
use crate::skills::ExtractedSkills;

/// Turns syllabus text into categorized skills
pub trait SkillExtractor {
    fn extract_skills(&self, text: &str) -> Result<ExtractedSkills>;
}

const SYSTEM_PROMPT: &str = "\
You analyze university syllabi and list the professional skills they teach, \
phrased the way a job portal such as pracuj.pl would phrase them.
Return two lists:
- technologies: concrete, recognizable technologies only (languages, tools, \
platforms, databases, frameworks, software), each with its category.
- soft_skills: short, job-relevant competency names, each with a one-line \
description of the context in which the syllabus develops it.
Only include skills clearly stated or strongly implied by the text. \
Also return the subject name as document_title.";

/// Chat-completions client with a strict JSON schema response
pub struct OpenAiSkillExtractor {
    agent: ureq::Agent,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl OpenAiSkillExtractor {
    pub fn new(api_key: &str, config: &SyllabusConfig) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Config("OPENAI_API_KEY is not set".to_string()));
        }

        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
                .build(),
        );

        Ok(Self {
            agent,
            api_key: api_key.to_string(),
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn request_body(&self, text: &str) -> Value {
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!(
                        "Extract the technologies and skills taught by this syllabus:\n\n{}",
                        text
                    )
                }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "extracted_skills",
                    "strict": true,
                    "schema": skills_schema()
                }
            }
        })
    }
}

impl SkillExtractor for OpenAiSkillExtractor {
    fn extract_skills(&self, text: &str) -> Result<ExtractedSkills> {
        let body = serde_json::to_string(&self.request_body(text))?;
        debug!(endpoint = %self.endpoint, bytes = body.len(), "sending skill extraction request");

        let resp = self
            .agent
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send(body.as_str())
            .map_err(|e| Error::Llm(e.to_string()))?;

        let raw = resp
            .into_body()
            .read_to_string()
            .map_err(|e| Error::Llm(e.to_string()))?;

        parse_response(&raw)
    }
}

fn skills_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["technologies", "soft_skills", "document_title"],
        "properties": {
            "technologies": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["name", "category"],
                    "properties": {
                        "name": { "type": "string" },
                        "category": { "type": "string" }
                    }
                }
            },
            "soft_skills": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["name", "description"],
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" }
                    }
                }
            },
            "document_title": { "type": "string" }
        }
    })
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
    refusal: Option<String>,
}

/// Skills from a chat-completions response body
pub fn parse_response(raw: &str) -> Result<ExtractedSkills> {
    let response: ChatResponse = serde_json::from_str(raw)?;
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| Error::Llm("response has no choices".to_string()))?;

    if let Some(refusal) = message.refusal {
        return Err(Error::Llm(format!("model refused: {}", refusal)));
    }

    let content = message
        .content
        .ok_or_else(|| Error::Llm("response message has no content".to_string()))?;
    Ok(serde_json::from_str(&content)?)
}
