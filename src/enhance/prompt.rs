//! Fixed instruction and request/response shapes for the text generator.

use serde::{Deserialize, Serialize};

/// Instruction sent with every enhancement request.
pub const ENHANCE_INSTRUCTION: &str = "You are an AI meme artist who specializes in taking \
boring ASCII art and making it hilarious. Take the ASCII art you are given and modify it to \
emphasize meme characteristics and make it funnier. Preserve the original structure and \
content as much as possible, only add details that emphasize the meme characteristics. \
Only use standard printable ASCII characters (U+0020 to U+007E), newlines, and the block \
characters \u{2591}\u{2592}\u{2593}\u{2588} (U+2591, U+2592, U+2593, U+2588) in your output. \
Do not use other symbols or Unicode characters. Respond with a JSON object with a single \
string field \"enhancedAsciiArt\".";

/// Build the user turn that carries the art.
pub fn build_user_prompt(art: &str) -> String {
    format!("ASCII Art:\n\n{}", art)
}

// ==================== Request ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: &'static str,
}

impl GenerateContentRequest {
    pub(crate) fn for_art(art: &str) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(ENHANCE_INSTRUCTION.to_string()),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_user_prompt(art)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        }
    }
}

// ==================== Response ====================

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Structured output the generator is asked to produce.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnhancedOutput {
    pub enhanced_ascii_art: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if any.
    pub(crate) fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}
