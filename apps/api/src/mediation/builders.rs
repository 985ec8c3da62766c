//! Request builders — one pure function per tool.
//!
//! Callers guarantee the input is non-blank; builders embed it trimmed.
//! Search augmentation and a response shape are never set together.

use crate::llm_client::RequestOptions;
use crate::mediation::models::Tone;
use crate::mediation::prompts::{
    IDEA_PROMPT_TEMPLATE, IDEA_SYSTEM, METADATA_PROMPT_TEMPLATE, METADATA_SYSTEM,
    SCRIPT_PROMPT_TEMPLATE, SCRIPT_SYSTEM, TREND_PROMPT_TEMPLATE, TREND_SYSTEM,
};
use crate::mediation::schemas::{full_script_shape, idea_list_shape, video_metadata_shape};

/// A fully assembled model request, ready for the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub prompt: String,
    pub options: RequestOptions,
}

pub fn build_trend_request(niche: &str) -> ModelRequest {
    ModelRequest {
        prompt: TREND_PROMPT_TEMPLATE.replace("{niche}", niche.trim()),
        options: RequestOptions {
            response_shape: None,
            enable_search_augmentation: true,
            system_instruction: TREND_SYSTEM.to_string(),
        },
    }
}

pub fn build_idea_request(topic: &str) -> ModelRequest {
    ModelRequest {
        prompt: IDEA_PROMPT_TEMPLATE.replace("{topic}", topic.trim()),
        options: RequestOptions {
            response_shape: Some(idea_list_shape()),
            enable_search_augmentation: false,
            system_instruction: IDEA_SYSTEM.to_string(),
        },
    }
}

pub fn build_script_request(idea: &str, tone: Tone) -> ModelRequest {
    ModelRequest {
        prompt: SCRIPT_PROMPT_TEMPLATE
            .replace("{idea}", idea.trim())
            .replace("{tone}", tone.label()),
        options: RequestOptions {
            response_shape: Some(full_script_shape()),
            enable_search_augmentation: false,
            system_instruction: SCRIPT_SYSTEM.to_string(),
        },
    }
}

pub fn build_metadata_request(context: &str) -> ModelRequest {
    ModelRequest {
        prompt: METADATA_PROMPT_TEMPLATE.replace("{context}", context.trim()),
        options: RequestOptions {
            response_shape: Some(video_metadata_shape()),
            enable_search_augmentation: false,
            system_instruction: METADATA_SYSTEM.to_string(),
        },
    }
}
