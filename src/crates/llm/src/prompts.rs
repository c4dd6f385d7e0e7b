//! Prompt templates for first drafts and revisions.

use serde::{Deserialize, Serialize};

/// One chat turn sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Builds the message lists for the two generation forms.
#[derive(Debug, Clone)]
pub struct PostPrompts {
    tone: String,
    max_length: usize,
}

impl PostPrompts {
    pub fn new(tone: impl Into<String>, max_length: usize) -> Self {
        Self {
            tone: tone.into(),
            max_length,
        }
    }

    /// Messages for a first draft.
    pub fn initial(&self, article: &str) -> Vec<ChatMessage> {
        let system = format!(
            "You are an expert social media content creator specializing in LinkedIn and X (Twitter) posts.\n\
             \n\
             Your task is to create engaging, professional posts that:\n\
             - Capture the key insights from the article\n\
             - Are concise and impactful (under {max_length} characters)\n\
             - Use a {tone} tone\n\
             - Include relevant hashtags (2-3 maximum)\n\
             - Encourage engagement\n\
             - Are suitable for professional social media platforms\n\
             \n\
             Format your response as a clean post without any additional commentary or explanations.",
            max_length = self.max_length,
            tone = self.tone,
        );

        vec![
            ChatMessage::system(system),
            ChatMessage::user(format!(
                "Create a social media post based on this article:\n\n{}",
                article
            )),
        ]
    }

    /// Messages for a revision driven by reviewer feedback.
    pub fn revision(&self, article: &str, feedback: &str) -> Vec<ChatMessage> {
        let system = format!(
            "You are an expert social media content creator.\n\
             \n\
             Your task is to revise a social media post based on user feedback.\n\
             - Follow the feedback instructions carefully\n\
             - Maintain a {tone} tone\n\
             - Keep it under {max_length} characters\n\
             - Include relevant hashtags (2-3 maximum)\n\
             - Make it engaging and professional\n\
             \n\
             Format your response as a clean post without any additional commentary.",
            max_length = self.max_length,
            tone = self.tone,
        );

        vec![
            ChatMessage::system(system),
            ChatMessage::user(format!(
                "Original article:\n{}\n\nUser feedback/editing instructions:\n{}\n\n\
                 Please regenerate the post based on this feedback.",
                article, feedback
            )),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_prompt_carries_settings_and_article() {
        let prompts = PostPrompts::new("casual", 200);
        let messages = prompts.initial("Company X launches new product.");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("under 200 characters"));
        assert!(messages[0].content.contains("Use a casual tone"));
        assert_eq!(messages[1].role, "user");
        assert!(messages[1].content.ends_with("Company X launches new product."));
    }

    #[test]
    fn test_revision_prompt_carries_feedback() {
        let prompts = PostPrompts::new("professional", 280);
        let messages = prompts.revision("The article.", "make it punchier");

        assert!(messages[0].content.contains("revise a social media post"));
        assert!(messages[1].content.contains("Original article:\nThe article."));
        assert!(messages[1].content.contains("instructions:\nmake it punchier"));
    }
}
