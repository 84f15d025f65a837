//! System prompts sent as the model's `system` role.
//!
//! Keeping the persona texts in one place makes it easy to tweak how each
//! kind of request is answered without touching the request plumbing.

use crate::category::Category;

/// Persona for companionship chat.
pub const CHAT_PROMPT: &str = "作为老年人陪伴助手，用温暖、耐心的语气交流，提供情感支持。";

/// Persona for healthy recipe suggestions.
pub const RECIPE_PROMPT: &str = "作为专业老年营养师，请根据用户需求生成健康食谱，格式清晰。";

/// Persona for nursing-home recommendations.
pub const NURSING_HOME_PROMPT: &str = "作为专业养老顾问，请根据用户需求推荐合适的养老院。";

pub fn system_prompt(category: Category) -> &'static str {
    match category {
        Category::Chat => CHAT_PROMPT,
        Category::Recipe => RECIPE_PROMPT,
        Category::NursingHome => NURSING_HOME_PROMPT,
    }
}
