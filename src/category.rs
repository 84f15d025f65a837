use std::fmt;

/// The kind of help a request asks for.
///
/// Every category owns a system prompt (see [`crate::ai::prompts`]) and a
/// fallback pool (see [`crate::ai::fallback`]). Both tables match on this enum
/// exhaustively, so adding a variant forces both to be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Chat,
    Recipe,
    NursingHome,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Chat, Category::Recipe, Category::NursingHome];

    /// Resolve a wire tag. Unknown tags fall back to [`Category::Chat`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "chat" => Category::Chat,
            "recipe" => Category::Recipe,
            "nursing-home" => Category::NursingHome,
            other => {
                tracing::debug!(tag = other, "Unknown category, using chat");
                Category::Chat
            }
        }
    }

    /// Resolve an optional tag, treating a missing one as chat.
    pub fn from_optional_tag(tag: Option<&str>) -> Self {
        tag.map(Self::from_tag).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Chat => "chat",
            Category::Recipe => "recipe",
            Category::NursingHome => "nursing-home",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
