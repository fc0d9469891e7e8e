use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_CATEGORY_NAME: &str = "General";

/// The fixed set of categories a post may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CategoryPreset {
    General,
    Announcements,
    Questions,
    Guides,
    Showcase,
    Feedback,
    Bugs,
    OffTopic,
    Events,
    Resources,
}

impl CategoryPreset {
    pub(crate) const ALL: [CategoryPreset; 10] = [
        CategoryPreset::General,
        CategoryPreset::Announcements,
        CategoryPreset::Questions,
        CategoryPreset::Guides,
        CategoryPreset::Showcase,
        CategoryPreset::Feedback,
        CategoryPreset::Bugs,
        CategoryPreset::OffTopic,
        CategoryPreset::Events,
        CategoryPreset::Resources,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            CategoryPreset::General => DEFAULT_CATEGORY_NAME,
            CategoryPreset::Announcements => "Announcements",
            CategoryPreset::Questions => "Questions",
            CategoryPreset::Guides => "Guides",
            CategoryPreset::Showcase => "Showcase",
            CategoryPreset::Feedback => "Feedback",
            CategoryPreset::Bugs => "Bugs",
            CategoryPreset::OffTopic => "Off Topic",
            CategoryPreset::Events => "Events",
            CategoryPreset::Resources => "Resources",
        }
    }

    pub(crate) fn description(self) -> &'static str {
        match self {
            CategoryPreset::General => "Default category for general discussion.",
            CategoryPreset::Announcements => "Official announcements and updates.",
            CategoryPreset::Questions => "Ask for help or clarification.",
            CategoryPreset::Guides => "Tutorials, walkthroughs, and how-tos.",
            CategoryPreset::Showcase => "Share your work, projects, and wins.",
            CategoryPreset::Feedback => "Give/receive feedback and suggestions.",
            CategoryPreset::Bugs => "Report issues and unexpected behavior.",
            CategoryPreset::OffTopic => "Anything that doesn't fit elsewhere.",
            CategoryPreset::Events => "Meetups, deadlines, and community events.",
            CategoryPreset::Resources => "Links, tools, and helpful materials.",
        }
    }

    pub(crate) fn is_preset_name(name: &str) -> bool {
        Self::ALL.iter().any(|preset| preset.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Category {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) description: String,
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{CategoryPreset, DEFAULT_CATEGORY_NAME};

    #[test]
    fn presets_are_ten_unique_names() {
        let names: HashSet<_> = CategoryPreset::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names.len(), 10);
        assert!(names.contains(DEFAULT_CATEGORY_NAME));
    }

    #[test]
    fn preset_membership_is_exact() {
        assert!(CategoryPreset::is_preset_name("Off Topic"));
        assert!(!CategoryPreset::is_preset_name("off topic"));
        assert!(!CategoryPreset::is_preset_name("Memes"));
    }
}
