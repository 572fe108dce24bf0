use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyCategory {
    Breathing,
    Meditation,
    Exercise,
    Social,
    Creative,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopingStrategy {
    pub title: &'static str,
    pub description: &'static str,
    pub category: StrategyCategory,
}

pub const COPING_STRATEGIES: &[CopingStrategy] = &[
    CopingStrategy {
        title: "Deep Breathing",
        description: "Take 5 deep breaths, inhaling for 4 counts and exhaling for 6 counts.",
        category: StrategyCategory::Breathing,
    },
    CopingStrategy {
        title: "5-Minute Meditation",
        description: "Find a quiet place, close your eyes, and focus on your breath.",
        category: StrategyCategory::Meditation,
    },
    CopingStrategy {
        title: "Quick Walk",
        description: "Take a 10-minute walk outside to clear your mind.",
        category: StrategyCategory::Exercise,
    },
    CopingStrategy {
        title: "Call a Friend",
        description: "Reach out to someone you trust and share your feelings.",
        category: StrategyCategory::Social,
    },
    CopingStrategy {
        title: "Express Creativity",
        description: "Spend 15 minutes drawing, writing, or creating something.",
        category: StrategyCategory::Creative,
    },
];
