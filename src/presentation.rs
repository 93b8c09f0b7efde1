//! Pure mapping from request state to what the results panel shows.
//!
//! Nothing here touches egui state; colors are plain `Color32` values so the
//! lookups can be tested without a context.

use egui::Color32;

use crate::classifier::types::ClassificationResult;
use crate::state::RequestState;

pub const FAVORABLE_CONFIDENCE: f32 = 0.8;
pub const CAUTIONARY_CONFIDENCE: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    Favorable,
    Cautionary,
    Unfavorable,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= FAVORABLE_CONFIDENCE {
            ConfidenceBand::Favorable
        } else if confidence >= CAUTIONARY_CONFIDENCE {
            ConfidenceBand::Cautionary
        } else {
            ConfidenceBand::Unfavorable
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            ConfidenceBand::Favorable => Color32::from_rgb(22, 163, 74),
            ConfidenceBand::Cautionary => Color32::from_rgb(202, 138, 4),
            ConfidenceBand::Unfavorable => Color32::from_rgb(220, 38, 38),
        }
    }
}

/// Display grouping for a tag, derived from its words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Recyclable,
    Biodegradable,
    EcoFriendly,
    Organic,
    NonRecoverable,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagColors {
    pub background: Color32,
    pub text: Color32,
}

impl TagCategory {
    pub fn from_tag(tag: &str) -> Self {
        let words: String = tag
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
            .collect::<String>()
            .to_lowercase();

        if words.contains("non-recyclable") || words.contains("non-biodegradable") {
            TagCategory::NonRecoverable
        } else if words.contains("recyclable") {
            TagCategory::Recyclable
        } else if words.contains("biodegradable") {
            TagCategory::Biodegradable
        } else if words.contains("eco-friendly") {
            TagCategory::EcoFriendly
        } else if words.contains("organic") {
            TagCategory::Organic
        } else {
            TagCategory::Other
        }
    }

    pub fn colors(self) -> TagColors {
        let (background, text) = match self {
            TagCategory::Recyclable => ((219, 234, 254), (30, 64, 175)),
            TagCategory::Biodegradable => ((220, 252, 231), (22, 101, 52)),
            TagCategory::EcoFriendly => ((209, 250, 229), (6, 95, 70)),
            TagCategory::Organic => ((255, 237, 213), (154, 52, 18)),
            TagCategory::NonRecoverable => ((254, 226, 226), (153, 27, 27)),
            TagCategory::Other => ((243, 244, 246), (31, 41, 55)),
        };
        TagColors {
            background: Color32::from_rgb(background.0, background.1, background.2),
            text: Color32::from_rgb(text.0, text.1, text.2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Heading {
    Uncertain,
    Category(String),
}

impl Heading {
    pub fn text(&self) -> &str {
        match self {
            Heading::Uncertain => "Uncertain Classification",
            Heading::Category(label) => label.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub text: String,
    pub category: TagCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityRow {
    pub class_name: String,
    pub probability: f32,
}

impl ProbabilityRow {
    pub fn display_name(&self) -> String {
        capitalize(&self.class_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub heading: Heading,
    pub confidence: f32,
    pub band: ConfidenceBand,
    pub tags: Vec<Tag>,
    pub description: Option<String>,
    pub probabilities: Vec<ProbabilityRow>,
}

impl ResultSummary {
    pub fn from_result(result: &ClassificationResult) -> Self {
        let heading = if result.is_uncertain() {
            Heading::Uncertain
        } else {
            Heading::Category(result.label.clone())
        };

        let tags = result
            .tags
            .iter()
            .map(|tag| Tag {
                text: tag.clone(),
                category: TagCategory::from_tag(tag),
            })
            .collect();

        let mut probabilities: Vec<ProbabilityRow> = result
            .all_probabilities
            .iter()
            .map(|(class_name, probability)| ProbabilityRow {
                class_name: class_name.clone(),
                probability: *probability,
            })
            .collect();
        // stable: equal probabilities keep the endpoint's order
        probabilities.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        Self {
            heading,
            confidence: result.confidence,
            band: ConfidenceBand::from_confidence(result.confidence),
            tags,
            description: result.description.clone(),
            probabilities,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultPanel {
    Prompt,
    Loading,
    Error(String),
    Result(ResultSummary),
}

impl ResultPanel {
    pub fn from_state(state: &RequestState) -> Self {
        match state {
            RequestState::Idle => ResultPanel::Prompt,
            RequestState::Loading { .. } => ResultPanel::Loading,
            RequestState::Failed(message) => ResultPanel::Error(message.clone()),
            RequestState::Succeeded(result) => {
                ResultPanel::Result(ResultSummary::from_result(result))
            }
        }
    }
}

/// `0.923` -> `"92.3%"`
pub fn percent(value: f32) -> String {
    format!("{:.1}%", value * 100.0)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn plastic() -> ClassificationResult {
        let mut all_probabilities = IndexMap::new();
        all_probabilities.insert("other".to_string(), 0.03);
        all_probabilities.insert("plastic".to_string(), 0.92);
        all_probabilities.insert("organic".to_string(), 0.05);
        ClassificationResult {
            label: "plastic".to_string(),
            confidence: 0.92,
            tags: vec!["recyclable".to_string()],
            description: Some("...".to_string()),
            all_probabilities,
        }
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(ConfidenceBand::from_confidence(0.81), ConfidenceBand::Favorable);
        assert_eq!(ConfidenceBand::from_confidence(0.8), ConfidenceBand::Favorable);
        assert_eq!(ConfidenceBand::from_confidence(0.60), ConfidenceBand::Cautionary);
        assert_eq!(ConfidenceBand::from_confidence(0.79), ConfidenceBand::Cautionary);
        assert_eq!(ConfidenceBand::from_confidence(0.59), ConfidenceBand::Unfavorable);
        assert_eq!(ConfidenceBand::from_confidence(0.0), ConfidenceBand::Unfavorable);
    }

    #[test]
    fn test_probabilities_sorted_descending() {
        let summary = ResultSummary::from_result(&plastic());
        let names: Vec<&str> = summary
            .probabilities
            .iter()
            .map(|row| row.class_name.as_str())
            .collect();
        assert_eq!(names, vec!["plastic", "organic", "other"]);
        assert_eq!(summary.probabilities[0].display_name(), "Plastic");
    }

    #[test]
    fn test_equal_probabilities_keep_endpoint_order() {
        let mut result = plastic();
        result.all_probabilities = IndexMap::from([
            ("metal".to_string(), 0.25),
            ("glass".to_string(), 0.5),
            ("paper".to_string(), 0.25),
        ]);
        let summary = ResultSummary::from_result(&result);
        let names: Vec<&str> = summary
            .probabilities
            .iter()
            .map(|row| row.class_name.as_str())
            .collect();
        assert_eq!(names, vec!["glass", "metal", "paper"]);
    }

    #[test]
    fn test_uncertain_heading() {
        let mut result = plastic();
        result.label = "uncertain".to_string();
        let summary = ResultSummary::from_result(&result);
        assert_eq!(summary.heading, Heading::Uncertain);
        assert_eq!(summary.heading.text(), "Uncertain Classification");
    }

    #[test]
    fn test_category_heading() {
        let summary = ResultSummary::from_result(&plastic());
        assert_eq!(summary.heading, Heading::Category("plastic".to_string()));
        assert_eq!(summary.band, ConfidenceBand::Favorable);
        assert_eq!(summary.tags[0].category, TagCategory::Recyclable);
    }

    #[test]
    fn test_tag_categories() {
        assert_eq!(TagCategory::from_tag("♻️ Recyclable"), TagCategory::Recyclable);
        assert_eq!(TagCategory::from_tag("🌱 Biodegradable"), TagCategory::Biodegradable);
        assert_eq!(TagCategory::from_tag("🍃 Eco-Friendly"), TagCategory::EcoFriendly);
        assert_eq!(TagCategory::from_tag("🍎 Organic Waste"), TagCategory::Organic);
        assert_eq!(TagCategory::from_tag("🚯 Non-Recyclable"), TagCategory::NonRecoverable);
        assert_eq!(TagCategory::from_tag("🚯 Non-Biodegradable"), TagCategory::NonRecoverable);
        assert_eq!(TagCategory::from_tag("compostable"), TagCategory::Other);
        assert_eq!(TagCategory::from_tag(""), TagCategory::Other);
    }

    #[test]
    fn test_tag_colors_are_distinct() {
        let categories = [
            TagCategory::Recyclable,
            TagCategory::Biodegradable,
            TagCategory::EcoFriendly,
            TagCategory::Organic,
            TagCategory::NonRecoverable,
            TagCategory::Other,
        ];
        for (i, a) in categories.iter().enumerate() {
            for b in &categories[i + 1..] {
                assert_ne!(a.colors(), b.colors());
            }
        }
    }

    #[test]
    fn test_panel_for_each_state() {
        assert_eq!(ResultPanel::from_state(&RequestState::Idle), ResultPanel::Prompt);
        assert_eq!(
            ResultPanel::from_state(&RequestState::Loading { request_id: 3 }),
            ResultPanel::Loading
        );
        assert_eq!(
            ResultPanel::from_state(&RequestState::Failed("file too large".to_string())),
            ResultPanel::Error("file too large".to_string())
        );
        assert!(matches!(
            ResultPanel::from_state(&RequestState::Succeeded(plastic())),
            ResultPanel::Result(_)
        ));
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.923), "92.3%");
        assert_eq!(percent(1.0), "100.0%");
        assert_eq!(percent(0.0), "0.0%");
    }
}
