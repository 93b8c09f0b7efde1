use egui::{Align, Color32, Layout, RichText, Stroke};

use crate::app::views::{View, MUTED_TEXT, PRIMARY};
use crate::presentation::{percent, Heading, ResultPanel, ResultSummary};

const WARNING: Color32 = Color32::from_rgb(234, 179, 8);
const ERROR_FILL: Color32 = Color32::from_rgb(254, 242, 242);
const ERROR_STROKE: Color32 = Color32::from_rgb(254, 202, 202);
const ERROR_TEXT: Color32 = Color32::from_rgb(185, 28, 28);

pub struct ResultView {
    panel: ResultPanel,
}

impl ResultView {
    pub fn new(panel: ResultPanel) -> Self {
        Self { panel }
    }

    fn draw_placeholder(ui: &mut egui::Ui, icon: &str, text: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(48.0);
            ui.label(RichText::new(icon).size(40.0).color(MUTED_TEXT));
            ui.add_space(8.0);
            ui.label(RichText::new(text).color(MUTED_TEXT));
        });
    }

    fn draw_loading(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(48.0);
            ui.add(egui::Spinner::new().size(48.0).color(PRIMARY));
            ui.add_space(8.0);
            ui.label(RichText::new("Analyzing your image...").color(MUTED_TEXT));
        });
    }

    fn draw_error(ui: &mut egui::Ui, message: &str) {
        egui::Frame::group(ui.style())
            .fill(ERROR_FILL)
            .stroke(Stroke::new(1.0, ERROR_STROKE))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("⚠").color(ERROR_TEXT));
                    ui.label(RichText::new(message).color(ERROR_TEXT));
                });
            });
    }

    fn draw_summary(ui: &mut egui::Ui, summary: &ResultSummary) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(RichText::new(summary.heading.text()).heading().strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    match summary.heading {
                        Heading::Uncertain => ui.label(RichText::new("⚠").size(20.0).color(WARNING)),
                        Heading::Category(_) => ui.label(RichText::new("✔").size(20.0).color(PRIMARY)),
                    };
                });
            });
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Confidence");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(
                        RichText::new(percent(summary.confidence))
                            .strong()
                            .color(summary.band.color()),
                    );
                });
            });
            ui.add(egui::ProgressBar::new(summary.confidence).fill(summary.band.color()));

            if !summary.tags.is_empty() {
                ui.add_space(8.0);
                ui.label("Tags:");
                ui.horizontal_wrapped(|ui| {
                    for tag in &summary.tags {
                        let colors = tag.category.colors();
                        ui.label(
                            RichText::new(format!(" {} ", tag.text))
                                .small()
                                .color(colors.text)
                                .background_color(colors.background),
                        );
                    }
                });
            }

            if let Some(description) = &summary.description {
                ui.add_space(8.0);
                ui.label("Description:");
                ui.label(RichText::new(description).color(MUTED_TEXT));
            }
        });

        ui.add_space(16.0);
        ui.label(RichText::new("All Classifications").size(18.0).strong());
        ui.add_space(8.0);
        for row in &summary.probabilities {
            ui.horizontal(|ui| {
                ui.label(row.display_name());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(RichText::new(percent(row.probability)).color(MUTED_TEXT));
                    ui.add(
                        egui::ProgressBar::new(row.probability)
                            .desired_width(80.0)
                            .fill(PRIMARY),
                    );
                });
            });
        }
    }
}

impl View for ResultView {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.heading("♻ Classification Results");
        ui.add_space(12.0);

        match &self.panel {
            ResultPanel::Prompt => {
                Self::draw_placeholder(ui, "🗑", "Upload an image to see classification results")
            }
            ResultPanel::Loading => Self::draw_loading(ui),
            ResultPanel::Error(message) => Self::draw_error(ui, message),
            ResultPanel::Result(summary) => Self::draw_summary(ui, summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::types::ClassificationResult;
    use indexmap::IndexMap;

    fn draw_headless(panel: ResultPanel) {
        let ctx = egui::Context::default();
        let mut view = ResultView::new(panel);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| view.draw(ui));
        });
    }

    #[test]
    fn test_draws_every_panel() {
        let result = ClassificationResult {
            label: "uncertain".to_string(),
            confidence: 0.42,
            tags: vec!["🚯 Non-Recyclable".to_string()],
            description: Some("The model is not confident.".to_string()),
            all_probabilities: IndexMap::from([("trash".to_string(), 0.42)]),
        };

        draw_headless(ResultPanel::Prompt);
        draw_headless(ResultPanel::Loading);
        draw_headless(ResultPanel::Error("file too large".to_string()));
        draw_headless(ResultPanel::Result(ResultSummary::from_result(&result)));
    }
}
