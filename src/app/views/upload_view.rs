use egui::{Color32, RichText, Stroke};

use crate::app::views::{View, MUTED_TEXT, PRIMARY};
use crate::state::Model;

/// What the user asked for while the upload panel was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAction {
    ChooseFile,
    Remove,
    Classify,
}

pub struct UploadView<'a> {
    model: &'a Model,
    files_hovering: bool,
    actions: Vec<UploadAction>,
}

impl<'a> UploadView<'a> {
    pub fn new(model: &'a Model, files_hovering: bool) -> Self {
        Self {
            model,
            files_hovering,
            actions: Vec::new(),
        }
    }

    pub fn take_actions(&mut self) -> Vec<UploadAction> {
        std::mem::take(&mut self.actions)
    }

    fn drop_zone_colors(&self) -> (Color32, Color32) {
        if self.model.image.is_some() {
            (
                Color32::from_rgb(240, 253, 244),
                Color32::from_rgb(134, 239, 172),
            )
        } else if self.files_hovering {
            (Color32::from_rgb(240, 253, 244), PRIMARY)
        } else {
            (
                Color32::TRANSPARENT,
                Color32::from_rgb(209, 213, 219),
            )
        }
    }

    fn draw_drop_zone(&mut self, ui: &mut egui::Ui) {
        let (fill, stroke) = self.drop_zone_colors();
        let model = self.model;
        let actions = &mut self.actions;

        egui::Frame::group(ui.style())
            .fill(fill)
            .stroke(Stroke::new(2.0, stroke))
            .show(ui, |ui| {
                ui.set_min_height(260.0);
                ui.vertical_centered(|ui| {
                    ui.add_space(16.0);
                    match &model.image {
                        Some(image) => {
                            ui.add(
                                egui::Image::from_uri(image.preview_uri.clone())
                                    .max_height(192.0)
                                    .maintain_aspect_ratio(true),
                            );
                            ui.label(RichText::new(&image.file.name).color(MUTED_TEXT));
                            ui.add_space(8.0);
                            ui.horizontal(|ui| {
                                if ui.button("Change Image").clicked() {
                                    actions.push(UploadAction::ChooseFile);
                                }
                                if ui.button("Remove").clicked() {
                                    actions.push(UploadAction::Remove);
                                }
                            });
                        }
                        None => {
                            ui.label(RichText::new("📷").size(40.0).color(MUTED_TEXT));
                            ui.add_space(8.0);
                            ui.label(
                                RichText::new("Drop your image here or click to browse")
                                    .strong()
                                    .size(16.0),
                            );
                            ui.label(
                                RichText::new("Supports JPG, PNG, GIF up to 10MB")
                                    .small()
                                    .color(MUTED_TEXT),
                            );
                            ui.add_space(8.0);
                            if ui.button("Choose File").clicked() {
                                actions.push(UploadAction::ChooseFile);
                            }
                        }
                    }
                    ui.add_space(16.0);
                });
            });
    }

    fn draw_classify_button(&mut self, ui: &mut egui::Ui) {
        let loading = self.model.request.is_loading();
        let label = if loading {
            "⏳ Analyzing..."
        } else {
            "🗑 Classify Waste"
        };
        let button = egui::Button::new(RichText::new(label).strong().color(Color32::WHITE))
            .fill(PRIMARY)
            .min_size(egui::vec2(ui.available_width(), 36.0));

        if ui.add_enabled(self.model.can_submit(), button).clicked() {
            self.actions.push(UploadAction::Classify);
        }
    }
}

impl View for UploadView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.heading("⬆ Upload Image");
        ui.add_space(12.0);

        self.draw_drop_zone(ui);

        if self.model.image.is_some() {
            ui.add_space(16.0);
            self.draw_classify_button(ui);
        }
    }
}
