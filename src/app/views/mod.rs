pub mod result_view;
pub mod upload_view;

use egui::Color32;

pub trait View {
    fn draw(&mut self, ui: &mut egui::Ui);
}

pub(crate) const PRIMARY: Color32 = Color32::from_rgb(22, 163, 74);
pub(crate) const MUTED_TEXT: Color32 = Color32::from_rgb(107, 114, 128);
