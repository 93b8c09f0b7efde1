use std::sync::Arc;

use egui::RichText;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError as MpscTryRecvError;
use tracing::{debug, error, info, warn};

use crate::app::views::result_view::ResultView;
use crate::app::views::upload_view::{UploadAction, UploadView};
use crate::app::views::{View, MUTED_TEXT, PRIMARY};
use crate::classifier::{ClassificationResult, Classifier};
use crate::config::Settings;
use crate::error::AppError;
use crate::intake::{ImageFile, PICKER_EXTENSIONS};
use crate::presentation::ResultPanel;
use crate::state::{init, transition, Effect, Model, Msg, RequestId};

pub enum UiUpdate {
    ClassifyDone {
        request_id: RequestId,
        outcome: Result<ClassificationResult, String>,
    },
}

pub struct ClassifierApp {
    model: Model,
    egui_ctx: egui::Context,
    classifier: Arc<dyn Classifier>,
    runtime: Handle,
    ui_update_rx: mpsc::Receiver<UiUpdate>,
    ui_update_tx: mpsc::Sender<UiUpdate>,
}

impl ClassifierApp {
    pub fn new(egui_ctx: egui::Context, classifier: Arc<dyn Classifier>, runtime: Handle) -> Self {
        let (ui_update_tx, ui_update_rx) = mpsc::channel::<UiUpdate>(16);
        let (model, effects) = init();
        let mut app = Self {
            model,
            egui_ctx,
            classifier,
            runtime,
            ui_update_rx,
            ui_update_tx,
        };
        app.run_effects(effects);
        app
    }

    /// Opens the window and blocks until it is closed. Must be called from
    /// inside a tokio runtime; requests are spawned onto it.
    pub fn start_gui(settings: &Settings, classifier: Arc<dyn Classifier>) -> Result<(), AppError> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(egui::vec2(settings.window.width, settings.window.height))
                .with_title(settings.window.title.clone())
                .with_drag_and_drop(true),
            ..Default::default()
        };

        let runtime = Handle::current();

        eframe::run_native(
            &settings.window.title,
            options,
            Box::new(move |cc| {
                egui_extras::install_image_loaders(&cc.egui_ctx);
                Ok(Box::new(ClassifierApp::new(
                    cc.egui_ctx.clone(),
                    classifier,
                    runtime,
                )))
            }),
        )?;

        Ok(())
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn dispatch(&mut self, msg: Msg) {
        debug!("msg: {:?}", msg);
        let (model, effects) = transition(std::mem::take(&mut self.model), msg);
        self.model = model;
        debug!("request state: {:?}, effects: {:?}", self.model.request, effects);
        self.run_effects(effects);
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::LoadPreview { uri, file } => {
                self.egui_ctx.include_bytes(uri, file.bytes);
            }
            Effect::ReleasePreview { uri } => {
                self.egui_ctx.forget_image(&uri);
            }
            Effect::Classify { request_id, file } => {
                info!("Classifying {} (request {})", file.name, request_id);
                let classifier = self.classifier.clone();
                let ui_update_tx = self.ui_update_tx.clone();
                let egui_ctx = self.egui_ctx.clone();
                self.runtime.spawn(async move {
                    let outcome = classifier.classify(&file).await.map_err(|e| {
                        warn!("Classification of {} failed: {}", file.name, e);
                        e.user_message()
                    });
                    if let Err(e) = ui_update_tx
                        .send(UiUpdate::ClassifyDone {
                            request_id,
                            outcome,
                        })
                        .await
                    {
                        error!("Error sending classification result: {}", e);
                    }
                    egui_ctx.request_repaint();
                });
            }
        }
    }

    /// Applies every completed request waiting in the channel.
    pub fn drain_updates(&mut self) {
        loop {
            match self.ui_update_rx.try_recv() {
                Ok(UiUpdate::ClassifyDone {
                    request_id,
                    outcome,
                }) => self.dispatch(Msg::ClassifyDone {
                    request_id,
                    outcome,
                }),
                Err(MpscTryRecvError::Empty) => break,
                Err(MpscTryRecvError::Disconnected) => {
                    error!("Classification update receiver disconnected");
                    break;
                }
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });

        if let Some(file) = dropped.first() {
            match ImageFile::from_dropped(file) {
                Ok(Some(image)) => {
                    info!("Dropped {:?}", image);
                    self.dispatch(Msg::ImageDropped(image));
                }
                Ok(None) => warn!("Dropped file {} has no readable content", file.name),
                Err(e) => warn!("Failed to read dropped file: {}", e),
            }
        }

        hovering
    }

    fn choose_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("images", PICKER_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        match ImageFile::from_path(&path) {
            Ok(image) => {
                info!("Picked {:?}", image);
                self.dispatch(Msg::ImagePicked(image));
            }
            Err(e) => warn!("Failed to read {}: {}", path.display(), e),
        }
    }

    fn handle_upload_action(&mut self, action: UploadAction) {
        match action {
            UploadAction::ChooseFile => self.choose_file(),
            UploadAction::Remove => self.dispatch(Msg::ImageRemoved),
            UploadAction::Classify => self.dispatch(Msg::ClassifyRequested),
        }
    }
}

impl eframe::App for ClassifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_updates();
        let files_hovering = self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    RichText::new("🍃 Waste Classification AI")
                        .size(28.0)
                        .strong()
                        .color(PRIMARY),
                );
                ui.label(
                    RichText::new(
                        "Upload an image of waste to get instant AI-powered classification and recycling guidance",
                    )
                    .color(MUTED_TEXT),
                );
                ui.add_space(8.0);
            });
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Powered by AI • Helping you make better recycling decisions")
                        .color(MUTED_TEXT),
                );
            });
        });

        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                let mut upload_view = UploadView::new(&self.model, files_hovering);
                upload_view.draw(&mut columns[0]);
                actions = upload_view.take_actions();

                egui::ScrollArea::vertical().show(&mut columns[1], |ui| {
                    ResultView::new(ResultPanel::from_state(&self.model.request)).draw(ui);
                });
            });
        });

        for action in actions {
            self.handle_upload_action(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClassifyError, DEFAULT_ERROR_MESSAGE};
    use crate::state::RequestState;
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use std::time::Duration;

    struct FakeClassifier {
        fail: bool,
    }

    #[async_trait]
    impl Classifier for FakeClassifier {
        async fn classify(&self, image: &ImageFile) -> Result<ClassificationResult, ClassifyError> {
            if self.fail {
                return Err(ClassifyError::Rejected {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    detail: None,
                });
            }
            Ok(ClassificationResult {
                label: image.name.trim_end_matches(".png").to_string(),
                confidence: 0.88,
                tags: vec![],
                description: None,
                all_probabilities: IndexMap::new(),
            })
        }
    }

    fn image(name: &str) -> ImageFile {
        ImageFile::new(name, None, b"\x89PNG\r\n\x1a\n".as_slice().into())
    }

    async fn settle(app: &mut ClassifierApp) {
        for _ in 0..100 {
            app.drain_updates();
            if !app.model().request.is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("request never completed");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_classify_round_trip() {
        let mut app = ClassifierApp::new(
            egui::Context::default(),
            Arc::new(FakeClassifier { fail: false }),
            Handle::current(),
        );

        app.dispatch(Msg::ImagePicked(image("glass.png")));
        app.dispatch(Msg::ClassifyRequested);
        assert!(app.model().request.is_loading());

        settle(&mut app).await;

        match &app.model().request {
            RequestState::Succeeded(result) => assert_eq!(result.label, "glass"),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failure_shows_default_message() {
        let mut app = ClassifierApp::new(
            egui::Context::default(),
            Arc::new(FakeClassifier { fail: true }),
            Handle::current(),
        );

        app.dispatch(Msg::ImagePicked(image("glass.png")));
        app.dispatch(Msg::ClassifyRequested);
        settle(&mut app).await;

        assert_eq!(
            app.model().request,
            RequestState::Failed(DEFAULT_ERROR_MESSAGE.to_string())
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_late_response_for_replaced_image_is_dropped() {
        let mut app = ClassifierApp::new(
            egui::Context::default(),
            Arc::new(FakeClassifier { fail: false }),
            Handle::current(),
        );

        app.dispatch(Msg::ImagePicked(image("glass.png")));
        app.dispatch(Msg::ClassifyRequested);
        app.dispatch(Msg::ImagePicked(image("paper.png")));

        tokio::time::sleep(Duration::from_millis(100)).await;
        app.drain_updates();

        assert_eq!(app.model().request, RequestState::Idle);
        assert_eq!(app.model().image.as_ref().unwrap().file.name, "paper.png");
    }
}
