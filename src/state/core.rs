use uuid::Uuid;

use crate::classifier::types::ClassificationResult;
use crate::intake::ImageFile;

/// Identifies one submission. Only the latest one may update the model.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file: ImageFile,
    pub preview_uri: String,
}

impl SelectedImage {
    pub fn new(file: ImageFile) -> Self {
        let preview_uri = format!("bytes://preview/{}/{}", Uuid::new_v4(), file.name);
        Self { file, preview_uri }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading {
        request_id: RequestId,
    },
    Succeeded(ClassificationResult),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub image: Option<SelectedImage>,
    pub request: RequestState,
    last_request_id: RequestId,
}

impl Model {
    pub fn can_submit(&self) -> bool {
        self.image.is_some() && !self.request.is_loading()
    }
}

#[derive(Debug)]
pub enum Msg {
    ImagePicked(ImageFile),
    ImageDropped(ImageFile),
    ImageRemoved,
    ClassifyRequested,
    ClassifyDone {
        request_id: RequestId,
        outcome: Result<ClassificationResult, String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadPreview { uri: String, file: ImageFile },
    ReleasePreview { uri: String },
    Classify { request_id: RequestId, file: ImageFile },
}

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![])
}

pub fn transition(model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::ImagePicked(file) => select_image(model, file),
        Msg::ImageDropped(file) => {
            if file.is_image() {
                select_image(model, file)
            } else {
                (model, vec![])
            }
        }
        Msg::ImageRemoved => {
            let effects = release_preview(&model);
            (
                Model {
                    image: None,
                    request: RequestState::Idle,
                    ..model
                },
                effects,
            )
        }
        Msg::ClassifyRequested => {
            if !model.can_submit() {
                return (model, vec![]);
            }
            let Some(image) = &model.image else {
                return (model, vec![]);
            };
            let request_id = model.last_request_id + 1;
            let effects = vec![Effect::Classify {
                request_id,
                file: image.file.clone(),
            }];
            (
                Model {
                    request: RequestState::Loading { request_id },
                    last_request_id: request_id,
                    ..model
                },
                effects,
            )
        }
        Msg::ClassifyDone {
            request_id,
            outcome,
        } => match model.request {
            RequestState::Loading {
                request_id: pending,
            } if pending == request_id => {
                let request = match outcome {
                    Ok(result) => RequestState::Succeeded(result),
                    Err(message) => RequestState::Failed(message),
                };
                (Model { request, ..model }, vec![])
            }
            _ => {
                tracing::debug!("Discarding stale response for request {}", request_id);
                (model, vec![])
            }
        },
    }
}

fn select_image(model: Model, file: ImageFile) -> (Model, Vec<Effect>) {
    let mut effects = release_preview(&model);
    let image = SelectedImage::new(file);
    effects.push(Effect::LoadPreview {
        uri: image.preview_uri.clone(),
        file: image.file.clone(),
    });
    (
        Model {
            image: Some(image),
            request: RequestState::Idle,
            ..model
        },
        effects,
    )
}

fn release_preview(model: &Model) -> Vec<Effect> {
    model
        .image
        .iter()
        .map(|image| Effect::ReleasePreview {
            uri: image.preview_uri.clone(),
        })
        .collect()
}
