use utoipa::OpenApi;

use crate::routes::{feedback, health, predict};

#[derive(OpenApi)]
#[openapi(info(
    title = "sentir-server",
    description = "Portuguese sentiment analysis API",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(predict::PredictApi::openapi());
    root.merge(feedback::FeedbackApi::openapi());
    root
}
