use utoipa::OpenApi;

use crate::routes::{chat, health, submit_form};

#[derive(OpenApi)]
#[openapi(info(
    title = "vertex-server",
    description = "Contact form intake and AI chat relay for the Vertex Engineering Labs site",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(submit_form::SubmitFormApi::openapi());
    root.merge(chat::ChatApi::openapi());
    root
}
