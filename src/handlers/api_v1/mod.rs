pub mod presentations;
pub mod slides;

use actix_web::{
    Error, HttpRequest, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error::{InternalError, JsonPayloadError},
    http::Method,
    middleware::Next,
    web,
};

use crate::templates_structs::ApiErrorResponse;

/// Rejects POST/PUT/PATCH/DELETE requests without `Content-Type: application/json`.
/// GET requests pass through.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == Method::POST || method == Method::PUT || method == Method::PATCH || method == Method::DELETE {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = ApiErrorResponse {
                error: "Content-Type must be application/json for mutation requests".to_string(),
                details: None,
            };
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Malformed or mistyped JSON bodies become a 400 in the usual error shape.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let body = ApiErrorResponse {
        error: "Invalid request body".to_string(),
        details: Some(err.to_string()),
    };
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Configure the presentation editor API under `/api/v1/ppt`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/ppt")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/slide/edit", web::post().to(slides::edit))
            .route("/slide/edit-html", web::post().to(slides::edit_html))
            .route("/slide/save-html-variant", web::post().to(slides::save_html_variant))
            .route("/slide/text-variants", web::post().to(slides::text_variants))
            .route("/slide/layout-variants", web::post().to(slides::layout_variants))
            .route("/slide/{id}", web::get().to(slides::read))
            .route("/presentation/all", web::get().to(presentations::list))
            .route("/presentation/{id}", web::get().to(presentations::read)),
    );
}
