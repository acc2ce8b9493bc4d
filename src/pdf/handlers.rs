//! HTTP handlers for single-record PDF rendering.

use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};

use super::common::sanitize_filename;
use super::{GeneratedDocument, RecordRenderer, TemplateRenderer};
use crate::{parse_category, AppState, ErrorResponse};

pub(crate) fn pdf_response(document: GeneratedDocument) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", document.filename),
        ))
        .body(document.pdf)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Render Service",
    post,
    path = "/render/{category}",
    request_body = HashMap<String, String>,
    responses(
        (status = 200, description = "Rendered PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Unknown class category", body = ErrorResponse),
        (status = 409, description = "A render is already in progress", body = ErrorResponse),
        (status = 500, description = "Render failed", body = ErrorResponse)
    ),
    params(("category" = String, Path, description = "kindergarten or playgroup"))
)]
pub async fn render_form(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: Option<web::Json<HashMap<String, String>>>,
) -> impl Responder {
    let category = match parse_category(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    // Single-flight: reject rather than queue a second render.
    let _permit = match state.render_gate.clone().try_acquire_owned() {
        Ok(permit) => permit,
        Err(_) => {
            return HttpResponse::Conflict()
                .json(ErrorResponse::conflict("A render is already in progress"));
        }
    };

    let template = match state.template(category).await {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to load {} template: {}", category.slug(), e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&e.to_string()));
        }
    };

    let fields = match body {
        Some(json) => json.into_inner(),
        None => state.form(category).snapshot(),
    };

    let fallback = category.profile().fallback_pdf_name;
    let output_name = match fields.get("name").filter(|name| !name.trim().is_empty()) {
        Some(name) => format!("{}-result", sanitize_filename(name, "student")),
        None => fallback.trim_end_matches(".pdf").to_string(),
    };

    let renderer = TemplateRenderer::new(template, output_name);
    let rendered = web::block(move || renderer.render(&[fields])).await;

    match rendered {
        Ok(Ok(document)) => pdf_response(document),
        Ok(Err(e)) => {
            log::error!("Render failed for {}: {}", category.slug(), e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
        Err(e) => {
            log::error!("Render task failed for {}: {}", category.slug(), e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}
