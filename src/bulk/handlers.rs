//! HTTP handlers for the bulk CSV path.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::StreamExt;

use super::csv_template::template_csv;
use super::{parse_records, process_records, BulkError};
use crate::form::classify::classify;
use crate::pdf::handlers::pdf_response;
use crate::pdf::TemplateRenderer;
use crate::{parse_category, AppState, ErrorResponse};

/// Pull the uploaded CSV bytes out of the multipart payload. The first field
/// carrying a filename (or named `file`) wins.
async fn read_csv_upload(mut payload: Multipart) -> Result<Vec<u8>, String> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("Multipart field error: {e}"))?;
        let content_disposition = field
            .content_disposition()
            .ok_or_else(|| "Content disposition not found".to_string())?;

        let is_file = content_disposition.get_filename().is_some()
            || content_disposition.get_name() == Some("file");
        if !is_file {
            continue;
        }

        let mut buffer = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| format!("Failed to read upload: {e}"))?;
            buffer.extend_from_slice(&data);
        }
        return Ok(buffer);
    }

    Err("No CSV file found in multipart payload".to_string())
}

#[utoipa::path(
    context_path = "/api",
    tag = "Render Service",
    post,
    path = "/render/{category}/bulk",
    responses(
        (status = 200, description = "Combined PDF with one record per CSV row", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Unknown category or invalid CSV", body = ErrorResponse),
        (status = 409, description = "A render is already in progress", body = ErrorResponse),
        (status = 500, description = "Render failed", body = ErrorResponse)
    ),
    params(("category" = String, Path, description = "kindergarten or playgroup"))
)]
pub async fn render_bulk(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: Multipart,
) -> impl Responder {
    let category = match parse_category(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let csv_bytes = match read_csv_upload(payload).await {
        Ok(bytes) => bytes,
        Err(e) => return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e)),
    };

    let rows = match parse_records(&csv_bytes) {
        Ok(rows) => rows,
        Err(e) => return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string())),
    };
    log::info!(
        "Bulk render requested for {}: {} records",
        category.slug(),
        rows.len()
    );

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

    let renderer = TemplateRenderer::new(template, "all-student-results");
    let processed = web::block(move || process_records(rows, &renderer)).await;

    match processed {
        Ok(Ok(document)) => pdf_response(document),
        Ok(Err(BulkError::Validation(e))) => {
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()))
        }
        Ok(Err(BulkError::Render(e))) => {
            log::error!("Bulk render failed for {}: {}", category.slug(), e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
        Err(e) => {
            log::error!("Bulk render task failed for {}: {}", category.slug(), e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Form Service",
    get,
    path = "/form/{category}/csv-template",
    responses(
        (status = 200, description = "Reference CSV with canonical headers and example rows", body = String, content_type = "text/csv"),
        (status = 400, description = "Unknown class category", body = ErrorResponse),
        (status = 500, description = "Template unavailable", body = ErrorResponse)
    ),
    params(("category" = String, Path, description = "kindergarten or playgroup"))
)]
pub async fn get_csv_template(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let category = match parse_category(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let template = match state.template(category).await {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to load {} template: {}", category.slug(), e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&e.to_string()));
        }
    };

    let profile = category.profile();
    let partition = classify(&template.field_names(), profile);
    match template_csv(profile, &partition) {
        Ok(csv_text) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                "Content-Disposition",
                format!(
                    "attachment; filename=\"{}-results-template.csv\"",
                    category.slug()
                ),
            ))
            .body(csv_text),
        Err(e) => {
            log::error!("Failed to build template CSV for {}: {}", category.slug(), e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}
