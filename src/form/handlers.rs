//! HTTP handlers for the form field map.

use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::form::autofill::{autofill, Term};
use crate::form::classify::{classify, CategoryPartition};
use crate::form::store::FormSnapshot;
use crate::template::{ClassCategory, GradeScheme};
use crate::{parse_category, AppState, ErrorResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetFieldRequest {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AutofillRequest {
    pub grade: String,
    pub term: Term,
}

/// Write-through: the store is the in-memory truth, persistence happens in
/// the background so responses stay fast.
async fn queue_persist(state: &web::Data<AppState>, category: ClassCategory) {
    let snapshot = FormSnapshot {
        category,
        fields: state.form(category).snapshot(),
    };
    if let Err(e) = state.persist_sender.send(snapshot).await {
        log::error!(
            "Failed to queue {} form state for persistence: {}",
            category.slug(),
            e
        );
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Form Service",
    get,
    path = "/form/{category}",
    responses(
        (status = 200, description = "Current form field map", body = HashMap<String, String>),
        (status = 400, description = "Unknown class category", body = ErrorResponse)
    ),
    params(("category" = String, Path, description = "kindergarten or playgroup"))
)]
pub async fn get_form(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let category = match parse_category(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(state.form(category).snapshot())
}

#[utoipa::path(
    context_path = "/api",
    tag = "Form Service",
    put,
    path = "/form/{category}/field",
    request_body = SetFieldRequest,
    responses(
        (status = 200, description = "Updated form field map", body = HashMap<String, String>),
        (status = 400, description = "Unknown class category", body = ErrorResponse)
    ),
    params(("category" = String, Path, description = "kindergarten or playgroup"))
)]
pub async fn set_field(
    state: web::Data<AppState>,
    path: web::Path<String>,
    item: web::Json<SetFieldRequest>,
) -> impl Responder {
    let category = match parse_category(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    state.form(category).set_field(&item.name, &item.value);
    queue_persist(&state, category).await;
    HttpResponse::Ok().json(state.form(category).snapshot())
}

#[utoipa::path(
    context_path = "/api",
    tag = "Form Service",
    patch,
    path = "/form/{category}",
    request_body = HashMap<String, String>,
    responses(
        (status = 200, description = "Updated form field map", body = HashMap<String, String>),
        (status = 400, description = "Unknown class category", body = ErrorResponse)
    ),
    params(("category" = String, Path, description = "kindergarten or playgroup"))
)]
pub async fn set_fields(
    state: web::Data<AppState>,
    path: web::Path<String>,
    item: web::Json<HashMap<String, String>>,
) -> impl Responder {
    let category = match parse_category(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    state.form(category).set_fields(item.into_inner());
    queue_persist(&state, category).await;
    HttpResponse::Ok().json(state.form(category).snapshot())
}

#[utoipa::path(
    context_path = "/api",
    tag = "Form Service",
    delete,
    path = "/form/{category}",
    responses(
        (status = 200, description = "Form reset to empty", body = HashMap<String, String>),
        (status = 400, description = "Unknown class category", body = ErrorResponse)
    ),
    params(("category" = String, Path, description = "kindergarten or playgroup"))
)]
pub async fn reset_form(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let category = match parse_category(&path) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    state.form(category).reset();
    queue_persist(&state, category).await;
    HttpResponse::Ok().json(state.form(category).snapshot())
}

#[utoipa::path(
    context_path = "/api",
    tag = "Form Service",
    post,
    path = "/form/{category}/autofill",
    request_body = AutofillRequest,
    responses(
        (status = 200, description = "Updated form field map", body = HashMap<String, String>),
        (status = 400, description = "Unknown class category", body = ErrorResponse),
        (status = 500, description = "Template unavailable", body = ErrorResponse)
    ),
    params(("category" = String, Path, description = "kindergarten or playgroup"))
)]
pub async fn autofill_form(
    state: web::Data<AppState>,
    path: web::Path<String>,
    item: web::Json<AutofillRequest>,
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
    let names = template.field_names();
    let partition = classify(&names, profile);
    let subjects = match profile.scheme {
        GradeScheme::TermWise => partition.subjects,
        // Dash-free scalar subjects classify as personal, so the flat scheme
        // targets every vocabulary subject the template declares.
        GradeScheme::Flat => names
            .iter()
            .filter(|name| profile.is_subject(name.as_str()))
            .cloned()
            .collect(),
    };
    let fields = autofill(&item.grade, item.term, &subjects, &partition.traits, profile.scheme);

    state.form(category).set_fields(fields);
    queue_persist(&state, category).await;
    HttpResponse::Ok().json(state.form(category).snapshot())
}

#[utoipa::path(
    context_path = "/api",
    tag = "Form Service",
    get,
    path = "/form/{category}/fields",
    responses(
        (status = 200, description = "Classified template fields", body = CategoryPartition),
        (status = 400, description = "Unknown class category", body = ErrorResponse),
        (status = 500, description = "Template unavailable", body = ErrorResponse)
    ),
    params(("category" = String, Path, description = "kindergarten or playgroup"))
)]
pub async fn get_fields(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
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

    let partition = classify(&template.field_names(), category.profile());
    HttpResponse::Ok().json(partition)
}
