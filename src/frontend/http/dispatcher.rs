use chrono::NaiveDate;
use hyper::{Method, Response, StatusCode, header};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::engine::stats::StatsError;
use crate::frontend::context::FrontendContext;
use crate::shared::datetime::{parse_path_date, storage_date};

use super::routes::Route;

const TEMPLATES_EMPTY: &str = "Template(s) are empty, unable to update statistics";

/// Routes one request. Unknown paths are 404 before authentication is
/// checked; every known route requires a valid API key and `GET`.
pub async fn dispatch(
    method: &Method,
    path: &str,
    auth: Option<&str>,
    ctx: &FrontendContext,
) -> Response<String> {
    let Some(route) = Route::parse(path) else {
        return not_found();
    };
    if ctx.verifier.verify(auth).is_err() {
        return unauthorized();
    }
    if *method != Method::GET {
        return method_not_allowed();
    }

    match route {
        Route::Home => home(ctx).await,
        Route::UpdateLastDay => update_last_day(ctx).await,
        Route::UpdateCurrentMonth => update_current_month(ctx).await,
        Route::UpdateByDay(None) => success("No dates provided, no action taken", json!({})),
        Route::UpdateByDay(Some(dates)) => update_by_day(ctx, &dates).await,
        Route::UpdateNow => update_now(ctx).await,
        Route::Now => now(ctx).await,
    }
}

async fn home(ctx: &FrontendContext) -> Response<String> {
    let current_time = ctx.service.now().format("%Y-%m-%d %H:%M:%S %Z%z").to_string();
    match ctx.service.summary().await {
        Ok(summary) => success(
            "Statistics API is running",
            json!({
                "last_day": summary.map(|(date, _)| storage_date(date)),
                "total_pilgrims": summary.map(|(_, total)| total),
                "current_time": current_time,
            }),
        ),
        Err(e) => failure(e),
    }
}

async fn update_last_day(ctx: &FrontendContext) -> Response<String> {
    info!("Starting LAST DAY update");
    match ctx.service.update_last_day().await {
        Ok(pilgrims) => success("Last day's statistics updated", json!({ "pilgrims": pilgrims })),
        Err(e) => failure(e),
    }
}

async fn update_current_month(ctx: &FrontendContext) -> Response<String> {
    info!("Starting current MONTH update");
    match ctx.service.update_year_month(true).await {
        Ok(pilgrims) => success(
            "Statistics for the current month updated",
            json!({ "pilgrims": pilgrims }),
        ),
        Err(e) => failure(e),
    }
}

async fn update_by_day(ctx: &FrontendContext, raw: &str) -> Response<String> {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for value in raw.split(',') {
        match parse_path_date(value) {
            Ok(date) => dates.push(date),
            Err(_) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("Invalid date format: {value}"),
                );
            }
        }
    }

    match ctx.service.update_dates(&dates).await {
        Ok(pilgrims) => success(
            "Statistics for the list of dates updated",
            json!({ "pilgrims": pilgrims }),
        ),
        Err(e) => failure(e),
    }
}

async fn update_now(ctx: &FrontendContext) -> Response<String> {
    match ctx.service.log_pilgrims_now().await {
        Ok((date, pilgrims)) => success(
            "Pilgrims count updated",
            json!({ "pilgrims": pilgrims, "now": storage_date(date) }),
        ),
        Err(e) => failure(e),
    }
}

async fn now(ctx: &FrontendContext) -> Response<String> {
    match ctx.service.pilgrims_latest().await {
        Ok(latest) => success(
            "Number of pilgrims recorded",
            json!({
                "date": latest.map(|(date, _)| storage_date(date)),
                "pilgrims": latest.map(|(_, pilgrims)| pilgrims),
            }),
        ),
        Err(e) => failure(e),
    }
}

fn success(message: &str, fields: Value) -> Response<String> {
    let mut body = json!({ "status": "success", "message": message });
    if let (Value::Object(body), Value::Object(fields)) = (&mut body, fields) {
        body.extend(fields);
    }
    json_response(StatusCode::OK, body)
}

fn failure(e: StatsError) -> Response<String> {
    if e.is_missing_template() {
        warn!("Template(s) are empty, aborting update");
        return error_response(StatusCode::SERVICE_UNAVAILABLE, TEMPLATES_EMPTY);
    }
    error!("An error occurred: {e}");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &format!("An error occurred: {e}"),
    )
}

fn error_response(status: StatusCode, message: &str) -> Response<String> {
    json_response(status, json!({ "status": "error", "message": message }))
}

fn json_response(status: StatusCode, body: Value) -> Response<String> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn unauthorized() -> Response<String> {
    error_response(StatusCode::UNAUTHORIZED, "Unauthorized")
}

fn method_not_allowed() -> Response<String> {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

fn not_found() -> Response<String> {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}
