use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tower::ServiceExt;

const EXPORT: &str = "Mercado,Hora de inicio,Data da última resolução,Lucro/Perda (R$)
Futebol / A x B : Resultado da Partida,01-jan-24 10:00,01-jan-24 12:00,50
Futebol / A x C : Handicap,02-jan-24 11:00,02-jan-24 13:00,-20
";

fn app() -> Router {
    let config = configuration::load_config(None).unwrap();
    web_server::app(&config).unwrap()
}

async fn post_report(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/report")
        .header("content-type", "text/csv")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn health_check_responds() {
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn upload_returns_full_report() {
    let (status, json) = post_report(app(), EXPORT).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["trades"].as_array().unwrap().len(), 2);
    assert_eq!(decimal(&json["trades"][1]["cumulative_pnl"]), Decimal::from(30));
    assert_eq!(json["month_bankroll"].as_array().unwrap().len(), 3);
    assert_eq!(json["team_profits"][0]["team"], "B");
    assert_eq!(decimal(&json["summary"]["win_rate_pct"]), Decimal::from(50));
}

#[tokio::test]
async fn repeated_upload_returns_identical_report() {
    let app = app();
    let (_, first) = post_report(app.clone(), EXPORT).await;
    let (_, second) = post_report(app, EXPORT).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_columns_are_unprocessable() {
    let (status, json) = post_report(app(), "Mercado,Lucro/Perda (R$)\nx,1\n").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "missing_columns");
}

#[tokio::test]
async fn malformed_csv_is_a_bad_request() {
    let body = "Mercado,Hora de inicio,Data da última resolução,Lucro/Perda (R$)\nx,1\n";
    let (status, json) = post_report(app(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "csv_syntax");
}

#[tokio::test]
async fn overflowing_totals_are_rejected_and_the_server_keeps_serving() {
    // The running balance returns to zero, the handicap total leaves the decimal range.
    let overflowing = "Mercado,Hora de inicio,Data da última resolução,Lucro/Perda (R$)
Futebol / A x B : Handicap,01-jan-24 10:00,01-jan-24 12:00,50000000000000000000000000000
Futebol / C x D : Escanteios,02-jan-24 10:00,02-jan-24 12:00,-50000000000000000000000000000
Futebol / E x F : Handicap,03-jan-24 10:00,03-jan-24 12:00,50000000000000000000000000000
";
    let app = app();

    let (status, json) = post_report(app.clone(), overflowing).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "calculation");

    let (status, json) = post_report(app, EXPORT).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["trades"].as_array().unwrap().len(), 2);
}
