//! In-memory stand-in for the eActivities API.
//!
//! Serves a single test club, "RCC Ferret Fanciers" (centre `170`), with
//! reports for the `14-15` academic year, using the same wire shapes as the
//! real service: PascalCase fields, offset-less date/times and bare numeric
//! money. Every route demands the configured `X-API-Key`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json,
};
pub use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, warn};

pub const API_KEY_HEADER: &str = "X-API-Key";
pub const FERRET_FANCIERS: &str = "170";
pub const FIXTURE_YEAR: &str = "14-15";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CspInfo {
    pub code: String,
    pub name: String,
    pub web_name: String,
    pub acronym: String,
}

/// Failure body, shaped like the real service's.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

type Failure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, message: &str) -> Failure {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
}

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
}

#[derive(Deserialize)]
struct YearQuery {
    year: Option<String>,
}

/// Router that accepts `api_key` and serves the fixture club.
pub fn app(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
    };
    Router::new()
        .route("/CSP", get(list_csps))
        .route("/CSP/{centre}", get(csp_details))
        .route("/CSP/{centre}/reports/{report}", get(report))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

/// Router that refuses every request with 403 and `message`, the way the
/// service answers a banned address.
pub fn banned(message: &str) -> Router {
    let message: Arc<str> = Arc::from(message);
    Router::new().fallback(move || {
        let message = Arc::clone(&message);
        async move { failure(StatusCode::FORBIDDEN, &message) }
    })
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    serve(listener, app(api_key)).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented != Some(&*state.api_key) {
        warn!(uri = %request.uri(), "rejected request with missing or wrong API key");
        return failure(StatusCode::FORBIDDEN, "Invalid API key").into_response();
    }
    debug!(uri = %request.uri(), "serving request");
    next.run(request).await
}

fn ferret_fanciers() -> CspInfo {
    CspInfo {
        code: FERRET_FANCIERS.to_string(),
        name: "RCC Ferret Fanciers (TEST CLUB)".to_string(),
        web_name: "Ferrets".to_string(),
        acronym: "RFF".to_string(),
    }
}

async fn list_csps() -> Json<Vec<CspInfo>> {
    Json(vec![ferret_fanciers()])
}

async fn csp_details(Path(centre): Path<String>) -> Result<Json<CspInfo>, Failure> {
    if centre != FERRET_FANCIERS {
        return Err(failure(StatusCode::NOT_FOUND, "CSP not found"));
    }
    Ok(Json(ferret_fanciers()))
}

async fn report(
    Path((centre, report)): Path<(String, String)>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Value>, Failure> {
    if centre != FERRET_FANCIERS {
        return Err(failure(StatusCode::NOT_FOUND, "CSP not found"));
    }
    let year = query
        .year
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "year is required"))?;
    if !is_year_label(&year) {
        return Err(failure(StatusCode::BAD_REQUEST, "Invalid year"));
    }
    let rows = match report.as_str() {
        "committee" => committee(),
        "members" => members(),
        "onlinesales" => online_sales(),
        "transactionlines" => transaction_lines(),
        _ => return Err(failure(StatusCode::NOT_FOUND, "Unknown report")),
    };
    if year == FIXTURE_YEAR {
        Ok(Json(rows))
    } else {
        Ok(Json(json!([])))
    }
}

fn is_year_label(year: &str) -> bool {
    match year.split_once('-') {
        Some((start, end)) => {
            [start, end]
                .iter()
                .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
        }
        None => false,
    }
}

fn committee() -> Value {
    json!([{
        "FirstName": "Joe",
        "Surname": "Bloggs",
        "CID": "00000000",
        "Email": "joe.bloggs50@imperial.ac.uk",
        "Login": "jbloggs50",
        "PostName": "Chief Ferret Fancier",
        "PhoneNo": "02075948060",
        "StartDate": "2014-08-01 00:00:00",
        "EndDate": "2015-07-31 23:59:59"
    }])
}

fn members() -> Value {
    json!([{
        "FirstName": "Joe",
        "Surname": "Bloggs",
        "CID": "00000000",
        "Email": "joe.bloggs50@imperial.ac.uk",
        "Login": "jbloggs50",
        "OrderNo": 1000,
        "MemberType": "Full"
    }])
}

fn online_sales() -> Value {
    json!([{
        "OrderNumber": "1000",
        "SaleDateTime": "2015-06-20 19:00:00",
        "ProductID": 1234,
        "ProductLineID": 4567,
        "Price": 30,
        "Quantity": 1,
        "QuantityCollected": 0,
        "Customer": {
            "FirstName": "Joe",
            "Surname": "Bloggs",
            "CID": "00000000",
            "Email": " joe.bloggs50@imperial.ac.uk ",
            "Login": "jbloggs50"
        },
        "VAT": {
            "Code": "S1",
            "Name": "S1 – Sales Standard Rated",
            "Rate": 20
        }
    }])
}

fn transaction_lines() -> Value {
    json!([
        {
            "TransID": 234567,
            "TransDate": "2015-06-20",
            "Document": "CF 12345 (234567)",
            "Description": "Pens and card for making signs",
            "Amount": -234,
            "Funding": { "Code": "0", "Name": "Grant (0)" },
            "Activity": { "Code": "00", "Name": "General (0)" },
            "Account": { "Code": "860", "Name": "Stationery (860)", "Type": "Expenditure" },
            "Pending": true,
            "Outstanding": false
        },
        {
            "TransID": 234568,
            "TransDate": "2015-03-29",
            "Document": "SI 2001 (234568)",
            "Description": "Ferret show entry fees",
            "Amount": "120.50",
            "Funding": { "Code": "2", "Name": "Self-generated (2)" },
            "Activity": { "Code": "01", "Name": "Shows (1)" },
            "Account": { "Code": "400", "Name": "Sales (400)", "Type": "Income" },
            "Pending": false,
            "Outstanding": true
        }
    ])
}
