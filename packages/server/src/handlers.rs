//! HTTP handler functions for the dashboard API.

use actix_web::{HttpResponse, web};
use bike_lane_analytics::render;
use bike_lane_request_models::FilterCriteria;
use bike_lane_server_models::{
    ApiControls, ApiError, ApiHealth, DashboardQueryParams, DashboardTab,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/controls`
///
/// Returns the input controls and their defaults.
pub async fn controls(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiControls::new(state.context.board_options()))
}

/// `GET /api/boards`
///
/// Returns the board dropdown options, `"All"` first.
pub async fn boards(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.context.board_options())
}

/// `GET /api/dashboard`
///
/// Renders the chart, table preview and map for the supplied controls.
pub async fn dashboard(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    let criteria = match FilterCriteria::from_controls(
        params.start.as_deref(),
        params.end.as_deref(),
        params.board.as_deref(),
        params.min_entries,
    ) {
        Ok(criteria) => criteria,
        Err(e) => {
            log::debug!("Rejected dashboard query: {e}");
            return HttpResponse::BadRequest().json(ApiError {
                error: e.to_string(),
            });
        }
    };

    HttpResponse::Ok().json(render(&state.context, &criteria))
}

/// `GET /api/boundaries`
///
/// Returns the community board `GeoJSON` exactly as loaded.
pub async fn boundaries(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/geo+json")
        .body(state.boundaries_body.clone())
}

/// `GET /api/pages`
///
/// Lists every tab's static content in navigation order.
pub async fn pages(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.pages.as_slice())
}

/// `GET /api/pages/{name}`
pub async fn page(state: web::Data<AppState>, name: web::Path<String>) -> HttpResponse {
    let Ok(tab) = name.parse::<DashboardTab>() else {
        return HttpResponse::NotFound().json(ApiError {
            error: format!("Unknown page '{name}'"),
        });
    };

    match state.pages.iter().find(|p| p.tab == tab) {
        Some(page) => HttpResponse::Ok().json(page),
        None => {
            log::error!("No content registered for tab {tab}");
            HttpResponse::NotFound().json(ApiError {
                error: format!("Unknown page '{name}'"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use bike_lane_dataset::{CommunityBoardBoundaries, DashboardContext, load_records_from_reader};
    use serde_json::Value;

    use crate::{AppState, configure};

    const CSV: &str = "\
dateTime,index_,MinutesElapsed,cboard_name,WeekBin,Year,latitude,longitude,incident_address
2023-03-01,5,20,B1,8,2023,40.69,-73.98,1 MAIN ST
2023-06-01,10,45,B2,21,2023,40.75,-73.95,2 MAIN ST
";

    const BOUNDARIES: &str = r#"{"type":"FeatureCollection","features":[]}"#;

    fn state() -> web::Data<AppState> {
        let records = load_records_from_reader(CSV.as_bytes()).unwrap();
        let boundaries = CommunityBoardBoundaries::parse(BOUNDARIES.to_string()).unwrap();
        web::Data::new(AppState::new(DashboardContext::new(records, boundaries)).unwrap())
    }

    async fn get_json(uri: &str) -> (u16, Value) {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status().as_u16();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn dashboard_defaults_include_every_2023_request() {
        let (status, body) = get_json("/api/dashboard").await;
        assert_eq!(status, 200);
        assert_eq!(body["table"]["totalRows"], 2);
        assert_eq!(body["map"]["markers"].as_array().unwrap().len(), 2);
        assert_eq!(body["criteria"]["minEntries"], 3);
    }

    #[actix_web::test]
    async fn dashboard_filters_by_board() {
        let (status, body) = get_json("/api/dashboard?board=B1&minEntries=7").await;
        assert_eq!(status, 200);
        assert_eq!(body["table"]["totalRows"], 1);
        assert_eq!(body["table"]["rows"][0]["communityBoardName"], "B1");
        assert_eq!(body["map"]["zoom"], 13.0);
        assert_eq!(body["criteria"]["minEntries"], 7);
    }

    #[actix_web::test]
    async fn dashboard_empty_range_still_renders() {
        let (status, body) = get_json("/api/dashboard?start=2020-01-01&end=2020-12-31").await;
        assert_eq!(status, 200);
        assert_eq!(body["table"]["totalRows"], 0);
        assert_eq!(body["map"]["centerSource"], "default");
        assert!(body["chart"]["data"]["series"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn dashboard_rejects_bad_input() {
        let (status, body) = get_json("/api/dashboard?start=yesterday").await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("yesterday"));

        let (status, _) = get_json("/api/dashboard?minEntries=11").await;
        assert_eq!(status, 400);

        let (status, body) = get_json("/api/dashboard?minEntries=lots").await;
        assert_eq!(status, 400);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn boards_lead_with_all() {
        let (status, body) = get_json("/api/boards").await;
        assert_eq!(status, 200);
        assert_eq!(body, serde_json::json!(["All", "B1", "B2"]));
    }

    #[actix_web::test]
    async fn controls_describe_defaults() {
        let (_, body) = get_json("/api/controls").await;
        assert_eq!(body["dateRange"]["defaultStart"], "2023-01-01");
        assert_eq!(body["minEntries"]["max"], 10);
        assert_eq!(body["board"]["options"][1], "B1");
    }

    #[actix_web::test]
    async fn boundaries_pass_through_unchanged() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/boundaries").to_request(),
        )
        .await;
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/geo+json"
        );
        let body = test::read_body(resp).await;
        assert_eq!(body, BOUNDARIES.as_bytes());
    }

    #[actix_web::test]
    async fn pages_are_served_by_name() {
        let (status, body) = get_json("/api/pages").await;
        assert_eq!(status, 200);
        assert_eq!(body.as_array().unwrap().len(), 4);

        let (status, body) = get_json("/api/pages/sources").await;
        assert_eq!(status, 200);
        assert_eq!(body["title"], "Sources");

        let (status, _) = get_json("/api/pages/settings").await;
        assert_eq!(status, 404);
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let (status, body) = get_json("/api/health").await;
        assert_eq!(status, 200);
        assert_eq!(body["healthy"], true);
    }
}
