use actix_cors::Cors;
use actix_web::{error::InternalError, web, App, HttpResponse, HttpServer, Result as ActixResult};
use pawmatch_core::{Error, UserPreferences};
use pawmatch_recommend::Recommender;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

/// Upper bound on `limit` in a recommend request
pub const MAX_LIMIT: usize = 50;

#[derive(Deserialize)]
struct RecommendRequest {
    #[serde(flatten)]
    preferences: UserPreferences,
    limit: Option<usize>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        recommender: Arc<Recommender>,
        port: u16,
    ) -> std::io::Result<()> {
        info!("Serving recommendations on 0.0.0.0:{}", port);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(recommender.clone()))
                .configure(RestApi::configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Routes and extractor config; the recommender is supplied as app data
    pub fn configure(cfg: &mut web::ServiceConfig) {
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let body = serde_json::json!({ "error": err.to_string() });
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        });

        cfg.app_data(json_config)
            .route("/health", web::get().to(health))
            .route("/clusters", web::get().to(list_clusters))
            .route("/recommend", web::post().to(recommend));
    }
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok"
    })))
}

async fn list_clusters(
    recommender: web::Data<Arc<Recommender>>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": recommender.cluster_summary()
    })))
}

async fn recommend(
    recommender: web::Data<Arc<Recommender>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    let limit = match req.limit {
        Some(0) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "limit must be at least 1"
            })));
        }
        Some(n) => n.min(MAX_LIMIT),
        None => recommender.config().display_count,
    };

    match recommender.recommend_limited(&req.preferences, limit) {
        Ok(recommendation) => Ok(HttpResponse::Ok().json(recommendation)),
        Err(Error::EmptyDataset) => Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "no data available"
        }))),
        Err(e) => {
            error!("Recommendation failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use pawmatch_classifier::ClusterClassifier;
    use pawmatch_core::{AnimalRecord, ClusterId, Dataset, Feature, FeatureVector};
    use pawmatch_recommend::{ClusterLabels, RecommendConfig};
    use serde_json::{json, Value};

    struct FixedClassifier(i64);

    impl ClusterClassifier for FixedClassifier {
        fn predict(&self, _features: &FeatureVector) -> ClusterId {
            ClusterId(self.0)
        }

        fn n_clusters(&self) -> usize {
            1
        }
    }

    fn animal(row: usize, cluster: i64, age: Feature, size: f64) -> AnimalRecord {
        let features = FeatureVector::from_fn(|f| {
            if f == age {
                1.0
            } else if f == Feature::SizeGroupOrd {
                size
            } else {
                0.0
            }
        });
        AnimalRecord::new(row, features, ClusterId(cluster)).with_name(format!("pet-{}", row))
    }

    fn recommender(records: Vec<AnimalRecord>) -> Arc<Recommender> {
        Arc::new(
            Recommender::new(
                Dataset::new(records),
                Box::new(FixedClassifier(0)),
                ClusterLabels::default(),
                RecommendConfig::default(),
            )
            .unwrap(),
        )
    }

    fn shelter() -> Arc<Recommender> {
        recommender(
            (0..8)
                .map(|i| animal(i, (i % 2) as i64, Feature::AgeGroupBaby, 1.0))
                .collect(),
        )
    }

    fn body() -> Value {
        json!({
            "size": "medium",
            "age": "baby",
            "has_dogs": true,
            "has_cats": false,
            "has_kids": true,
            "activity": "moderate",
            "social": "friendly"
        })
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().configure(RestApi::configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["status"], "ok");
    }

    #[actix_web::test]
    async fn test_recommend() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(shelter()))
                .configure(RestApi::configure),
        )
        .await;
        let req = test::TestRequest::post().uri("/recommend").set_json(body()).to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["predicted_cluster"], 0);
        assert_eq!(resp["predicted_label"], "Sociable and calm");
        assert_eq!(resp["relaxation"], "exact");
        assert_eq!(resp["pool_size"], 4);
        let rows: Vec<u64> = resp["candidates"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["row"].as_u64().unwrap())
            .collect();
        assert_eq!(rows, vec![0, 2, 4, 6]);
    }

    #[actix_web::test]
    async fn test_recommend_limit() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(shelter()))
                .configure(RestApi::configure),
        )
        .await;
        let mut payload = body();
        payload["limit"] = json!(2);
        let req = test::TestRequest::post().uri("/recommend").set_json(payload).to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["candidates"].as_array().unwrap().len(), 2);

        let mut zero = body();
        zero["limit"] = json!(0);
        let req = test::TestRequest::post().uri("/recommend").set_json(zero).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_category_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(shelter()))
                .configure(RestApi::configure),
        )
        .await;
        let mut payload = body();
        payload["size"] = json!("enormous");
        let req = test::TestRequest::post().uri("/recommend").set_json(payload).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_empty_dataset_is_unavailable() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(recommender(Vec::new())))
                .configure(RestApi::configure),
        )
        .await;
        let req = test::TestRequest::post().uri("/recommend").set_json(body()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_clusters() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(shelter()))
                .configure(RestApi::configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/clusters").to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;

        let clusters = resp["result"].as_array().unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0]["id"], 0);
        assert_eq!(clusters[0]["count"], 4);
        assert_eq!(clusters[1]["label"], "Friendly youngsters");
    }
}
