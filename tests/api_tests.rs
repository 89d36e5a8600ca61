use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use petconnect_api::data::database::{Database, DatabaseConfig};
use petconnect_api::domain::pet::Pet;
use petconnect_api::presentation::handlers::{AppState, GREETING};
use petconnect_api::presentation::middleware::RequestTracing;
use petconnect_api::presentation::{configure, cors};
use serde_json::json;

macro_rules! setup_test {
    () => {{
        let database = Database::connect(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        let state = web::Data::new(AppState::new(database.clone()));

        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .wrap(cors())
                .wrap(RequestTracing)
                .configure(configure),
        )
        .await;

        (app, database)
    }};
}

fn rex(shelter_id: i64) -> serde_json::Value {
    json!({
        "name": "Rex",
        "breed": "Lab",
        "age": 3,
        "pet_type": "Dog",
        "shelter_id": shelter_id
    })
}

#[actix_web::test]
async fn test_home_returns_greeting() {
    let (app, _db) = setup_test!();

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, GREETING.as_bytes());
}

#[actix_web::test]
async fn test_register_add_pet_list_scenario() {
    let (app, _db) = setup_test!();

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({
            "name": "A",
            "email": "a@x.com",
            "password": "p",
            "role": "shelter"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/add_pet")
        .set_json(rex(1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Pet added successfully!" }));

    let req = test::TestRequest::get().uri("/pets").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!([{
            "id": 1,
            "name": "Rex",
            "breed": "Lab",
            "age": 3,
            "description": "",
            "image_url": "",
            "pet_type": "Dog",
            "shelter_id": 1
        }])
    );
}

#[actix_web::test]
async fn test_list_pets_empty() {
    let (app, _db) = setup_test!();

    let req = test::TestRequest::get().uri("/pets").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_add_pet_with_unknown_shelter_succeeds() {
    let (app, _db) = setup_test!();

    let req = test::TestRequest::post()
        .uri("/add_pet")
        .set_json(rex(4242))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/pets").to_request();
    let pets: Vec<Pet> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].shelter_id, 4242);
}

#[actix_web::test]
async fn test_list_returns_every_added_pet_with_all_fields() {
    let (app, _db) = setup_test!();

    let req = test::TestRequest::post()
        .uri("/add_pet")
        .set_json(json!({
            "name": "Tom",
            "breed": "Siamese",
            "age": 2,
            "pet_type": "Cat",
            "shelter_id": 1,
            "description": "Loves naps",
            "image_url": "https://img.example.com/tom.png"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    for _ in 0..4 {
        let req = test::TestRequest::post()
            .uri("/add_pet")
            .set_json(rex(1))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/pets").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let pets = body.as_array().unwrap();
    assert_eq!(pets.len(), 5);

    let fields = [
        "id",
        "name",
        "breed",
        "age",
        "description",
        "image_url",
        "pet_type",
        "shelter_id",
    ];
    for pet in pets {
        let object = pet.as_object().unwrap();
        assert_eq!(object.len(), fields.len());
        for field in fields {
            assert!(object.contains_key(field), "missing {}", field);
        }
    }

    assert_eq!(pets[0]["description"], "Loves naps");
    assert_eq!(pets[0]["image_url"], "https://img.example.com/tom.png");
    assert_eq!(pets[1]["description"], "");
    assert_eq!(pets[1]["image_url"], "");
}

#[actix_web::test]
async fn test_add_pet_missing_field_is_rejected() {
    let (app, _db) = setup_test!();

    let req = test::TestRequest::post()
        .uri("/add_pet")
        .set_json(json!({
            "name": "Rex",
            "breed": "Lab",
            "age": 3,
            "pet_type": "Dog"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["field"], "shelter_id");

    let req = test::TestRequest::get().uri("/pets").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_add_pet_null_optional_fields_default_to_empty() {
    let (app, _db) = setup_test!();

    let mut pet = rex(1);
    pet["description"] = json!(null);
    pet["image_url"] = json!(null);
    let req = test::TestRequest::post()
        .uri("/add_pet")
        .set_json(pet)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/pets").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["description"], "");
    assert_eq!(body[0]["image_url"], "");
}

#[actix_web::test]
async fn test_add_pet_accepts_empty_breed_and_negative_age() {
    let (app, _db) = setup_test!();

    let mut pet = rex(1);
    pet["breed"] = json!("");
    pet["age"] = json!(-1);
    let req = test::TestRequest::post()
        .uri("/add_pet")
        .set_json(pet)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/pets").to_request();
    let pets: Vec<Pet> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(pets[0].breed, "");
    assert_eq!(pets[0].age, -1);
}

#[actix_web::test]
async fn test_add_pet_wrong_age_type_is_rejected() {
    let (app, _db) = setup_test!();

    let mut pet = rex(1);
    pet["age"] = json!("three");
    let req = test::TestRequest::post()
        .uri("/add_pet")
        .set_json(pet)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["details"]["reason"].as_str().unwrap().contains("invalid type"));
}

#[actix_web::test]
async fn test_add_pet_store_failure_is_generic_server_error() {
    let (app, db) = setup_test!();
    sqlx::query("DROP TABLE pet")
        .execute(db.pool())
        .await
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/add_pet")
        .set_json(rex(1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Failed to add pet." }));
}

#[actix_web::test]
async fn test_health_reports_database_state() {
    let (app, db) = setup_test!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert!(body.get("timestamp").is_some());

    db.close().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["database"], "unreachable");
}

#[actix_web::test]
async fn test_responses_carry_tracing_headers() {
    let (app, _db) = setup_test!();

    let req = test::TestRequest::get().uri("/pets").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.headers().contains_key("x-request-id"));
    let timing = resp.headers().get("x-response-time").unwrap();
    assert!(timing.to_str().unwrap().ends_with("ms"));
}

#[actix_web::test]
async fn test_cors_allows_any_origin() {
    let (app, _db) = setup_test!();

    let req = test::TestRequest::get()
        .uri("/pets")
        .insert_header(("Origin", "http://frontend.example.org"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("access-control-allow-origin"));

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/register")
        .insert_header(("Origin", "http://another.example.net"))
        .insert_header(("Access-Control-Request-Method", "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}
