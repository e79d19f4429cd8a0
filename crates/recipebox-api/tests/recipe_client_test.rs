#![allow(clippy::unwrap_used)]
// Integration tests for `RecipeClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use recipebox_api::{Error, NewRecipe, RecipeClient, RecordId};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RecipeClient) {
    let server = MockServer::start().await;
    let client = RecipeClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn cake() -> NewRecipe {
    NewRecipe {
        title: "Cake".into(),
        ingredients: "flour, sugar, eggs".into(),
        instructions: "mix and bake".into(),
        servings: 8,
        description: "Birthday cake".into(),
        image_url: "https://img.example/cake.jpg".into(),
    }
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_recipes_preserves_server_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 2, "title": "Soup", "ingredients": "water", "instructions": "boil",
                "servings": 4, "description": "Hot", "image_url": "https://img.example/soup.jpg"
            },
            {
                "id": 1, "title": "Pasta", "ingredients": "flour", "instructions": "roll",
                "servings": 2, "description": null, "image_url": null
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let recipes = client.list_recipes().await.unwrap();

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].id, RecordId::Int(2));
    assert_eq!(recipes[0].title, "Soup");
    assert_eq!(recipes[1].id, RecordId::Int(1));
    assert_eq!(recipes[1].description, None);
}

#[tokio::test]
async fn test_list_recipes_server_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/recipes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.list_recipes().await;

    match result {
        Err(Error::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_recipes_bad_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client.list_recipes().await;

    match result {
        Err(Error::Deserialization { body, .. }) => assert!(body.contains("not json")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = RecipeClient::from_reqwest(&uri, reqwest::Client::new()).unwrap();
    let result = client.list_recipes().await;

    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_recipe_unwraps_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/recipes"))
        .and(body_json(json!({
            "title": "Cake",
            "ingredients": "flour, sugar, eggs",
            "instructions": "mix and bake",
            "servings": 8,
            "description": "Birthday cake",
            "image_url": "https://img.example/cake.jpg"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Recipe added successfully",
            "recipe": {
                "id": 3, "title": "Cake", "ingredients": "flour, sugar, eggs",
                "instructions": "mix and bake", "servings": 8,
                "description": "Birthday cake", "image_url": "https://img.example/cake.jpg"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_recipe(&cake()).await.unwrap();

    assert_eq!(created.id, RecordId::Int(3));
    assert_eq!(created.title, "Cake");
}

#[tokio::test]
async fn test_create_recipe_missing_field_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/recipes"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": "Missing required field: 'title'" })),
        )
        .mount(&server)
        .await;

    let result = client.create_recipe(&cake()).await;

    match result {
        Err(Error::Server { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Missing required field: 'title'");
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_recipe_returns_server_record() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/recipes/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Recipe updated successfully",
            "recipe": {
                "id": 3, "title": "Cake (server)", "ingredients": "flour",
                "instructions": "bake", "servings": 6,
                "description": "normalized", "image_url": "https://img.example/cake.jpg"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client.update_recipe(&RecordId::Int(3), &cake()).await.unwrap();

    assert_eq!(updated.title, "Cake (server)");
    assert_eq!(updated.servings, Some(6));
}

#[tokio::test]
async fn test_update_missing_recipe_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/recipes/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Recipe not found" })),
        )
        .mount(&server)
        .await;

    let err = client
        .update_recipe(&RecordId::Int(99), &cake())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_recipe_success() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/recipes/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Recipe deleted successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.delete_recipe(&RecordId::Int(2)).await.unwrap();
}

#[tokio::test]
async fn test_delete_recipe_empty_error_body_uses_status_text() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/recipes/2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client.delete_recipe(&RecordId::Int(2)).await;

    match result {
        Err(Error::Server { status, message }) => {
            assert_eq!(status, 503);
            assert!(message.contains("503"), "message was {message:?}");
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}
