use crate::helpers::{spawn_app, user_form};

#[tokio::test]
async fn deleting_an_unknown_user_returns_404() {
    let app = spawn_app().await;

    let response = app.delete_api_user("12345").await;

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"error": "User not found"}));
}

#[tokio::test]
async fn deleting_a_user_removes_row_and_image() {
    let app = spawn_app().await;
    let user = app.create_user("Ana", "ana@x.com", Some("me.png")).await;
    let image = user.profile_image.clone().unwrap();
    assert!(app.upload_path(&image).exists());

    let response = app.delete_api_user(&user.id.to_string()).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User deleted successfully");
    assert!(app.store.rows().is_empty());
    assert!(!app.upload_path(&image).exists());
}

#[tokio::test]
async fn deleting_a_user_without_image_leaves_other_files_alone() {
    let app = spawn_app().await;
    let with_image = app.create_user("Ana", "ana@x.com", Some("me.png")).await;
    let without_image = app.create_user("Bea", "bea@x.com", None).await;

    app.delete_api_user(&without_image.id.to_string()).await;

    assert_eq!(
        app.uploaded_files(),
        vec![with_image.profile_image.unwrap()]
    );
}

#[tokio::test]
async fn users_are_listed_most_recent_first() {
    let app = spawn_app().await;
    app.create_user("First", "first@x.com", None).await;
    app.create_user("Second", "second@x.com", None).await;

    let users = app.get_api_users().await;

    let names: Vec<&str> = users.iter().map(|u| u["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[tokio::test]
async fn unknown_or_malformed_ids_return_404() {
    let app = spawn_app().await;

    for id in ["42", "not-a-number"] {
        let response = app.get(&format!("/api/users/{id}")).await;
        assert_eq!(response.status().as_u16(), 404, "id {id}");
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "User not found");
    }
}

#[tokio::test]
async fn json_update_round_trip() {
    let app = spawn_app().await;
    let user = app.create_user("Ana", "ana@x.com", None).await;

    let response = app
        .api_client
        .put(format!("{}/api/users/{}", app.address, user.id))
        .json(&serde_json::json!({"name": "Ana Maria", "email": "ana.maria@x.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let fetched: user_directory::domain::User = app
        .get(&format!("/api/users/{}", user.id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.name, "Ana Maria");
    assert_eq!(fetched.email, "ana.maria@x.com");
    assert_eq!(fetched.created_at, user.created_at);
    assert!(fetched.updated_at > user.updated_at);
}

#[tokio::test]
async fn json_update_can_remove_the_image() {
    let app = spawn_app().await;
    let user = app.create_user("Ana", "ana@x.com", Some("me.png")).await;

    let response = app
        .api_client
        .put(format!("{}/api/users/{}", app.address, user.id))
        .json(&serde_json::json!({"name": "Ana", "email": "ana@x.com", "removeImage": true}))
        .send()
        .await
        .unwrap();

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["profile_image"].is_null());
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn json_update_accepts_remove_image_as_a_string() {
    let app = spawn_app().await;
    let user = app.create_user("Ana", "ana@x.com", Some("me.png")).await;

    let response = app
        .api_client
        .put(format!("{}/api/users/{}", app.address, user.id))
        .json(&serde_json::json!({"name": "Ana", "email": "ana@x.com", "removeImage": "true"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["profile_image"].is_null());
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn multipart_update_through_the_api() {
    let app = spawn_app().await;
    let user = app.create_user("Ana", "ana@x.com", None).await;

    let response = app
        .api_client
        .put(format!("{}/api/users/{}", app.address, user.id))
        .multipart(user_form("Ana", "ana@x.com").part("profileImage", crate::helpers::png_part("a.gif")))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let image = body["profile_image"].as_str().unwrap().to_string();
    assert_eq!(app.uploaded_files(), vec![image]);
}

#[tokio::test]
async fn invalid_update_returns_400() {
    let app = spawn_app().await;
    let user = app.create_user("Ana", "ana@x.com", None).await;

    let response = app
        .api_client
        .put(format!("{}/api/users/{}", app.address, user.id))
        .json(&serde_json::json!({"name": "", "email": "ana@x.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Name and email are required");
}

#[tokio::test]
async fn updating_an_unknown_user_returns_404() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .put(format!("{}/api/users/7", app.address))
        .json(&serde_json::json!({"name": "Ana", "email": "ana@x.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn store_outage_returns_500_without_details() {
    let app = spawn_app().await;
    app.store.set_unavailable(true);

    let response = app.get("/api/users").await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
}
