use reqwest::multipart::Part;

use crate::helpers::{png_part, spawn_app, user_form, MAX_UPLOAD_SIZE};

#[tokio::test]
async fn creating_a_user_without_image_redirects_to_the_list() {
    let app = spawn_app().await;

    let response = app.post_user(user_form("Ana", "ana@x.com")).await;

    assert_eq!(response.status().as_u16(), 302);
    let location = response.headers()["location"].to_str().unwrap();
    assert!(location.starts_with("/?success="), "{location}");

    let users = app.get_api_users().await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "Ana");
    assert_eq!(users[0]["email"], "ana@x.com");
    assert!(users[0]["profile_image"].is_null());
    assert!(users[0]["id"].as_i64().is_some());
}

#[tokio::test]
async fn created_user_is_readable_by_id_and_email() {
    let app = spawn_app().await;

    let user = app.create_user("Ana", "ana@x.com", None).await;

    let by_id: serde_json::Value = app
        .get(&format!("/api/users/{}", user.id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(by_id["name"], "Ana");
    assert_eq!(by_id["email"], "ana@x.com");
    assert_eq!(app.store.rows()[0].id, user.id);
}

#[tokio::test]
async fn uploaded_image_is_stored_and_served() {
    let app = spawn_app().await;

    let user = app.create_user("Ana", "ana@x.com", Some("me.png")).await;

    let filename = user.profile_image.expect("image reference");
    assert!(filename.starts_with("profile-"));
    assert!(filename.ends_with(".png"));
    assert_eq!(app.uploaded_files(), vec![filename.clone()]);

    let response = app.get(&format!("/uploads/{filename}")).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.bytes().await.unwrap().as_ref(),
        b"\x89PNG\r\n\x1a\nfake image body"
    );
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = spawn_app().await;
    app.create_user("Ana", "ana@x.com", None).await;

    let response = app.post_user(user_form("Another Ana", "ana@x.com")).await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("User with this email already exists"));
    let rows = app.store.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ana");
}

#[tokio::test]
async fn missing_name_or_email_re_renders_the_form() {
    let app = spawn_app().await;
    let test_cases = vec![
        (user_form("", "ana@x.com"), "missing name"),
        (user_form("Ana", ""), "missing email"),
        (user_form("", ""), "missing both"),
    ];

    for (form, description) in test_cases {
        let response = app.post_user(form).await;

        assert_eq!(response.status().as_u16(), 200, "{description}");
        let body = response.text().await.unwrap();
        assert!(
            body.contains("Name and email are required"),
            "The form did not report the error when the payload was {description}."
        );
    }
    assert!(app.store.rows().is_empty());
}

#[tokio::test]
async fn non_image_upload_is_rejected_before_any_row_is_created() {
    let app = spawn_app().await;
    let exe = Part::bytes(b"MZ\x90\x00".to_vec())
        .file_name("photo.exe")
        .mime_str("application/octet-stream")
        .unwrap();

    let response = app
        .post_user(user_form("Ana", "ana@x.com").part("profileImage", exe))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Only image files (JPEG, JPG, PNG, GIF, WEBP) are allowed."));
    assert!(app.store.rows().is_empty());
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn image_extension_with_wrong_content_type_is_rejected() {
    let app = spawn_app().await;
    let disguised = Part::bytes(b"#!/bin/sh".to_vec())
        .file_name("photo.png")
        .mime_str("text/x-shellscript")
        .unwrap();

    let response = app
        .post_user(user_form("Ana", "ana@x.com").part("profileImage", disguised))
        .await;

    assert!(response.text().await.unwrap().contains("Only image files"));
    assert!(app.store.rows().is_empty());
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = spawn_app().await;
    let big = Part::bytes(vec![0u8; MAX_UPLOAD_SIZE + 1])
        .file_name("huge.png")
        .mime_str("image/png")
        .unwrap();

    let response = app
        .post_user(user_form("Ana", "ana@x.com").part("profileImage", big))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("File too large."));
    assert!(app.store.rows().is_empty());
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn empty_file_field_counts_as_no_upload() {
    let app = spawn_app().await;
    let empty = Part::bytes(Vec::new())
        .file_name("")
        .mime_str("application/octet-stream")
        .unwrap();

    let response = app
        .post_user(user_form("Ana", "ana@x.com").part("profileImage", empty))
        .await;

    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(app.store.rows()[0].profile_image, None);
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn store_failure_renders_a_generic_error_without_storing_the_image() {
    let app = spawn_app().await;
    app.store.set_unavailable(true);

    let response = app
        .post_user(user_form("Ana", "ana@x.com").part("profileImage", png_part("me.png")))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Failed to create user. Please try again."));
    assert!(app.uploaded_files().is_empty());
}

#[tokio::test]
async fn urlencoded_form_creates_a_user() {
    let app = spawn_app().await;

    let response = app
        .post_user_urlencoded(&[("name", "Ana"), ("email", "ana@x.com")])
        .await;

    assert_eq!(response.status().as_u16(), 302);
    let rows = app.store.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ana");
    assert_eq!(rows[0].email, "ana@x.com");
    assert_eq!(rows[0].profile_image, None);
}

#[tokio::test]
async fn urlencoded_form_without_email_re_renders_the_form() {
    let app = spawn_app().await;

    let response = app.post_user_urlencoded(&[("name", "Ana")]).await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Name and email are required"));
    assert!(app.store.rows().is_empty());
}

#[tokio::test]
async fn losing_an_insert_race_shows_a_generic_error_and_drops_the_upload() {
    let app = spawn_app().await;
    let first = app.create_user("Ana", "ana@x.com", Some("first.png")).await;
    app.store.set_email_lookup_misses(true);

    let response = app
        .post_user(user_form("Other Ana", "ana@x.com").part("profileImage", png_part("late.png")))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Failed to create user. Please try again."));
    assert_eq!(app.store.rows(), vec![first.clone()]);
    assert_eq!(app.uploaded_files(), vec![first.profile_image.unwrap()]);
}
