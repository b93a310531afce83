mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{TestServer, PASSWORD};

#[tokio::test]
async fn sign_up_rejects_short_password() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/createUser"))
        .json(&json!({ "userName": "Ada", "password": "short", "email": "ada@example.com" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.text().await?, "Password must have more than 8 characters.");
    Ok(())
}

#[tokio::test]
async fn sign_up_rejects_duplicate_email() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.sign_up("ada@example.com").await?;

    let res = server
        .client
        .post(server.url("/api/createUser"))
        .json(&json!({ "userName": "Imposter", "password": PASSWORD, "email": "ada@example.com" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.text().await?, "Email already in use by another user.");
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/createUser"))
        .json(&json!({ "email": "ada@example.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn unknown_user_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, client) = server.authorized_user("ada@example.com").await?;

    let res = client
        .get(server.url(&format!("/api/user?userId={}", Uuid::new_v4())))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "There is no user with such ID");
    Ok(())
}

#[tokio::test]
async fn user_is_returned_without_password() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user_id, client) = server.authorized_user("ada@example.com").await?;

    let res = client.get(server.url(&format!("/api/user?userId={user_id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["id"], user_id.as_str());
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("password").is_none());

    let res = client.get(server.url("/api/user?userId=not-a-uuid")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn login_failures() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.sign_up("ada@example.com").await?;

    let res = server
        .client
        .post(server.url("/api/login"))
        .json(&json!({ "email": "nobody@example.com", "password": PASSWORD }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "There is no user with such email");

    let res = server
        .client
        .post(server.url("/api/login"))
        .json(&json!({ "email": "ada@example.com", "password": "wrongpassword" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.text().await?, "Invalid password.");
    Ok(())
}

#[tokio::test]
async fn wrong_current_password_keeps_old_password() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user_id, client) = server.authorized_user("ada@example.com").await?;

    let res = client
        .put(server.url(&format!("/api/updatePassword?userId={user_id}")))
        .json(&json!({ "password": "wrongpassword", "newPassword": "brandnewpassword" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    server.login("ada@example.com", PASSWORD).await?;
    assert!(server.login("ada@example.com", "brandnewpassword").await.is_err());

    let res = client
        .put(server.url(&format!("/api/updatePassword?userId={user_id}")))
        .json(&json!({ "password": PASSWORD, "newPassword": "brandnewpassword" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    server.login("ada@example.com", "brandnewpassword").await?;
    Ok(())
}

#[tokio::test]
async fn update_user_merges_fields() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user_id, client) = server.authorized_user("ada@example.com").await?;

    let res = client
        .put(server.url(&format!("/api/updateUser?userId={user_id}")))
        .json(&json!({ "userName": "Ada Lovelace", "password": PASSWORD }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<String>().await?, user_id);

    let body: Value = client
        .get(server.url(&format!("/api/user?userId={user_id}")))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["name"], "Ada Lovelace");
    assert_eq!(body["email"], "ada@example.com");
    Ok(())
}

#[tokio::test]
async fn update_user_with_wrong_password_is_unauthorized() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user_id, client) = server.authorized_user("ada@example.com").await?;

    let res = client
        .put(server.url(&format!("/api/updateUser?userId={user_id}")))
        .json(&json!({
            "userName": "Ada Lovelace",
            "email": "lovelace@example.com",
            "password": "wrongpassword"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.text().await?, "Invalid password.");

    let body: Value = client
        .get(server.url(&format!("/api/user?userId={user_id}")))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    Ok(())
}

#[tokio::test]
async fn delete_user_requires_password() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user_id, client) = server.authorized_user("ada@example.com").await?;
    let url = server.url(&format!("/api/deleteUser?userId={user_id}"));

    let res = client.delete(&url).json(&json!({ "password": "" })).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client.delete(&url).json(&json!({ "password": PASSWORD })).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(server.url(&format!("/api/user?userId={user_id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
