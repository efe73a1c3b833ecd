use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use roster_console::api::{Backend, HttpBackend};
use roster_console::auth;
use roster_console::entities::{Manager, Role};
use roster_console::error::ErrorKind;
use roster_console::i18n::{BilingualMessage, Language};
use roster_console::list::{DetailState, fetch_page, load_detail};
use roster_console::query::{FilterState, FilterValue, QueryParams};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use url::Url;

/// Serve `router` on a random local port and return its base URL.
async fn serve(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/")).unwrap()
}

fn ok(data: Value) -> Json<Value> {
    Json(json!({ "success": true, "data": data, "messageEn": "OK", "messageAr": "تم" }))
}

#[tokio::test]
async fn test_remote_list_sends_query_and_unwraps_envelope() {
    let router = Router::new().route(
        "/api/Roles",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let page: usize = params["PageNumber"].parse().unwrap();
            ok(json!({
                "items": [{
                    "id": 11,
                    "name": format!("{}|{}", params["SearchTerm"], params["IsActive"]),
                }],
                "page": page,
                "pageSize": params["PageSize"].parse::<usize>().unwrap(),
                "totalCount": 15,
            }))
        }),
    );
    let backend = HttpBackend::new(serve(router).await).unwrap();

    let filter = FilterState::new(10)
        .with_search("  adm ")
        .with_field_filter("is_active", FilterValue::Flag(true))
        .with_page(2);
    let page = fetch_page::<_, Role>(&backend, &filter).await.unwrap();

    assert_eq!(page.items[0].name, "adm|true");
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!((page.pagination.start_index, page.pagination.end_index), (11, 15));
    assert!(!page.pagination.has_next_page);
}

#[tokio::test]
async fn test_bare_array_without_envelope() {
    let router = Router::new().route(
        "/api/Managers/current",
        get(|| async {
            Json(json!([
                { "id": 1, "fullName": "Sara Ali", "departmentId": 3 },
                { "id": 2, "fullName": "Omar Haddad", "departmentId": 4 },
            ]))
        }),
    );
    let backend = HttpBackend::new(serve(router).await).unwrap();

    let filter = FilterState::new(10).with_search("omar");
    let page = fetch_page::<_, Manager>(&backend, &filter).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].full_name, "Omar Haddad");
    assert_eq!(page.pagination.total_count, 1);
}

#[tokio::test]
async fn test_headers_carry_token_and_language() {
    let router = Router::new().route(
        "/api/echo",
        get(|headers: HeaderMap| async move {
            let header = |name: &str| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            };
            Json(json!({
                "authorization": header("authorization"),
                "language": header("accept-language"),
            }))
        }),
    );
    let backend = HttpBackend::new(serve(router).await)
        .unwrap()
        .with_token(SecretString::from("tok-123"))
        .with_language(Language::Ar);

    let echoed = backend.get("/api/echo", &QueryParams::new()).await.unwrap();
    assert_eq!(echoed["authorization"], "Bearer tok-123");
    assert_eq!(echoed["language"], "ar");
}

#[tokio::test]
async fn test_detail_not_found_and_forbidden() {
    let router = Router::new().route(
        "/api/Roles/{id}",
        get(|Path(id): Path<String>| async move {
            match id.as_str() {
                "404" => (
                    StatusCode::NOT_FOUND,
                    Json(json!({
                        "success": false,
                        "messageEn": "Role not found",
                        "messageAr": "الدور غير موجود",
                    })),
                ),
                "403" => (StatusCode::FORBIDDEN, Json(json!({}))),
                _ => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "data": { "id": id, "name": "Admin" } })),
                ),
            }
        }),
    );
    let backend = HttpBackend::new(serve(router).await).unwrap();

    let missing: DetailState<Role> = load_detail(&backend, "404").await;
    assert_eq!(
        missing,
        DetailState::NotFound(BilingualMessage::new("Role not found", "الدور غير موجود"))
    );
    assert_eq!(
        missing.message(Language::Ar).as_deref(),
        Some("الدور غير موجود (العودة إلى القائمة)")
    );

    let forbidden: DetailState<Role> = load_detail(&backend, "403").await;
    assert!(matches!(forbidden, DetailState::Forbidden(_)));
    assert!(
        forbidden
            .message(Language::En)
            .is_some_and(|m| m.ends_with("(Back to list)"))
    );

    match load_detail::<_, Role>(&backend, "7").await {
        DetailState::Loaded(role) => assert_eq!(role.name, "Admin"),
        other => panic!("expected loaded role, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_problem_details() {
    let router = Router::new().route(
        "/api/Roles",
        get(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "title": "One or more validation errors occurred.",
                    "errors": { "PageSize": ["must be at most 100"] },
                })),
            )
        }),
    );
    let backend = HttpBackend::new(serve(router).await).unwrap();

    let err = fetch_page::<_, Role>(&backend, &FilterState::new(500))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestFailed);
    assert_eq!(
        err.message().resolve(Language::En),
        Some("One or more validation errors occurred.")
    );
    assert_eq!(err.field_errors(), ["PageSize: must be at most 100"]);
}

#[tokio::test]
async fn test_failure_envelope_on_success_status() {
    let router = Router::new().route(
        "/api/Roles",
        get(|| async {
            Json(json!({
                "success": false,
                "messageEn": "Role list unavailable",
                "messageAr": "قائمة الأدوار غير متاحة",
                "errors": ["database offline"],
            }))
        }),
    );
    let backend = HttpBackend::new(serve(router).await).unwrap();

    let err = backend.get("api/Roles", &QueryParams::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestFailed);
    assert_eq!(
        err.message().resolve(Language::Ar),
        Some("قائمة الأدوار غير متاحة")
    );
    assert_eq!(err.field_errors(), ["database offline"]);
}

#[tokio::test]
async fn test_timeout() {
    let router = Router::new().route(
        "/api/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!([]))
        }),
    );
    let backend = HttpBackend::new(serve(router).await)
        .unwrap()
        .with_timeout(Duration::from_millis(100));

    let err = backend.get("api/slow", &QueryParams::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_delete_sends_reason_body() {
    let router = Router::new().route(
        "/api/SubDepartments/{id}",
        delete(|Path(id): Path<String>, Json(body): Json<Value>| async move {
            ok(json!({ "id": id, "received": body }))
        }),
    );
    let backend = HttpBackend::new(serve(router).await).unwrap();

    let reply = backend
        .delete("api/SubDepartments/4", &json!({ "deletedReason": "merged" }))
        .await
        .unwrap();
    assert_eq!(reply["id"], "4");
    assert_eq!(reply["received"], json!({ "deletedReason": "merged" }));
}

#[tokio::test]
async fn test_login_round_trip() {
    let router = Router::new().route(
        "/api/Auth/login",
        post(|Json(body): Json<Value>| async move {
            if body["password"] == "correct" {
                (StatusCode::OK, ok(json!({ "token": "jwt-abc", "fullName": "Sara" })))
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "success": false, "messageEn": "Invalid credentials" })),
                )
            }
        }),
    );
    let backend = HttpBackend::new(serve(router).await).unwrap();

    let session = auth::login(&backend, "sara@example.com", &SecretString::from("correct"))
        .await
        .unwrap();
    assert_eq!(session.token.expose_secret(), "jwt-abc");

    let err = auth::login(&backend, "sara@example.com", &SecretString::from("wrong"))
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::RequestFailed);
    assert_eq!(err.message().resolve(Language::En), Some("Invalid credentials"));
}
