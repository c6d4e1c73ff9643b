//! User resource handlers.
//!
//! ```text
//! GET    /users        list all users
//! GET    /users/{id}   fetch one user
//! POST   /users        create a user
//! PUT    /users/{id}   overwrite a user's fields
//! DELETE /users/{id}   delete a user
//! ```
//!
//! Each handler issues exactly one store operation. Store failures map to a
//! 500 envelope and the process stays alive; only "row absent" becomes 404.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;
use tracing::error;

use crate::models::{ApiResult, Error, User, UserDraft};
use crate::persistence::UserPersistenceError;

use super::AppState;

/// Map store failures to the internal error envelope.
///
/// The message is logged here with full detail; the envelope itself is
/// redacted before serialisation.
fn map_store_error(err: UserPersistenceError) -> Error {
    error!(error = %err, "user store operation failed");
    Error::internal(err.to_string())
}

/// List all users.
///
/// An empty table yields `[]`, not an error.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All stored users", body = [User]),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<AppState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list().await.map_err(map_store_error)?;
    Ok(web::Json(users))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The requested user", body = User),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    match state.users.find(id).await.map_err(map_store_error)? {
        Some(user) => Ok(web::Json(user)),
        None => Err(Error::not_found(format!("no user with id {id}"))),
    }
}

/// Create a user.
///
/// Any id in the body is ignored; the response carries the store-assigned
/// identifier.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserDraft,
    responses(
        (status = 200, description = "The stored user with its assigned id", body = User),
        (status = 400, description = "Malformed body", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<AppState>,
    payload: web::Json<UserDraft>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users
        .create(payload.into_inner())
        .await
        .map_err(map_store_error)?;
    Ok(web::Json(user))
}

/// Overwrite a user's fields.
///
/// No existence check is performed: updating an absent id succeeds and
/// echoes the submitted representation without creating a row. Documented
/// contract, kept for compatibility with existing clients.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UserDraft,
    responses(
        (status = 200, description = "The submitted representation", body = User),
        (status = 400, description = "Malformed body or id", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<UserDraft>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    let draft = payload.into_inner();
    state
        .users
        .update(id, &draft)
        .await
        .map_err(map_store_error)?;
    Ok(web::Json(draft.into_user(id)))
}

/// Delete a user by id.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deletion confirmation"),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    if state.users.delete(id).await.map_err(map_store_error)? {
        Ok(HttpResponse::Ok().json(json!({ "message": "user deleted" })))
    } else {
        Err(Error::not_found(format!("no user with id {id}")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::ErrorCode;
    use crate::persistence::{InMemoryUserRepository, UserRepository};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use async_trait::async_trait;
    use rstest::rstest;
    use serde_json::Value;

    fn test_app(
        users: Arc<dyn UserRepository>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(AppState::new(users)))
            .configure(crate::api::routes)
    }

    fn in_memory_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        test_app(Arc::new(InMemoryUserRepository::new()))
    }

    fn draft(name: &str) -> Value {
        serde_json::json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "city": "London",
        })
    }

    async fn create(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        body: Value,
    ) -> User {
        let req = actix_test::TestRequest::post()
            .uri("/users")
            .set_json(body)
            .to_request();
        let res = actix_test::call_service(app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        actix_test::read_body_json(res).await
    }

    #[actix_web::test]
    async fn create_then_get_round_trips() {
        let app = actix_test::init_service(in_memory_app()).await;
        let created = create(&app, draft("Ada")).await;

        let req = actix_test::TestRequest::get()
            .uri(&format!("/users/{}", created.id))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let fetched: User = actix_test::read_body_json(res).await;
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Ada");
        assert_eq!(fetched.email, "ada@example.com");
    }

    #[actix_web::test]
    async fn create_ignores_client_supplied_id() {
        let app = actix_test::init_service(in_memory_app()).await;
        let mut body = draft("Ada");
        body["id"] = serde_json::json!(99);
        let created = create(&app, body).await;
        assert_eq!(created.id, 1);
    }

    #[actix_web::test]
    async fn list_returns_every_created_user() {
        let app = actix_test::init_service(in_memory_app()).await;
        for name in ["Ada", "Grace", "Edsger"] {
            create(&app, draft(name)).await;
        }

        let req = actix_test::TestRequest::get().uri("/users").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let users: Vec<User> = actix_test::read_body_json(res).await;
        assert_eq!(users.len(), 3);
    }

    #[actix_web::test]
    async fn empty_table_lists_as_empty_array() {
        let app = actix_test::init_service(in_memory_app()).await;
        let req = actix_test::TestRequest::get().uri("/users").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let users: Vec<User> = actix_test::read_body_json(res).await;
        assert!(users.is_empty());
    }

    #[actix_web::test]
    async fn get_of_absent_id_is_not_found() {
        let app = actix_test::init_service(in_memory_app()).await;
        let req = actix_test::TestRequest::get().uri("/users/42").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let payload: Error = actix_test::read_body_json(res).await;
        assert_eq!(payload.code, ErrorCode::NotFound);
    }

    #[actix_web::test]
    async fn non_numeric_id_is_bad_request() {
        let app = actix_test::init_service(in_memory_app()).await;
        let req = actix_test::TestRequest::get()
            .uri("/users/not-a-number")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let payload: Error = actix_test::read_body_json(res).await;
        assert_eq!(payload.code, ErrorCode::InvalidRequest);
    }

    #[actix_web::test]
    async fn update_of_absent_id_echoes_without_creating() {
        let app = actix_test::init_service(in_memory_app()).await;
        let req = actix_test::TestRequest::put()
            .uri("/users/42")
            .set_json(draft("Ada"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let echoed: User = actix_test::read_body_json(res).await;
        assert_eq!(echoed.id, 42);
        assert_eq!(echoed.name, "Ada");

        // The echo is not a write: the row must not exist afterwards.
        let req = actix_test::TestRequest::get().uri("/users/42").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_overwrites_existing_fields() {
        let app = actix_test::init_service(in_memory_app()).await;
        let created = create(&app, draft("Ada")).await;

        let req = actix_test::TestRequest::put()
            .uri(&format!("/users/{}", created.id))
            .set_json(draft("Grace"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = actix_test::TestRequest::get()
            .uri(&format!("/users/{}", created.id))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        let stored: User = actix_test::read_body_json(res).await;
        assert_eq!(stored.name, "Grace");
        assert_eq!(stored.email, "grace@example.com");
    }

    #[actix_web::test]
    async fn delete_removes_row_and_second_delete_is_not_found() {
        let app = actix_test::init_service(in_memory_app()).await;
        let created = create(&app, draft("Ada")).await;
        let uri = format!("/users/{}", created.id);

        let req = actix_test::TestRequest::delete().uri(&uri).to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("user deleted")
        );

        let req = actix_test::TestRequest::get().uri(&uri).to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let req = actix_test::TestRequest::delete().uri(&uri).to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case::truncated_object("{\"name\": \"Ada\"")]
    #[case::not_json_at_all("definitely not json")]
    #[case::wrong_shape("{\"name\": 7, \"email\": true, \"city\": []}")]
    #[actix_web::test]
    async fn malformed_body_is_bad_request(#[case] body: &str) {
        let app = actix_test::init_service(in_memory_app()).await;
        let requests = [
            actix_test::TestRequest::post().uri("/users"),
            actix_test::TestRequest::put().uri("/users/1"),
        ];
        for request in requests {
            let req = request
                .insert_header(("content-type", "application/json"))
                .set_payload(body.to_owned())
                .to_request();
            let res = actix_test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            let payload: Error = actix_test::read_body_json(res).await;
            assert_eq!(payload.code, ErrorCode::InvalidRequest);
        }
    }

    #[derive(Default)]
    struct FailingUserRepository;

    #[async_trait]
    impl UserRepository for FailingUserRepository {
        async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
            Err(UserPersistenceError::query("relation users does not exist"))
        }

        async fn find(&self, _id: i32) -> Result<Option<User>, UserPersistenceError> {
            Err(UserPersistenceError::connection("pool exhausted"))
        }

        async fn create(&self, _draft: UserDraft) -> Result<User, UserPersistenceError> {
            Err(UserPersistenceError::query("insert failed"))
        }

        async fn update(&self, _id: i32, _draft: &UserDraft) -> Result<(), UserPersistenceError> {
            Err(UserPersistenceError::query("update failed"))
        }

        async fn delete(&self, _id: i32) -> Result<bool, UserPersistenceError> {
            Err(UserPersistenceError::query("delete failed"))
        }
    }

    #[actix_web::test]
    async fn store_failure_maps_to_redacted_internal_error() {
        let app =
            actix_test::init_service(test_app(Arc::new(FailingUserRepository))).await;

        let req = actix_test::TestRequest::get().uri("/users").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload: Error = actix_test::read_body_json(res).await;
        assert_eq!(payload.code, ErrorCode::InternalError);
        assert_eq!(payload.message, "Internal server error");
    }

    #[actix_web::test]
    async fn store_failure_on_get_is_not_conflated_with_not_found() {
        let app =
            actix_test::init_service(test_app(Arc::new(FailingUserRepository))).await;

        let req = actix_test::TestRequest::get().uri("/users/1").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
