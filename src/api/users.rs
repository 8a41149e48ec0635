use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::oid::ObjectId;

use crate::{
    database::MongoDB,
    models::{CreateUserRequest, UpdateUserRequest, User, UserResponse},
    services::user_service::{self, UserFilter, UserUpdate},
    utils::error::AppError,
};

/// Each handler is the terminal error boundary for its request: client
/// input errors answer 400, everything from the service answers through
/// this mapping. Not-found is folded into 500 together with driver
/// failures; callers cannot tell them apart on status alone.
fn error_response(err: &AppError) -> HttpResponse {
    match err {
        AppError::InvalidRequest(_) => HttpResponse::BadRequest().body(err.to_string()),
        _ => HttpResponse::InternalServerError().body(err.to_string()),
    }
}

/// GET /user - Lists all users
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    responses(
        (status = 200, description = "All users, empty array when none exist", body = [UserResponse]),
        (status = 500, description = "Query or decode failure")
    )
)]
pub async fn get_users(db: web::Data<MongoDB>) -> impl Responder {
    match user_service::get_all(&db, UserFilter::All, None).await {
        Ok(users) => {
            let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Error listing users: {}", e);
            error_response(&e)
        }
    }
}

/// GET /user/{id} - Fetches a single user by id
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id as a 24-char hex string")
    ),
    responses(
        (status = 200, description = "The matching user", body = UserResponse),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "User not found or query failure")
    )
)]
pub async fn get_user(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    let oid = match ObjectId::parse_str(&user_id) {
        Ok(oid) => oid,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    match user_service::get_one(&db, UserFilter::ById(oid), None).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(e) => {
            log::error!("❌ Error fetching user {}: {}", user_id, e);
            error_response(&e)
        }
    }
}

/// POST /user - Creates a user and responds with the generated id
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Generated id as a hex string", body = String),
        (status = 400, description = "Malformed body or empty name"),
        (status = 500, description = "Insert failure")
    )
)]
pub async fn add_user(
    db: web::Data<MongoDB>,
    request: web::Json<CreateUserRequest>,
) -> impl Responder {
    let request = request.into_inner();

    if request.admin {
        log::warn!("⚠️ Ignoring client-supplied admin flag for new user");
    }

    if request.name.is_empty() {
        return HttpResponse::BadRequest().body("user name is required");
    }

    // id is assigned by MongoDB, admin is always false on creation
    let user = User {
        id: None,
        name: request.name,
        admin: false,
    };

    match user_service::insert_one(&db, &user, None).await {
        Ok(id) => {
            log::info!("✅ User created: {}", id.to_hex());
            HttpResponse::Ok().json(id.to_hex())
        }
        Err(e) => {
            log::error!("❌ Error creating user: {}", e);
            error_response(&e)
        }
    }
}

/// PUT /user/{id} - Partially updates a user and responds with the
/// post-update state
// TODO: restrict updates to admin callers
#[utoipa::path(
    put,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id as a 24-char hex string")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "The user after the update", body = UserResponse),
        (status = 400, description = "Malformed id or body"),
        (status = 500, description = "User not found or update failure")
    )
)]
pub async fn update_user(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> impl Responder {
    let user_id = path.into_inner();

    let oid = match ObjectId::parse_str(&user_id) {
        Ok(oid) => oid,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    let request = request.into_inner();

    // name changes only when the client sent one; admin is always written,
    // an absent flag resets it to false
    let update = UserUpdate {
        name: (!request.name.is_empty()).then_some(request.name),
        admin: request.admin,
    };

    match user_service::update_one(&db, UserFilter::ById(oid), update, None).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(e) => {
            log::error!("❌ Error updating user {}: {}", user_id, e);
            error_response(&e)
        }
    }
}

/// DELETE /user/{id} - Deletes a user and responds with its last state
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id as a 24-char hex string")
    ),
    responses(
        (status = 200, description = "The user as it was before deletion", body = UserResponse),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "User not found or delete failure")
    )
)]
pub async fn delete_user(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    let oid = match ObjectId::parse_str(&user_id) {
        Ok(oid) => oid,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    match user_service::delete_one(&db, UserFilter::ById(oid), None).await {
        Ok(user) => {
            log::info!("🗑️  User deleted: {}", user_id);
            HttpResponse::Ok().json(UserResponse::from(user))
        }
        Err(e) => {
            log::error!("❌ Error deleting user {}: {}", user_id, e);
            error_response(&e)
        }
    }
}
