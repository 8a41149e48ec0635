use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "CRUD API for the user resource, backed by MongoDB.\n\n**Fields:**\n- `_id` is assigned by the database on creation and rendered as a hex string\n- `name` is required and must be non-empty\n- `admin` is server-controlled on creation and always false for new users"
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::get_users,
        crate::api::users::get_user,
        crate::api::users::add_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::user::UserResponse,
            crate::models::user::CreateUserRequest,
            crate::models::user::UpdateUserRequest,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint for monitoring service status."),
        (name = "Users", description = "User management endpoints. Create, list, fetch, update and delete users."),
    )
)]
pub struct ApiDoc;
