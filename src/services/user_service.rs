// ==================== USER SERVICE ====================
// Persistence façade over the `users` collection. Handlers never touch
// the driver directly; everything goes through these operations.

use crate::{database::MongoDB, models::User, utils::error::AppError};
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{
        FindOneAndDeleteOptions, FindOneAndUpdateOptions, FindOneOptions, FindOptions,
        InsertOneOptions, ReturnDocument,
    },
};

const COLLECTION: &str = "users";

/// The filter shapes the user endpoints actually exercise: match-all for
/// the list operation, equality on `_id` for everything else.
#[derive(Debug, Clone)]
pub enum UserFilter {
    All,
    ById(ObjectId),
}

impl UserFilter {
    pub fn to_document(&self) -> Document {
        match self {
            UserFilter::All => doc! {},
            UserFilter::ById(oid) => doc! { "_id": oid },
        }
    }
}

/// Field-set update. `name` is included only when present; `admin` is
/// always set.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub admin: bool,
}

impl UserUpdate {
    pub fn to_document(&self) -> Document {
        let mut set = doc! { "admin": self.admin };
        if let Some(name) = &self.name {
            set.insert("name", name);
        }
        doc! { "$set": set }
    }
}

/// Returns every user matching the filter, in cursor order. Driver options
/// (sort, projection, ...) pass through uninterpreted. A decode failure
/// mid-scan discards the accumulated list and surfaces the error.
pub async fn get_all(
    db: &MongoDB,
    filter: UserFilter,
    options: Option<FindOptions>,
) -> Result<Vec<User>, AppError> {
    let collection = db.collection::<User>(COLLECTION);

    let mut cursor = collection
        .find(filter.to_document())
        .with_options(options)
        .await?;

    let mut users = Vec::new();
    while let Some(user) = cursor.try_next().await? {
        users.push(user);
    }

    Ok(users)
}

/// Returns the first user matching the filter.
pub async fn get_one(
    db: &MongoDB,
    filter: UserFilter,
    options: Option<FindOneOptions>,
) -> Result<User, AppError> {
    let collection = db.collection::<User>(COLLECTION);

    collection
        .find_one(filter.to_document())
        .with_options(options)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))
}

/// Persists the given user and returns the id MongoDB generated for it.
/// A user with an empty name is never persisted.
pub async fn insert_one(
    db: &MongoDB,
    user: &User,
    options: Option<InsertOneOptions>,
) -> Result<ObjectId, AppError> {
    if user.name.is_empty() {
        return Err(AppError::InvalidRequest("user name is required".to_string()));
    }

    let collection = db.collection::<User>(COLLECTION);

    let result = collection.insert_one(user).with_options(options).await?;

    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::DatabaseError("inserted id is not an ObjectId".to_string()))
}

/// Applies a partial update to exactly one matching user and returns the
/// post-update state. Return-after timing is pinned here, after any
/// caller-supplied options are applied.
pub async fn update_one(
    db: &MongoDB,
    filter: UserFilter,
    update: UserUpdate,
    options: Option<FindOneAndUpdateOptions>,
) -> Result<User, AppError> {
    let collection = db.collection::<User>(COLLECTION);

    collection
        .find_one_and_update(filter.to_document(), update.to_document())
        .with_options(options)
        .return_document(ReturnDocument::After)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))
}

/// Removes exactly one matching user and returns its pre-deletion state.
pub async fn delete_one(
    db: &MongoDB,
    filter: UserFilter,
    options: Option<FindOneAndDeleteOptions>,
) -> Result<User, AppError> {
    let collection = db.collection::<User>(COLLECTION);

    collection
        .find_one_and_delete(filter.to_document())
        .with_options(options)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_all_filter_is_empty() {
        assert_eq!(UserFilter::All.to_document(), doc! {});
    }

    #[test]
    fn by_id_filter_builds_equality_document() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(
            UserFilter::ById(oid).to_document(),
            doc! { "_id": oid }
        );
    }

    #[test]
    fn update_without_name_only_sets_admin() {
        let update = UserUpdate {
            name: None,
            admin: true,
        };

        let doc = update.to_document();
        let set = doc.get_document("$set").unwrap();
        assert!(set.get_bool("admin").unwrap());
        assert!(!set.contains_key("name"));
    }

    #[test]
    fn update_with_name_sets_both_fields() {
        let update = UserUpdate {
            name: Some("Alice".to_string()),
            admin: false,
        };

        let doc = update.to_document();
        let set = doc.get_document("$set").unwrap();
        assert_eq!(set.get_str("name").unwrap(), "Alice");
        assert!(!set.get_bool("admin").unwrap());
    }

    #[test]
    fn invalid_hex_is_rejected_before_any_query() {
        assert!(ObjectId::parse_str("not-an-id").is_err());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_crud_round_trip() {
        dotenv::dotenv().ok();

        let db = MongoDB::new("mongodb://localhost:27017/user_service_test")
            .await
            .expect("MongoDB must be running");

        let user = User {
            id: None,
            name: "Bob".to_string(),
            admin: false,
        };

        let id = insert_one(&db, &user, None).await.unwrap();

        let fetched = get_one(&db, UserFilter::ById(id), None).await.unwrap();
        assert_eq!(fetched.name, "Bob");
        assert!(!fetched.admin);

        let update = UserUpdate {
            name: Some("Alice".to_string()),
            admin: true,
        };
        let updated = update_one(&db, UserFilter::ById(id), update, None)
            .await
            .unwrap();
        assert_eq!(updated.name, "Alice");
        assert!(updated.admin);

        let deleted = delete_one(&db, UserFilter::ById(id), None).await.unwrap();
        assert_eq!(deleted.name, "Alice");

        // Second delete finds nothing
        let result = delete_one(&db, UserFilter::ById(id), None).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_empty_name_is_never_persisted() {
        dotenv::dotenv().ok();

        let db = MongoDB::new("mongodb://localhost:27017/user_service_test")
            .await
            .expect("MongoDB must be running");

        let before = get_all(&db, UserFilter::All, None).await.unwrap().len();

        let user = User {
            id: None,
            name: String::new(),
            admin: false,
        };
        let result = insert_one(&db, &user, None).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));

        let after = get_all(&db, UserFilter::All, None).await.unwrap().len();
        assert_eq!(before, after);
    }
}
