use std::time::Duration;

use async_trait::async_trait;
use bson::doc;
use bson::Document;
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Collection;
use mongodb::Database;

use super::documents::UserDocument;
use super::documents::USERS;
use super::with_deadline;
use crate::domain::errors::StoreError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
    deadline: Duration,
}

impl MongoUserRepository {
    pub fn new(database: &Database, deadline: Duration) -> Self {
        Self {
            collection: database.collection(USERS),
            deadline,
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let result = with_deadline(
            self.deadline,
            self.collection
                .insert_one(UserDocument::from(user.clone()), None),
        )
        .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::invalid_document(USERS, "inserted _id is not an ObjectId"))?;

        Ok(user.with_id(UserId(id)))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, StoreError> {
        with_deadline(
            self.deadline,
            self.collection
                .find_one(doc! { "_id": id.as_object_id() }, None),
        )
        .await?
        .ok_or_else(|| StoreError::not_found(USERS, id))?
        .try_into()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError> {
        with_deadline(
            self.deadline,
            self.collection
                .find_one(doc! { "email": email.as_str() }, None),
        )
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();

        let documents: Vec<UserDocument> = with_deadline(self.deadline, async {
            self.collection
                .find(None, options)
                .await?
                .try_collect()
                .await
        })
        .await?;

        documents.into_iter().map(User::try_from).collect()
    }

    async fn update_by_id(
        &self,
        id: &UserId,
        changes: &UpdateUserCommand,
    ) -> Result<(), StoreError> {
        let mut set = Document::new();
        if let Some(first_name) = &changes.first_name {
            set.insert("firstName", first_name.as_str());
        }
        if let Some(last_name) = &changes.last_name {
            set.insert("lastName", last_name.as_str());
        }
        if set.is_empty() {
            return self.find_by_id(id).await.map(|_| ());
        }

        let result = with_deadline(
            self.deadline,
            self.collection
                .update_one(doc! { "_id": id.as_object_id() }, doc! { "$set": set }, None),
        )
        .await?;

        if result.matched_count == 0 {
            return Err(StoreError::not_found(USERS, id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), StoreError> {
        let result = with_deadline(
            self.deadline,
            self.collection
                .delete_one(doc! { "_id": id.as_object_id() }, None),
        )
        .await?;

        if result.deleted_count == 0 {
            return Err(StoreError::not_found(USERS, id));
        }
        Ok(())
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        with_deadline(self.deadline, self.collection.drop(None)).await?;
        tracing::info!(collection = USERS, "Collection dropped");
        Ok(())
    }
}
