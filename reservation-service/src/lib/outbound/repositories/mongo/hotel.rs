use std::time::Duration;

use async_trait::async_trait;
use bson::doc;
use bson::Document;
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Collection;
use mongodb::Database;

use super::documents::HotelDocument;
use super::documents::HOTELS;
use super::with_deadline;
use crate::domain::errors::StoreError;
use crate::domain::hotel::models::Hotel;
use crate::domain::hotel::models::HotelChanges;
use crate::domain::hotel::models::HotelFilter;
use crate::domain::hotel::models::HotelId;
use crate::domain::hotel::models::NewHotel;
use crate::domain::hotel::models::Pagination;
use crate::domain::hotel::ports::HotelRepository;

pub struct MongoHotelRepository {
    collection: Collection<HotelDocument>,
    deadline: Duration,
}

impl MongoHotelRepository {
    pub fn new(database: &Database, deadline: Duration) -> Self {
        Self {
            collection: database.collection(HOTELS),
            deadline,
        }
    }

    async fn update(&self, id: &HotelId, update: Document) -> Result<(), StoreError> {
        let result = with_deadline(
            self.deadline,
            self.collection
                .update_one(doc! { "_id": id.as_object_id() }, update, None),
        )
        .await?;

        if result.matched_count == 0 {
            return Err(StoreError::not_found(HOTELS, id));
        }
        Ok(())
    }
}

fn filter_document(filter: &HotelFilter) -> Document {
    let mut document = Document::new();
    if let Some(rating) = filter.rating {
        document.insert("rating", rating);
    }
    document
}

#[async_trait]
impl HotelRepository for MongoHotelRepository {
    async fn insert(&self, hotel: NewHotel) -> Result<Hotel, StoreError> {
        let result = with_deadline(
            self.deadline,
            self.collection
                .insert_one(HotelDocument::from(hotel.clone()), None),
        )
        .await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::invalid_document(HOTELS, "inserted _id is not an ObjectId")
        })?;

        Ok(hotel.with_id(HotelId(id)))
    }

    async fn find_by_id(&self, id: &HotelId) -> Result<Hotel, StoreError> {
        with_deadline(
            self.deadline,
            self.collection
                .find_one(doc! { "_id": id.as_object_id() }, None),
        )
        .await?
        .ok_or_else(|| StoreError::not_found(HOTELS, id))?
        .try_into()
    }

    async fn find_all(
        &self,
        filter: &HotelFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Hotel>, StoreError> {
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(pagination.skip().min(i64::MAX as u64))
            .limit(i64::try_from(pagination.limit()).unwrap_or(i64::MAX))
            .build();

        let documents: Vec<HotelDocument> = with_deadline(self.deadline, async {
            self.collection
                .find(filter_document(filter), options)
                .await?
                .try_collect()
                .await
        })
        .await?;

        documents.into_iter().map(Hotel::try_from).collect()
    }

    async fn update_by_id(&self, id: &HotelId, changes: &HotelChanges) -> Result<(), StoreError> {
        let mut set = Document::new();
        if let Some(name) = &changes.name {
            set.insert("name", name.as_str());
        }
        if let Some(location) = &changes.location {
            set.insert("location", location.as_str());
        }
        if let Some(rating) = changes.rating {
            set.insert("rating", rating);
        }
        if set.is_empty() {
            return self.find_by_id(id).await.map(|_| ());
        }

        self.update(id, doc! { "$set": set }).await
    }

    async fn delete_by_id(&self, id: &HotelId) -> Result<(), StoreError> {
        let result = with_deadline(
            self.deadline,
            self.collection
                .delete_one(doc! { "_id": id.as_object_id() }, None),
        )
        .await?;

        if result.deleted_count == 0 {
            return Err(StoreError::not_found(HOTELS, id));
        }
        Ok(())
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        with_deadline(self.deadline, self.collection.drop(None)).await?;
        tracing::info!(collection = HOTELS, "Collection dropped");
        Ok(())
    }
}
