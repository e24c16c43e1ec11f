use std::time::Duration;

use async_trait::async_trait;
use bson::doc;
use bson::Document;
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Collection;
use mongodb::Database;

use super::documents::HotelDocument;
use super::documents::RoomDocument;
use super::documents::HOTELS;
use super::documents::ROOMS;
use super::with_deadline;
use crate::domain::errors::StoreError;
use crate::domain::hotel::models::NewRoom;
use crate::domain::hotel::models::Room;
use crate::domain::hotel::models::RoomChanges;
use crate::domain::hotel::models::RoomFilter;
use crate::domain::hotel::models::RoomId;
use crate::domain::hotel::ports::RoomRepository;

/// Room store. Inserting a room also appends its id to the owning hotel.
pub struct MongoRoomRepository {
    collection: Collection<RoomDocument>,
    hotels: Collection<HotelDocument>,
    deadline: Duration,
}

impl MongoRoomRepository {
    pub fn new(database: &Database, deadline: Duration) -> Self {
        Self {
            collection: database.collection(ROOMS),
            hotels: database.collection(HOTELS),
            deadline,
        }
    }
}

#[async_trait]
impl RoomRepository for MongoRoomRepository {
    async fn insert(&self, room: NewRoom) -> Result<Room, StoreError> {
        let result = with_deadline(
            self.deadline,
            self.collection
                .insert_one(RoomDocument::from(room.clone()), None),
        )
        .await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::invalid_document(ROOMS, "inserted _id is not an ObjectId")
        })?;

        // Not transactional: a failure here leaves the room without a back-reference.
        let linked = with_deadline(
            self.deadline,
            self.hotels.update_one(
                doc! { "_id": room.hotel_id.as_object_id() },
                doc! { "$push": { "rooms": id } },
                None,
            ),
        )
        .await?;
        if linked.matched_count == 0 {
            tracing::warn!(room_id = %id, hotel_id = %room.hotel_id, "Room inserted for unknown hotel");
        }

        Ok(room.with_id(RoomId(id)))
    }

    async fn find_by_id(&self, id: &RoomId) -> Result<Room, StoreError> {
        with_deadline(
            self.deadline,
            self.collection
                .find_one(doc! { "_id": id.as_object_id() }, None),
        )
        .await?
        .ok_or_else(|| StoreError::not_found(ROOMS, id))?
        .try_into()
    }

    async fn find_all(&self, filter: &RoomFilter) -> Result<Vec<Room>, StoreError> {
        let mut query = Document::new();
        if let Some(hotel_id) = filter.hotel_id {
            query.insert("hotelId", hotel_id.as_object_id());
        }
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();

        let documents: Vec<RoomDocument> = with_deadline(self.deadline, async {
            self.collection
                .find(query, options)
                .await?
                .try_collect()
                .await
        })
        .await?;

        documents.into_iter().map(Room::try_from).collect()
    }

    async fn update_by_id(&self, id: &RoomId, changes: &RoomChanges) -> Result<(), StoreError> {
        let mut set = Document::new();
        if let Some(base_price) = changes.base_price {
            set.insert("basePrice", base_price);
        }
        if let Some(price) = changes.price {
            set.insert("price", price);
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
            return Err(StoreError::not_found(ROOMS, id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &RoomId) -> Result<(), StoreError> {
        let result = with_deadline(
            self.deadline,
            self.collection
                .delete_one(doc! { "_id": id.as_object_id() }, None),
        )
        .await?;

        if result.deleted_count == 0 {
            return Err(StoreError::not_found(ROOMS, id));
        }
        Ok(())
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        with_deadline(self.deadline, self.collection.drop(None)).await?;
        tracing::info!(collection = ROOMS, "Collection dropped");
        Ok(())
    }
}
