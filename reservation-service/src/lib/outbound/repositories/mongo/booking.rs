use std::time::Duration;

use async_trait::async_trait;
use bson::doc;
use bson::DateTime as BsonDateTime;
use bson::Document;
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Collection;
use mongodb::Database;

use super::documents::BookingDocument;
use super::documents::BOOKINGS;
use super::with_deadline;
use crate::domain::booking::models::Booking;
use crate::domain::booking::models::BookingChanges;
use crate::domain::booking::models::BookingFilter;
use crate::domain::booking::models::BookingId;
use crate::domain::booking::models::DateBound;
use crate::domain::booking::models::NewBooking;
use crate::domain::booking::ports::BookingRepository;
use crate::domain::errors::StoreError;

pub struct MongoBookingRepository {
    collection: Collection<BookingDocument>,
    deadline: Duration,
}

impl MongoBookingRepository {
    pub fn new(database: &Database, deadline: Duration) -> Self {
        Self {
            collection: database.collection(BOOKINGS),
            deadline,
        }
    }
}

fn bound_document(bound: DateBound) -> Document {
    match bound {
        DateBound::OnOrAfter(t) => doc! { "$gte": BsonDateTime::from_chrono(t) },
        DateBound::OnOrBefore(t) => doc! { "$lte": BsonDateTime::from_chrono(t) },
    }
}

fn filter_document(filter: &BookingFilter) -> Document {
    let mut document = Document::new();
    if let Some(room_id) = filter.room_id {
        document.insert("roomID", room_id.as_object_id());
    }
    if let Some(user_id) = filter.user_id {
        document.insert("userID", user_id.as_object_id());
    }
    if let Some(bound) = filter.from_date {
        document.insert("fromDate", bound_document(bound));
    }
    if let Some(bound) = filter.till_date {
        document.insert("tillDate", bound_document(bound));
    }
    if filter.exclude_cancelled {
        // Matches both a missing field and an explicit null.
        document.insert("cancelledAt", bson::Bson::Null);
    }
    document
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    async fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let result = with_deadline(
            self.deadline,
            self.collection
                .insert_one(BookingDocument::from(booking.clone()), None),
        )
        .await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::invalid_document(BOOKINGS, "inserted _id is not an ObjectId")
        })?;

        Ok(booking.with_id(BookingId(id)))
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Booking, StoreError> {
        with_deadline(
            self.deadline,
            self.collection
                .find_one(doc! { "_id": id.as_object_id() }, None),
        )
        .await?
        .ok_or_else(|| StoreError::not_found(BOOKINGS, id))?
        .try_into()
    }

    async fn find_all(&self, filter: &BookingFilter) -> Result<Vec<Booking>, StoreError> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();

        let documents: Vec<BookingDocument> = with_deadline(self.deadline, async {
            self.collection
                .find(filter_document(filter), options)
                .await?
                .try_collect()
                .await
        })
        .await?;

        documents.into_iter().map(Booking::try_from).collect()
    }

    async fn update_by_id(
        &self,
        id: &BookingId,
        changes: &BookingChanges,
    ) -> Result<(), StoreError> {
        let Some(cancelled_at) = changes.cancelled_at else {
            return self.find_by_id(id).await.map(|_| ());
        };

        let result = with_deadline(
            self.deadline,
            self.collection.update_one(
                doc! { "_id": id.as_object_id() },
                doc! { "$set": { "cancelledAt": BsonDateTime::from_chrono(cancelled_at) } },
                None,
            ),
        )
        .await?;

        if result.matched_count == 0 {
            return Err(StoreError::not_found(BOOKINGS, id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &BookingId) -> Result<(), StoreError> {
        let result = with_deadline(
            self.deadline,
            self.collection
                .delete_one(doc! { "_id": id.as_object_id() }, None),
        )
        .await?;

        if result.deleted_count == 0 {
            return Err(StoreError::not_found(BOOKINGS, id));
        }
        Ok(())
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        with_deadline(self.deadline, self.collection.drop(None)).await?;
        tracing::info!(collection = BOOKINGS, "Collection dropped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::domain::hotel::models::RoomId;

    #[test]
    fn test_containment_filter_document() {
        let room_id = RoomId(ObjectId::new());
        let from = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let till = Utc.with_ymd_and_hms(2030, 1, 5, 0, 0, 0).unwrap();

        let filter = BookingFilter::for_room(room_id)
            .from_date(DateBound::OnOrAfter(from))
            .till_date(DateBound::OnOrBefore(till))
            .active_only();

        assert_eq!(
            filter_document(&filter),
            doc! {
                "roomID": room_id.as_object_id(),
                "fromDate": { "$gte": BsonDateTime::from_chrono(from) },
                "tillDate": { "$lte": BsonDateTime::from_chrono(till) },
                "cancelledAt": null,
            }
        );
    }

    #[test]
    fn test_empty_filter_document() {
        assert!(filter_document(&BookingFilter::default()).is_empty());
    }
}
