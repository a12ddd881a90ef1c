//! Store trait implementations for the SQLite backend.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::core::{ListingSearch, ListingStorage, OwnerStorage};
use crate::error::{
    BackendError, RecordKind, ResourceError, StorageError, StorageResult, ValidationError,
};
use crate::types::{
    Amenities, ListingPredicate, ListingRecord, ListingSort, ListingStatus, NewListing, NewOwner,
    OperationType, Owner, OwnerSummary, PageWindow, PropertyListing, PropertyType,
};

use super::SqliteBackend;
use super::backend::BACKEND_NAME;
use super::query_builder::{self, SqlParam};

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: BACKEND_NAME.to_string(),
        message,
        source: None,
    })
}

fn query_error(context: &str, e: rusqlite::Error) -> StorageError {
    match e {
        rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..) => {
            StorageError::Backend(BackendError::SerializationError {
                message: format!("{context}: {e}"),
            })
        }
        other => internal_error(format!("{context}: {other}")),
    }
}

fn is_foreign_key_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

/// A stored column value that does not decode into its domain type.
#[derive(Debug, thiserror::Error)]
#[error("unexpected stored value {0:?}")]
struct UnexpectedValue(String);

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}

const LISTING_COLUMNS: &str = "l.id, l.reference, l.address, l.city, l.province, \
     l.postal_code, l.description, l.property_type, l.operation_type, l.status, l.price, \
     l.currency, l.bedrooms, l.bathrooms, l.area_sqm, l.year_built, l.floor, l.heating, \
     l.latitude, l.longitude, l.pool, l.garage, l.storage_room, l.terrace, l.elevator, \
     l.owner_id, l.created_at, l.updated_at";

/// Number of columns in [`LISTING_COLUMNS`].
const LISTING_COLUMN_COUNT: usize = 28;

const OWNER_SUMMARY_COLUMNS: &str = "o.id, o.name, o.email, o.phone";

const OWNER_COLUMNS: &str = "id, name, email, phone, address, national_id, created_at";

fn decode_text<T>(row: &Row<'_>, idx: usize, parse: fn(&str) -> Option<T>) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(UnexpectedValue(raw)))
    })
}

fn decode_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn decode_price(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: f64 = row.get(idx)?;
    Decimal::try_from(raw)
        .map(|d| d.round_dp(2).normalize())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Real, Box::new(e)))
}

fn listing_from_row(row: &Row<'_>) -> rusqlite::Result<PropertyListing> {
    Ok(PropertyListing {
        id: row.get(0)?,
        reference: row.get(1)?,
        address: row.get(2)?,
        city: row.get(3)?,
        province: row.get(4)?,
        postal_code: row.get(5)?,
        description: row.get(6)?,
        property_type: decode_text(row, 7, PropertyType::parse)?,
        operation_type: decode_text(row, 8, OperationType::parse)?,
        status: decode_text(row, 9, ListingStatus::parse)?,
        price: decode_price(row, 10)?,
        currency: row.get(11)?,
        bedrooms: row.get(12)?,
        bathrooms: row.get(13)?,
        area_sqm: row.get(14)?,
        year_built: row.get(15)?,
        floor: row.get(16)?,
        heating: row.get(17)?,
        latitude: row.get(18)?,
        longitude: row.get(19)?,
        amenities: Amenities {
            pool: row.get(20)?,
            garage: row.get(21)?,
            storage_room: row.get(22)?,
            terrace: row.get(23)?,
            elevator: row.get(24)?,
        },
        owner_id: row.get(25)?,
        created_at: decode_timestamp(row, 26)?,
        updated_at: decode_timestamp(row, 27)?,
    })
}

/// Decodes a row of `LISTING_COLUMNS, OWNER_SUMMARY_COLUMNS`.
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ListingRecord> {
    let listing = listing_from_row(row)?;
    let base = LISTING_COLUMN_COUNT;
    let owner = match row.get::<_, Option<i64>>(base)? {
        Some(id) => Some(OwnerSummary {
            id,
            name: row.get(base + 1)?,
            email: row.get(base + 2)?,
            phone: row.get(base + 3)?,
        }),
        None => None,
    };
    Ok(ListingRecord { listing, owner })
}

fn owner_from_row(row: &Row<'_>) -> rusqlite::Result<Owner> {
    Ok(Owner {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        address: row.get(4)?,
        national_id: row.get(5)?,
        created_at: decode_timestamp(row, 6)?,
        listings: Vec::new(),
    })
}

fn select_records_sql(where_sql: &str, order_sql: &str) -> String {
    let mut sql = format!(
        "SELECT {LISTING_COLUMNS}, {OWNER_SUMMARY_COLUMNS} \
         FROM listings l LEFT JOIN owners o ON o.id = l.owner_id"
    );
    if !where_sql.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(where_sql);
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(order_sql);
    sql
}

fn fetch_record(conn: &Connection, id: i64) -> StorageResult<Option<ListingRecord>> {
    let sql = format!(
        "SELECT {LISTING_COLUMNS}, {OWNER_SUMMARY_COLUMNS} \
         FROM listings l LEFT JOIN owners o ON o.id = l.owner_id WHERE l.id = ?1"
    );
    conn.query_row(&sql, [id], record_from_row)
        .optional()
        .map_err(|e| query_error("Failed to read listing", e))
}

fn fetch_owner(conn: &Connection, id: i64) -> StorageResult<Option<Owner>> {
    let sql = format!("SELECT {OWNER_COLUMNS} FROM owners WHERE id = ?1");
    let Some(mut owner) = conn
        .query_row(&sql, [id], owner_from_row)
        .optional()
        .map_err(|e| query_error("Failed to read owner", e))?
    else {
        return Ok(None);
    };

    let sql = format!("SELECT {LISTING_COLUMNS} FROM listings l WHERE l.owner_id = ?1 ORDER BY l.id");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| query_error("Failed to prepare owner listings query", e))?;
    owner.listings = stmt
        .query_map([id], listing_from_row)
        .map_err(|e| query_error("Failed to query owner listings", e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| query_error("Failed to read owner listing", e))?;
    Ok(Some(owner))
}

fn exists(conn: &Connection, table: &str, id: i64) -> StorageResult<bool> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)");
    conn.query_row(&sql, [id], |row| row.get(0))
        .map_err(|e| query_error("Failed to check existence", e))
}

fn ensure_owner_exists(conn: &Connection, owner_id: Option<i64>) -> StorageResult<()> {
    match owner_id {
        Some(id) if !exists(conn, "owners", id)? => Err(ValidationError::InvalidReference {
            field: "ownerId".to_string(),
            id,
        }
        .into()),
        _ => Ok(()),
    }
}

fn invalid_owner_reference(owner_id: Option<i64>) -> StorageError {
    ValidationError::InvalidReference {
        field: "ownerId".to_string(),
        id: owner_id.unwrap_or_default(),
    }
    .into()
}

fn price_value(price: Decimal) -> StorageResult<f64> {
    price
        .to_f64()
        .ok_or_else(|| internal_error(format!("price {price} is not representable")))
}

#[async_trait]
impl ListingSearch for SqliteBackend {
    async fn query(
        &self,
        predicate: &ListingPredicate,
        sort: ListingSort,
        window: Option<PageWindow>,
    ) -> StorageResult<Vec<ListingRecord>> {
        let mut fragment = query_builder::where_clause(predicate);
        let mut sql = select_records_sql(&fragment.sql, &query_builder::order_by(sort));
        if let Some(window) = window {
            let limit = fragment.add_param(SqlParam::integer(i64::from(window.limit)));
            let offset = fragment.add_param(SqlParam::integer(
                i64::try_from(window.offset).unwrap_or(i64::MAX),
            ));
            sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
        }

        tracing::trace!(sql = %sql, params = fragment.params.len(), "Listing query");

        self.run(move |conn| {
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| query_error("Failed to prepare listing query", e))?;
            let bindings = fragment.bindings();
            let param_refs: Vec<&dyn rusqlite::ToSql> =
                bindings.iter().map(|p| p.as_ref()).collect();
            stmt.query_map(param_refs.as_slice(), record_from_row)
                .map_err(|e| query_error("Failed to execute listing query", e))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| query_error("Failed to read listing row", e))
        })
        .await
    }

    async fn count(&self, predicate: &ListingPredicate) -> StorageResult<u64> {
        let fragment = query_builder::where_clause(predicate);
        let mut sql = "SELECT COUNT(*) FROM listings l".to_string();
        if !fragment.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&fragment.sql);
        }

        self.run(move |conn| {
            let bindings = fragment.bindings();
            let param_refs: Vec<&dyn rusqlite::ToSql> =
                bindings.iter().map(|p| p.as_ref()).collect();
            let total: i64 = conn
                .query_row(&sql, param_refs.as_slice(), |row| row.get(0))
                .map_err(|e| query_error("Failed to count listings", e))?;
            Ok(u64::try_from(total).unwrap_or_default())
        })
        .await
    }
}

#[async_trait]
impl ListingStorage for SqliteBackend {
    async fn find_listing(&self, id: i64) -> StorageResult<Option<ListingRecord>> {
        self.run(move |conn| fetch_record(conn, id)).await
    }

    async fn create_listing(&self, listing: NewListing) -> StorageResult<ListingRecord> {
        self.run(move |conn| {
            let tx = conn
                .transaction()
                .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;
            ensure_owner_exists(&tx, listing.owner_id)?;

            let now = timestamp(Utc::now());
            tx.execute(
                "INSERT INTO listings (reference, address, city, province, postal_code, \
                 description, property_type, operation_type, status, price, currency, bedrooms, \
                 bathrooms, area_sqm, year_built, floor, heating, latitude, longitude, pool, \
                 garage, storage_room, terrace, elevator, owner_id, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, \
                 ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?26)",
                params![
                    listing.reference,
                    listing.address,
                    listing.city,
                    listing.province,
                    listing.postal_code,
                    listing.description,
                    listing.property_type.as_str(),
                    listing.operation_type.as_str(),
                    listing.status.as_str(),
                    price_value(listing.price)?,
                    listing.currency,
                    listing.bedrooms,
                    listing.bathrooms,
                    listing.area_sqm,
                    listing.year_built,
                    listing.floor,
                    listing.heating,
                    listing.latitude,
                    listing.longitude,
                    listing.amenities.pool,
                    listing.amenities.garage,
                    listing.amenities.storage_room,
                    listing.amenities.terrace,
                    listing.amenities.elevator,
                    listing.owner_id,
                    now,
                ],
            )
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    invalid_owner_reference(listing.owner_id)
                } else {
                    internal_error(format!("Failed to insert listing: {}", e))
                }
            })?;
            let id = tx.last_insert_rowid();

            let record = fetch_record(&tx, id)?
                .ok_or_else(|| internal_error(format!("listing {id} vanished after insert")))?;
            tx.commit()
                .map_err(|e| internal_error(format!("Failed to commit transaction: {}", e)))?;

            tracing::debug!(listing_id = id, "Created listing");
            Ok(record)
        })
        .await
    }

    async fn update_listing(&self, id: i64, listing: NewListing) -> StorageResult<ListingRecord> {
        self.run(move |conn| {
            let tx = conn
                .transaction()
                .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;
            if !exists(&tx, "listings", id)? {
                return Err(ResourceError::NotFound {
                    kind: RecordKind::Listing,
                    id,
                }
                .into());
            }
            ensure_owner_exists(&tx, listing.owner_id)?;

            tx.execute(
                "UPDATE listings SET reference = ?1, address = ?2, city = ?3, province = ?4, \
                 postal_code = ?5, description = ?6, property_type = ?7, operation_type = ?8, \
                 status = ?9, price = ?10, currency = ?11, bedrooms = ?12, bathrooms = ?13, \
                 area_sqm = ?14, year_built = ?15, floor = ?16, heating = ?17, latitude = ?18, \
                 longitude = ?19, pool = ?20, garage = ?21, storage_room = ?22, terrace = ?23, \
                 elevator = ?24, owner_id = ?25, updated_at = ?26 WHERE id = ?27",
                params![
                    listing.reference,
                    listing.address,
                    listing.city,
                    listing.province,
                    listing.postal_code,
                    listing.description,
                    listing.property_type.as_str(),
                    listing.operation_type.as_str(),
                    listing.status.as_str(),
                    price_value(listing.price)?,
                    listing.currency,
                    listing.bedrooms,
                    listing.bathrooms,
                    listing.area_sqm,
                    listing.year_built,
                    listing.floor,
                    listing.heating,
                    listing.latitude,
                    listing.longitude,
                    listing.amenities.pool,
                    listing.amenities.garage,
                    listing.amenities.storage_room,
                    listing.amenities.terrace,
                    listing.amenities.elevator,
                    listing.owner_id,
                    timestamp(Utc::now()),
                    id,
                ],
            )
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    invalid_owner_reference(listing.owner_id)
                } else {
                    internal_error(format!("Failed to update listing: {}", e))
                }
            })?;

            let record = fetch_record(&tx, id)?
                .ok_or_else(|| internal_error(format!("listing {id} vanished after update")))?;
            tx.commit()
                .map_err(|e| internal_error(format!("Failed to commit transaction: {}", e)))?;

            tracing::debug!(listing_id = id, "Updated listing");
            Ok(record)
        })
        .await
    }

    async fn delete_listing(&self, id: i64) -> StorageResult<()> {
        self.run(move |conn| {
            let deleted = conn
                .execute("DELETE FROM listings WHERE id = ?1", [id])
                .map_err(|e| internal_error(format!("Failed to delete listing: {}", e)))?;
            if deleted == 0 {
                return Err(ResourceError::NotFound {
                    kind: RecordKind::Listing,
                    id,
                }
                .into());
            }
            tracing::debug!(listing_id = id, "Deleted listing");
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl OwnerStorage for SqliteBackend {
    async fn list_owners(&self) -> StorageResult<Vec<Owner>> {
        self.run(|conn| {
            let sql = format!("SELECT {OWNER_COLUMNS} FROM owners ORDER BY name ASC, id ASC");
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| query_error("Failed to prepare owner query", e))?;
            let mut owners = stmt
                .query_map([], owner_from_row)
                .map_err(|e| query_error("Failed to query owners", e))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| query_error("Failed to read owner row", e))?;

            let sql = format!(
                "SELECT {LISTING_COLUMNS} FROM listings l WHERE l.owner_id IS NOT NULL ORDER BY l.id"
            );
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| query_error("Failed to prepare owner listings query", e))?;
            let listings = stmt
                .query_map([], listing_from_row)
                .map_err(|e| query_error("Failed to query owner listings", e))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| query_error("Failed to read owner listing", e))?;

            let mut by_owner: HashMap<i64, Vec<PropertyListing>> = HashMap::new();
            for listing in listings {
                if let Some(owner_id) = listing.owner_id {
                    by_owner.entry(owner_id).or_default().push(listing);
                }
            }
            for owner in &mut owners {
                owner.listings = by_owner.remove(&owner.id).unwrap_or_default();
            }
            Ok(owners)
        })
        .await
    }

    async fn find_owner_by_id(&self, id: i64) -> StorageResult<Option<Owner>> {
        self.run(move |conn| fetch_owner(conn, id)).await
    }

    async fn create_owner(&self, owner: NewOwner) -> StorageResult<Owner> {
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO owners (name, email, phone, address, national_id, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    owner.name,
                    owner.email,
                    owner.phone,
                    owner.address,
                    owner.national_id,
                    timestamp(Utc::now()),
                ],
            )
            .map_err(|e| internal_error(format!("Failed to insert owner: {}", e)))?;
            let id = conn.last_insert_rowid();
            tracing::debug!(owner_id = id, "Created owner");
            fetch_owner(conn, id)?
                .ok_or_else(|| internal_error(format!("owner {id} vanished after insert")))
        })
        .await
    }

    async fn update_owner(&self, id: i64, owner: NewOwner) -> StorageResult<Owner> {
        self.run(move |conn| {
            let updated = conn
                .execute(
                    "UPDATE owners SET name = ?1, email = ?2, phone = ?3, address = ?4, \
                     national_id = ?5 WHERE id = ?6",
                    params![
                        owner.name,
                        owner.email,
                        owner.phone,
                        owner.address,
                        owner.national_id,
                        id,
                    ],
                )
                .map_err(|e| internal_error(format!("Failed to update owner: {}", e)))?;
            if updated == 0 {
                return Err(ResourceError::NotFound {
                    kind: RecordKind::Owner,
                    id,
                }
                .into());
            }
            tracing::debug!(owner_id = id, "Updated owner");
            fetch_owner(conn, id)?
                .ok_or_else(|| internal_error(format!("owner {id} vanished after update")))
        })
        .await
    }

    async fn delete_owner(&self, id: i64) -> StorageResult<()> {
        self.run(move |conn| {
            let tx = conn
                .transaction()
                .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;
            if !exists(&tx, "owners", id)? {
                return Err(ResourceError::NotFound {
                    kind: RecordKind::Owner,
                    id,
                }
                .into());
            }

            let referencing: i64 = tx
                .query_row(
                    "SELECT COUNT(*) FROM listings WHERE owner_id = ?1",
                    [id],
                    |row| row.get(0),
                )
                .map_err(|e| query_error("Failed to count owner listings", e))?;
            if referencing > 0 {
                return Err(ResourceError::Referenced {
                    kind: RecordKind::Owner,
                    id,
                    count: u64::try_from(referencing).unwrap_or_default(),
                }
                .into());
            }

            tx.execute("DELETE FROM owners WHERE id = ?1", [id])
                .map_err(|e| {
                    if is_foreign_key_violation(&e) {
                        StorageError::Resource(ResourceError::Referenced {
                            kind: RecordKind::Owner,
                            id,
                            count: 0,
                        })
                    } else {
                        internal_error(format!("Failed to delete owner: {}", e))
                    }
                })?;
            tx.commit()
                .map_err(|e| internal_error(format!("Failed to commit transaction: {}", e)))?;

            tracing::debug!(owner_id = id, "Deleted owner");
            Ok(())
        })
        .await
    }
}
