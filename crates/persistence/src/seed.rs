//! Demo dataset for development databases.
//!
//! Two owners and eight listings spread over the Alicante, Valencia and Murcia
//! provinces, covering every operation type used in practice and a mix of
//! amenities. The server loads it into an empty database when started with
//! `--seed-demo-data`.

use rust_decimal::Decimal;
use tracing::info;

use crate::core::{ListingSearch, ListingStorage, OwnerStorage};
use crate::error::StorageResult;
use crate::types::{
    Amenities, DEFAULT_CURRENCY, ListingPredicate, ListingStatus, NewListing, NewOwner,
    OperationType, PropertyType,
};

/// Owners and listings to insert. Listing owners are indices into `owners`.
#[derive(Debug, Clone)]
pub struct DemoDataset {
    /// Owners, in insertion order.
    pub owners: Vec<NewOwner>,
    /// Listings paired with the index of their owner.
    pub listings: Vec<(usize, NewListing)>,
}

/// What [`seed_if_empty`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The dataset was inserted.
    #[allow(missing_docs)]
    Seeded { owners: usize, listings: usize },
    /// The database already held data; nothing was inserted.
    Skipped,
}

struct Listing {
    reference: &'static str,
    address: &'static str,
    city: &'static str,
    province: &'static str,
    postal_code: &'static str,
    property_type: PropertyType,
    bedrooms: u32,
    bathrooms: u32,
    area_sqm: u32,
    year_built: i32,
    floor: Option<i32>,
    amenities: Amenities,
    heating: &'static str,
    price: i64,
    operation_type: OperationType,
    status: ListingStatus,
    coordinates: (f64, f64),
    description: &'static str,
}

impl Listing {
    fn build(self) -> NewListing {
        NewListing {
            reference: Some(self.reference.to_string()),
            address: self.address.to_string(),
            city: self.city.to_string(),
            province: self.province.to_string(),
            postal_code: Some(self.postal_code.to_string()),
            description: Some(self.description.to_string()),
            property_type: self.property_type,
            operation_type: self.operation_type,
            status: self.status,
            price: Decimal::from(self.price),
            currency: DEFAULT_CURRENCY.to_string(),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area_sqm: Some(self.area_sqm),
            year_built: Some(self.year_built),
            floor: self.floor,
            heating: Some(self.heating.to_string()),
            latitude: Some(self.coordinates.0),
            longitude: Some(self.coordinates.1),
            amenities: self.amenities,
            owner_id: None,
        }
    }
}

const fn amenities(pool: bool, garage: bool, storage_room: bool, terrace: bool, elevator: bool) -> Amenities {
    Amenities {
        pool,
        garage,
        storage_room,
        terrace,
        elevator,
    }
}

/// Returns the demo dataset.
pub fn demo_dataset() -> DemoDataset {
    let owners = vec![
        NewOwner {
            name: "Inmobiliaria Sol SL".to_string(),
            email: Some("contacto@sol.com".to_string()),
            phone: Some("600111222".to_string()),
            address: Some("Calle Mayor 1, Ciudad".to_string()),
            national_id: None,
        },
        NewOwner {
            name: "Particular García".to_string(),
            email: Some("fran.garcia@example.com".to_string()),
            phone: Some("600999888".to_string()),
            address: Some("Av. Central 10".to_string()),
            national_id: None,
        },
    ];

    let listings = vec![
        (1, Listing {
            reference: "REF-0001",
            address: "C/ Gran Vía 12, 3ºA",
            city: "Alicante",
            province: "Alicante",
            postal_code: "03001",
            property_type: PropertyType::Flat,
            bedrooms: 3,
            bathrooms: 2,
            area_sqm: 95,
            year_built: 2005,
            floor: Some(3),
            amenities: amenities(false, true, true, true, true),
            heating: "individual-gas",
            price: 220_000,
            operation_type: OperationType::Sale,
            status: ListingStatus::Available,
            coordinates: (38.3452, -0.4810),
            description: "Piso luminoso, cerca del centro, buenas comunicaciones.",
        }),
        (0, Listing {
            reference: "REF-0002",
            address: "Urb. Las Palmeras, Calle Lago 5",
            city: "Benidorm",
            province: "Alicante",
            postal_code: "03501",
            property_type: PropertyType::Chalet,
            bedrooms: 4,
            bathrooms: 3,
            area_sqm: 180,
            year_built: 1998,
            floor: None,
            amenities: amenities(true, true, true, false, false),
            heating: "central",
            price: 480_000,
            operation_type: OperationType::Sale,
            status: ListingStatus::Available,
            coordinates: (38.5406, -0.1223),
            description: "Chalet independiente con jardín y piscina privada.",
        }),
        (1, Listing {
            reference: "REF-0003",
            address: "C/ Puerto, 6, 1º",
            city: "Alicante",
            province: "Alicante",
            postal_code: "03002",
            property_type: PropertyType::Studio,
            bedrooms: 0,
            bathrooms: 1,
            area_sqm: 30,
            year_built: 2010,
            floor: Some(1),
            amenities: amenities(false, false, false, true, true),
            heating: "individual-electric",
            price: 650,
            operation_type: OperationType::Rental,
            status: ListingStatus::Available,
            coordinates: (38.3459, -0.4816),
            description: "Estudio reformado, amueblado, ideal para estudiante.",
        }),
        (0, Listing {
            reference: "REF-0004",
            address: "Av. Mediterráneo 45, 5ºB",
            city: "Valencia",
            province: "Valencia",
            postal_code: "46001",
            property_type: PropertyType::Penthouse,
            bedrooms: 2,
            bathrooms: 2,
            area_sqm: 85,
            year_built: 2018,
            floor: Some(5),
            amenities: amenities(false, true, false, true, true),
            heating: "individual-gas",
            price: 285_000,
            operation_type: OperationType::Sale,
            status: ListingStatus::Available,
            coordinates: (39.4699, -0.3763),
            description: "Ático moderno con terraza amplia y vistas al mar.",
        }),
        (0, Listing {
            reference: "REF-0005",
            address: "C/ Colón 8",
            city: "Alicante",
            province: "Alicante",
            postal_code: "03003",
            property_type: PropertyType::CommercialUnit,
            bedrooms: 0,
            bathrooms: 1,
            area_sqm: 120,
            year_built: 1995,
            floor: Some(0),
            amenities: amenities(false, false, false, false, false),
            heating: "none",
            price: 1_500,
            operation_type: OperationType::Rental,
            status: ListingStatus::Available,
            coordinates: (38.3460, -0.4815),
            description: "Local comercial en zona céntrica con gran escaparate.",
        }),
        (1, Listing {
            reference: "REF-0006",
            address: "Urb. Los Pinos, C/ Roble 12",
            city: "Elche",
            province: "Alicante",
            postal_code: "03201",
            property_type: PropertyType::Townhouse,
            bedrooms: 3,
            bathrooms: 2,
            area_sqm: 140,
            year_built: 2010,
            floor: None,
            amenities: amenities(true, true, true, true, false),
            heating: "individual-gas",
            price: 195_000,
            operation_type: OperationType::Sale,
            status: ListingStatus::Available,
            coordinates: (38.2669, -0.6983),
            description: "Adosado con piscina comunitaria y jardín privado.",
        }),
        (0, Listing {
            reference: "REF-0007",
            address: "Plaza España 3, 2ºC",
            city: "Murcia",
            province: "Murcia",
            postal_code: "30001",
            property_type: PropertyType::Flat,
            bedrooms: 4,
            bathrooms: 2,
            area_sqm: 110,
            year_built: 2000,
            floor: Some(2),
            amenities: amenities(false, true, true, false, true),
            heating: "central",
            price: 950,
            operation_type: OperationType::Rental,
            status: ListingStatus::Available,
            coordinates: (37.9922, -1.1307),
            description: "Piso amplio en pleno centro, perfecto para familias.",
        }),
        (1, Listing {
            reference: "REF-0008",
            address: "C/ Altea 20",
            city: "Benidorm",
            province: "Alicante",
            postal_code: "03502",
            property_type: PropertyType::Flat,
            bedrooms: 2,
            bathrooms: 1,
            area_sqm: 70,
            year_built: 2015,
            floor: Some(1),
            amenities: amenities(true, true, false, true, true),
            heating: "individual-electric",
            price: 165_000,
            operation_type: OperationType::Sale,
            status: ListingStatus::Reserved,
            coordinates: (38.5384, -0.1312),
            description: "Piso cerca de la playa con piscina comunitaria.",
        }),
    ]
    .into_iter()
    .map(|(owner, listing)| (owner, listing.build()))
    .collect();

    DemoDataset { owners, listings }
}

/// Inserts the demo dataset unconditionally.
pub async fn seed_demo_data<S>(store: &S) -> StorageResult<SeedOutcome>
where
    S: ListingStorage + OwnerStorage + ?Sized,
{
    let dataset = demo_dataset();

    let mut owner_ids = Vec::with_capacity(dataset.owners.len());
    for owner in dataset.owners {
        owner_ids.push(store.create_owner(owner).await?.id);
    }

    let listing_count = dataset.listings.len();
    for (owner_index, mut listing) in dataset.listings {
        listing.owner_id = owner_ids.get(owner_index).copied();
        store.create_listing(listing).await?;
    }

    info!(
        owners = owner_ids.len(),
        listings = listing_count,
        "Seeded demo data"
    );
    Ok(SeedOutcome::Seeded {
        owners: owner_ids.len(),
        listings: listing_count,
    })
}

/// Inserts the demo dataset only when the store holds no owners or listings.
pub async fn seed_if_empty<S>(store: &S) -> StorageResult<SeedOutcome>
where
    S: ListingSearch + ListingStorage + OwnerStorage + ?Sized,
{
    let listings = store.count(&ListingPredicate::default()).await?;
    let owners = store.list_owners().await?.len();
    if listings > 0 || owners > 0 {
        info!(listings, owners, "Database not empty, skipping demo data");
        return Ok(SeedOutcome::Skipped);
    }
    seed_demo_data(store).await
}
