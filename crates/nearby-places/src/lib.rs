pub mod aggregate;
pub mod client;
pub mod error;
pub mod request;
pub mod session;
pub mod types;

pub use aggregate::{Aggregator, NearbySearch};
pub use client::PlacesClient;
pub use error::PlacesError;
pub use request::{ApiRequest, HttpMethod};
pub use session::SearchSession;
pub use types::{AddressComponent, PhotoRef, PlaceDetailRecord, Review};
