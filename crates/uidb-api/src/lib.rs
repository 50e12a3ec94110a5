// uidb-api: Async Rust client for the UniFi device catalog feed

pub mod client;
pub mod error;
pub mod images;
pub mod models;
pub mod transport;

pub use client::{CatalogClient, DEFAULT_FEED_URL, parse_catalog};
pub use error::Error;
pub use images::{DEFAULT_IMAGE_SIZE, IMAGE_QUALITY, image_url};
pub use models::{
    CatalogResponse, Device, Images, Line, NetworkAttributes, Power, Product, UnifiAttributes,
};
pub use transport::{TlsMode, TransportConfig};
