pub mod coercion;
pub mod config;
pub mod error;
pub mod http;
pub mod labels;
pub(crate) mod logging;
pub mod measurement;
pub mod region;
pub mod scraper;
pub mod station;
mod table;

pub use config::ScraperConfig;
pub use error::{ParseError, ScrapeError};
pub use http::{HttpClient, HttpResponse};
pub use labels::Field;
pub use measurement::{Measurement, Reading};
pub use region::Region;
pub use scraper::Scraper;
pub use station::Station;
