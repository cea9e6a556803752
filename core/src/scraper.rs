use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::http::HttpClient;
use crate::logging::Logger;
use crate::measurement::Measurement;
use crate::region::Region;
use crate::station::{Station, fetch_stations};
use crate::table::parse_measurements;
use futures::{Stream, TryStreamExt, stream};
use serde_json::Map;
use std::time::Duration;
use tokio::time::Instant;

/// Scrapes every station of the directory page into [`Region`]s.
pub struct Scraper<C> {
    client: C,
    config: ScraperConfig,
    stations: Vec<Station>,
    regions: Vec<Region>,
    response_delay: Duration,
}

impl<C: HttpClient> Scraper<C> {
    /// Fetches the station directory. Fails as a whole if the directory page
    /// cannot be fetched or parsed.
    pub async fn initialize(client: C, config: ScraperConfig) -> Result<Self, ScrapeError> {
        let stations = fetch_stations(&client, &config.main_url).await?;
        Ok(Self::new(client, config, stations))
    }

    /// A scraper over already known stations; performs no I/O.
    pub fn new(client: C, config: ScraperConfig, stations: Vec<Station>) -> Self {
        Self {
            client,
            config,
            stations,
            regions: Vec::new(),
            response_delay: Duration::ZERO,
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn push_region(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Time taken by the last station request.
    pub fn response_delay(&self) -> Duration {
        self.response_delay
    }

    /// Yields one region per station, in directory order. Each element is
    /// fetched when it is polled; the stream ends after the first error.
    pub fn scrape_next(&mut self) -> impl Stream<Item = Result<Region, ScrapeError>> + '_ {
        stream::try_unfold((self, 0usize), |(scraper, index)| async move {
            let Some(station) = scraper.stations.get(index).cloned() else {
                return Ok::<_, ScrapeError>(None);
            };
            Logger::new()
                .station(station.name.trim())
                .info("region.fetch", &format!("Fetching region #{}", index + 1));

            let measurements = scraper.fetch_measurements(&station).await?;
            let region = Region::with_measurements(&station.name, measurements);

            let latency_ms = scraper.response_delay.as_secs_f64() * 1000.0;
            Logger::new()
                .station(&region.name)
                .latency_ms(latency_ms)
                .debug("region.fetched", &format!("Got {region} in {latency_ms:.2}ms"));
            for measurement in &region.measurements {
                Logger::new()
                    .station(&region.name)
                    .debug("region.measurement", &measurement.to_string());
            }

            Ok(Some((region, (scraper, index + 1))))
        })
    }

    /// Appends a region for every station. On error nothing from this run is
    /// kept; regions from earlier runs stay.
    pub async fn scrape_all(&mut self) -> Result<(), ScrapeError> {
        Logger::new()
            .count(self.stations.len())
            .info("scrape.started", "Starting scraper");
        let regions: Vec<Region> = self.scrape_next().try_collect().await?;
        Logger::new()
            .count(regions.len())
            .info("scrape.finished", "Finished scraping");
        self.regions.extend(regions);
        Ok(())
    }

    /// All regions as one JSON object keyed by region name, keys sorted and
    /// indented by two spaces. A repeated name keeps the last region's data.
    pub fn to_json(&self) -> Result<String, ScrapeError> {
        let mut document = Map::new();
        for region in &self.regions {
            document.extend(region.to_map());
        }
        Ok(serde_json::to_string_pretty(&document)?)
    }

    async fn fetch_measurements(
        &mut self,
        station: &Station,
    ) -> Result<Vec<Measurement>, ScrapeError> {
        let url = self.config.region_url_for(&station.id);
        Logger::new().url(&url).debug(
            "region.request",
            &format!("[GET] {url} {{'referer': '{}'}}", self.config.referer),
        );

        if self.config.fetch_politely && !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay * self.config.politeness_factor).await;
        }

        let started = Instant::now();
        let response = self
            .client
            .get(&url, &[("referer", self.config.referer.as_str())])
            .await;
        self.response_delay = started.elapsed();

        let response = response?;
        if response.status != 200 {
            return Err(ScrapeError::Fetch {
                url,
                status: response.status,
            });
        }
        Ok(parse_measurements(&response.body)?)
    }
}
