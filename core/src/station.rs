use crate::error::{ParseError, ScrapeError};
use crate::http::HttpClient;
use crate::logging::Logger;
use crate::table::selector;
use scraper::Html;

const STATION_LIST: &str = "ul#lista-estacoes";
const STATION_ITEM: &str = "li";
const STATION_LINK: &str = "a";

/// An entry of the directory page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub name: String,
    pub id: String,
}

pub async fn fetch_stations<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<Vec<Station>, ScrapeError> {
    Logger::new().info("stations.fetch", "Fetching stations");
    Logger::new()
        .url(url)
        .debug("stations.request", &format!("[GET] {url}"));

    let response = client.get(url, &[]).await?;
    if response.status != 200 {
        return Err(ScrapeError::Fetch {
            url: url.to_string(),
            status: response.status,
        });
    }

    let stations = parse_stations(&response.body)?;
    Logger::new()
        .count(stations.len())
        .info("stations.found", &format!("{} station(s) found", stations.len()));
    Ok(stations)
}

/// Reads `(name, id)` pairs from the station list. The id is the value of the
/// query parameter in each item's link.
pub(crate) fn parse_stations(html: &str) -> Result<Vec<Station>, ParseError> {
    let document = Html::parse_document(html);
    let list = document
        .select(&selector(STATION_LIST)?)
        .next()
        .ok_or(ParseError::MissingElement {
            selector: STATION_LIST,
        })?;

    let item_selector = selector(STATION_ITEM)?;
    let link_selector = selector(STATION_LINK)?;
    list.select(&item_selector)
        .map(|item| -> Result<Station, ParseError> {
            let name: String = item.text().collect();
            let id = item
                .select(&link_selector)
                .next()
                .and_then(|link| link.value().attr("href"))
                .and_then(|href| href.split('=').nth(1))
                .ok_or_else(|| ParseError::MissingStationId {
                    station: name.trim().to_string(),
                })?;
            Ok(Station {
                id: id.to_string(),
                name,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    type Recorded = Arc<Mutex<Vec<(Level, String)>>>;

    struct EventRecorder(Recorded);

    struct EventName(Option<String>);

    impl Visit for EventName {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "event" {
                self.0 = Some(value.to_string());
            }
        }

        fn record_debug(&mut self, _: &Field, _: &dyn std::fmt::Debug) {}
    }

    impl<S: Subscriber> Layer<S> for EventRecorder {
        fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
            let mut name = EventName(None);
            event.record(&mut name);
            if let Some(name) = name.0 {
                self.0.lock().unwrap().push((*event.metadata().level(), name));
            }
        }
    }

    struct DirectoryPage(&'static str);

    impl HttpClient for DirectoryPage {
        async fn get(&self, _: &str, _: &[(&str, &str)]) -> Result<HttpResponse, ScrapeError> {
            Ok(HttpResponse {
                status: 200,
                body: self.0.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn fetch_stations_reports_request_and_count() {
        let recorded = Recorded::default();
        let subscriber = tracing_subscriber::registry().with(EventRecorder(recorded.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let client = DirectoryPage(
            r#"<ul id="lista-estacoes"><li><a href="e.jsp?POSTO=1">Penha</a></li></ul>"#,
        );
        let stations = fetch_stations(&client, "http://cge.test/estacoes").await.unwrap();
        assert_eq!(stations.len(), 1);

        let recorded = recorded.lock().unwrap().clone();
        assert_eq!(
            recorded,
            vec![
                (Level::INFO, "stations.fetch".to_string()),
                (Level::DEBUG, "stations.request".to_string()),
                (Level::INFO, "stations.found".to_string()),
            ]
        );
    }

    #[test]
    fn parse_stations_reads_names_and_ids() {
        let html = r#"
        <html><body>
        <ul id="lista-estacoes">
          <li><a href="estacao.jsp?POSTO=1000887">Penha</a></li>
          <li> <a href="estacao.jsp?POSTO=1000840"><span>Perus</span></a> </li>
        </ul>
        </body></html>
        "#;
        let stations = parse_stations(html).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(
            stations[0],
            Station {
                name: "Penha".to_string(),
                id: "1000887".to_string()
            }
        );
        assert_eq!(stations[1].name.trim(), "Perus");
        assert_eq!(stations[1].id, "1000840");
    }

    #[test]
    fn parse_stations_only_reads_the_station_list() {
        let html = r#"
        <ul id="menu"><li><a href="?x=1">Menu</a></li></ul>
        <ul id="lista-estacoes"></ul>
        "#;
        assert!(parse_stations(html).unwrap().is_empty());
    }

    #[test]
    fn parse_stations_fails_without_list() {
        let err = parse_stations("<ul id=\"other\"><li>x</li></ul>").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingElement { selector } if selector == STATION_LIST
        ));
    }

    #[test]
    fn parse_stations_fails_on_item_without_id() {
        let html = r#"<ul id="lista-estacoes"><li><a href="estacao.jsp">Sé</a></li></ul>"#;
        let err = parse_stations(html).unwrap_err();
        assert!(matches!(err, ParseError::MissingStationId { station } if station == "Sé"));
    }
}
