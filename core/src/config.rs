const MAIN_URL: &str = "https://www.cgesp.org/v3/estacoes-meteorologicas.jsp";
const REGION_URL: &str = "https://www.saisp.br/geral/processo_cge.jsp?WHICHCHANNEL={}";
// The table is only served when the request claims to come from here.
const REFERER_URL: &str = "https://www.saisp.br";
const POLITENESS_FACTOR: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    /// Directory page listing every station.
    pub main_url: String,
    /// Per-station table page; `{}` is replaced by the station id.
    pub region_url: String,
    pub referer: String,
    /// Wait `politeness_factor` times the previous response latency before
    /// each station request.
    pub fetch_politely: bool,
    pub politeness_factor: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            main_url: MAIN_URL.to_string(),
            region_url: REGION_URL.to_string(),
            referer: REFERER_URL.to_string(),
            fetch_politely: false,
            politeness_factor: POLITENESS_FACTOR,
        }
    }
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            main_url: var("CGESP_MAIN_URL").unwrap_or(defaults.main_url),
            region_url: var("CGESP_REGION_URL").unwrap_or(defaults.region_url),
            referer: var("CGESP_REFERER").unwrap_or(defaults.referer),
            fetch_politely: var("CGESP_FETCH_POLITELY")
                .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.fetch_politely),
            politeness_factor: var("CGESP_POLITENESS_FACTOR")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.politeness_factor),
        }
    }

    pub fn region_url_for(&self, station_id: &str) -> String {
        self.region_url.replacen("{}", station_id, 1)
    }
}
