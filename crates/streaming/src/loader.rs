use std::collections::HashMap;
use std::sync::Arc;

use formats::{decode_countries, decode_regions};
use parking_lot::Mutex;
use scene::SharedFeature;
use tracing::{debug, info, warn};

use crate::cache::{Residency, SessionCache};
use crate::country_codes::{country_code, normalize_country_name};
use crate::source::{
    BoundaryDataset, BoundarySource, FileSource, HttpSource, LoaderConfig, SourceError,
    SourceErrorKind,
};

pub type FeatureList = Arc<Vec<SharedFeature>>;

/// Session-scoped loader for country and admin-1 boundaries.
///
/// Both documents are fetched at most once per session (retried only after
/// a failure). Nothing here returns an error to the caller: failures degrade
/// to "no overlays" for countries and to `None` for regions.
pub struct GeoBoundaryLoader {
    source: Arc<dyn BoundarySource>,
    join_property: String,
    countries: SessionCache<FeatureList>,
    admin1: SessionCache<FeatureList>,
    regions_by_code: Mutex<HashMap<String, Vec<SharedFeature>>>,
    // Codes read from the country document, keyed by normalized name.
    dataset_codes: Mutex<HashMap<String, String>>,
}

impl GeoBoundaryLoader {
    pub fn new(source: Arc<dyn BoundarySource>, config: &LoaderConfig) -> Self {
        Self {
            source,
            join_property: config.join_property.clone(),
            countries: SessionCache::new(),
            admin1: SessionCache::new(),
            regions_by_code: Mutex::new(HashMap::new()),
            dataset_codes: Mutex::new(HashMap::new()),
        }
    }

    /// HTTP source for `http(s)://` locations, local files otherwise.
    pub fn from_config(config: &LoaderConfig) -> Self {
        let source: Arc<dyn BoundarySource> = if config.is_remote() {
            Arc::new(HttpSource::new(config.clone()))
        } else {
            Arc::new(FileSource::from_config(config))
        };
        Self::new(source, config)
    }

    pub fn countries_residency(&self) -> Residency {
        self.countries.residency()
    }

    pub fn admin1_residency(&self) -> Residency {
        self.admin1.residency()
    }

    /// World country boundaries; empty on failure.
    pub async fn load_countries(&self) -> Vec<SharedFeature> {
        let source = self.source.clone();
        let result = self
            .countries
            .get_or_fetch(move || {
                Box::pin(async move {
                    let text = source.fetch(BoundaryDataset::Countries).await?;
                    let doc = decode_countries(&text).map_err(decode_error)?;
                    info!(
                        count = doc.features.len(),
                        skipped = doc.skipped,
                        "country boundaries decoded"
                    );
                    Ok(Arc::new(doc.features.into_iter().map(Arc::new).collect()))
                })
            })
            .await;

        match result {
            Ok(list) => {
                self.remember_dataset_codes(&list);
                list.as_ref().clone()
            }
            Err(err) => {
                warn!(%err, "country boundaries unavailable, globe renders without overlays");
                Vec::new()
            }
        }
    }

    /// Admin-1 regions of `country_name`.
    ///
    /// - `Some(vec![])` without any fetch when the country has no known code.
    /// - `None` only when the admin-1 document could not be fetched or decoded.
    pub async fn load_regions_for(&self, country_name: &str) -> Option<Vec<SharedFeature>> {
        let Some(code) = self.country_code_for(country_name) else {
            debug!(country = country_name, "no region breakdown for country");
            return Some(Vec::new());
        };

        let memoized = self.regions_by_code.lock().get(&code).cloned();
        if let Some(regions) = memoized {
            return Some(regions);
        }

        let source = self.source.clone();
        let join_property = self.join_property.clone();
        let all = self
            .admin1
            .get_or_fetch(move || {
                Box::pin(async move {
                    let text = source.fetch(BoundaryDataset::Admin1).await?;
                    let doc = decode_regions(&text, &join_property).map_err(decode_error)?;
                    info!(
                        count = doc.features.len(),
                        skipped = doc.skipped,
                        "admin-1 boundaries decoded"
                    );
                    Ok(Arc::new(doc.features.into_iter().map(Arc::new).collect()))
                })
            })
            .await;

        let all = match all {
            Ok(all) => all,
            Err(err) => {
                warn!(%err, country = country_name, "admin-1 boundaries unavailable");
                return None;
            }
        };

        let regions: Vec<SharedFeature> = all
            .iter()
            .filter(|f| f.region_country_code() == Some(code.as_str()))
            .cloned()
            .collect();
        debug!(country = country_name, %code, count = regions.len(), "regions resolved");
        self.regions_by_code.lock().insert(code, regions.clone());
        Some(regions)
    }

    /// Static table first, then codes carried by the loaded country document.
    pub fn country_code_for(&self, country_name: &str) -> Option<String> {
        if let Some(code) = country_code(country_name) {
            return Some(code.to_string());
        }
        self.dataset_codes
            .lock()
            .get(&normalize_country_name(country_name))
            .cloned()
    }

    fn remember_dataset_codes(&self, countries: &[SharedFeature]) {
        let mut codes = self.dataset_codes.lock();
        if !codes.is_empty() {
            return;
        }
        for feature in countries {
            if let Some(code) = &feature.iso_a2 {
                codes.insert(normalize_country_name(feature.name()), code.clone());
            }
        }
    }
}

fn decode_error(err: formats::GeoJsonError) -> SourceError {
    SourceError::new(SourceErrorKind::Decode, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::GeoBoundaryLoader;
    use crate::cache::Residency;
    use crate::source::{
        BoundaryDataset, BoundarySource, BoxFuture, LoaderConfig, SourceError, StaticSource,
    };
    use futures_util::future::join;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const WORLD: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "Kenya", "iso_a2": "KE"},
             "geometry": {"type": "Polygon", "coordinates": [[[34,-4],[41,-4],[41,5],[34,5],[34,-4]]]}},
            {"type": "Feature", "properties": {"name": "Sudan", "iso_a2": "SD"},
             "geometry": {"type": "Polygon", "coordinates": [[[22,9],[38,9],[38,22],[22,22],[22,9]]]}},
            {"type": "Feature", "properties": {"name": "Wakanda", "iso_a2": "WK"},
             "geometry": {"type": "Polygon", "coordinates": [[[30,0],[31,0],[31,1],[30,0]]]}}
        ]
    }"#;

    const ADMIN1: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "Turkana", "iso_a2": "KE"},
             "geometry": {"type": "Polygon", "coordinates": [[[34,2],[36,2],[36,5],[34,2]]]}},
            {"type": "Feature", "properties": {"name": "Marsabit", "iso_a2": "KE"},
             "geometry": {"type": "Polygon", "coordinates": [[[37,2],[39,2],[39,4],[37,2]]]}},
            {"type": "Feature", "properties": {"name": "North Darfur", "iso_a2": "SD"},
             "geometry": {"type": "Polygon", "coordinates": [[[23,13],[27,13],[27,20],[23,13]]]}},
            {"type": "Feature", "properties": {"name": "Birnin Zana", "iso_a2": "WK"},
             "geometry": {"type": "Polygon", "coordinates": [[[30,0],[30.5,0],[30.5,0.5],[30,0]]]}}
        ]
    }"#;

    /// Yields once before answering, so concurrent callers overlap.
    struct YieldingSource(StaticSource);

    impl BoundarySource for YieldingSource {
        fn fetch(&self, dataset: BoundaryDataset) -> BoxFuture<'_, Result<String, SourceError>> {
            Box::pin(async move {
                tokio::task::yield_now().await;
                self.0.fetch(dataset).await
            })
        }
    }

    fn loader_with(source: Arc<dyn BoundarySource>) -> GeoBoundaryLoader {
        GeoBoundaryLoader::new(source, &LoaderConfig::default())
    }

    fn names(list: &[scene::SharedFeature]) -> Vec<&str> {
        list.iter().map(|f| f.name()).collect()
    }

    #[tokio::test]
    async fn countries_are_fetched_once() {
        let src = Arc::new(StaticSource::new(Some(WORLD.to_string()), None));
        let loader = loader_with(src.clone());
        assert_eq!(loader.load_countries().await.len(), 3);
        assert_eq!(loader.load_countries().await.len(), 3);
        assert_eq!(src.fetch_count(BoundaryDataset::Countries), 1);
        assert_eq!(loader.countries_residency(), Residency::Resident);
    }

    #[tokio::test]
    async fn country_failure_degrades_to_empty_and_retries() {
        let src = Arc::new(StaticSource::new(None, None));
        let loader = loader_with(src.clone());
        assert!(loader.load_countries().await.is_empty());
        assert!(loader.load_countries().await.is_empty());
        assert_eq!(src.fetch_count(BoundaryDataset::Countries), 2);
        assert_eq!(loader.countries_residency(), Residency::Empty);
    }

    #[tokio::test]
    async fn undecodable_document_degrades_to_empty() {
        let src = Arc::new(StaticSource::new(Some("<html>".to_string()), None));
        let loader = loader_with(src);
        assert!(loader.load_countries().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_country_resolves_empty_without_fetching() {
        let src = Arc::new(StaticSource::new(None, Some(ADMIN1.to_string())));
        let loader = loader_with(src.clone());
        assert_eq!(loader.load_regions_for("Atlantis").await, Some(Vec::new()));
        assert_eq!(src.fetch_count(BoundaryDataset::Admin1), 0);
    }

    #[tokio::test]
    async fn regions_are_filtered_to_requested_country() {
        let src = Arc::new(StaticSource::new(None, Some(ADMIN1.to_string())));
        let loader = loader_with(src.clone());

        let kenya = loader.load_regions_for("Kenya").await.expect("regions");
        assert_eq!(names(&kenya), vec!["Turkana", "Marsabit"]);
        let sudan = loader.load_regions_for("sudan").await.expect("regions");
        assert_eq!(names(&sudan), vec!["North Darfur"]);

        assert_eq!(src.fetch_count(BoundaryDataset::Admin1), 1);
    }

    #[tokio::test]
    async fn concurrent_region_requests_share_one_fetch() {
        let inner = StaticSource::new(None, Some(ADMIN1.to_string()));
        let src = Arc::new(YieldingSource(inner));
        let loader = loader_with(src.clone());

        let (kenya, sudan) = join(
            loader.load_regions_for("Kenya"),
            loader.load_regions_for("Sudan"),
        )
        .await;
        assert_eq!(kenya.map(|r| r.len()), Some(2));
        assert_eq!(sudan.map(|r| r.len()), Some(1));
        assert_eq!(src.0.fetch_count(BoundaryDataset::Admin1), 1);
    }

    #[tokio::test]
    async fn admin1_failure_is_none_then_retried() {
        let src = Arc::new(StaticSource::new(None, None));
        let loader = loader_with(src.clone());
        assert_eq!(loader.load_regions_for("Kenya").await, None);
        assert_eq!(loader.load_regions_for("Kenya").await, None);
        assert_eq!(src.fetch_count(BoundaryDataset::Admin1), 2);
        assert_eq!(loader.admin1_residency(), Residency::Empty);
    }

    #[tokio::test]
    async fn dataset_codes_extend_the_static_table() {
        let src = Arc::new(StaticSource::new(
            Some(WORLD.to_string()),
            Some(ADMIN1.to_string()),
        ));
        let loader = loader_with(src);
        assert_eq!(loader.load_regions_for("Wakanda").await, Some(Vec::new()));

        loader.load_countries().await;
        assert_eq!(loader.country_code_for("Wakanda").as_deref(), Some("WK"));
        let regions = loader.load_regions_for("Wakanda").await.expect("regions");
        assert_eq!(names(&regions), vec!["Birnin Zana"]);
    }
}
