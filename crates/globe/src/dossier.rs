use catalog::{CrisisCatalog, CrisisRecord};
use scene::BoundaryFeature;
use tracing::debug;

/// What the dossier panel is opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct DossierContext {
    pub country_display_name: String,
    pub region_display_name: Option<String>,
    /// `None` means "no data" for this country, not an error.
    pub matched_record: Option<CrisisRecord>,
}

/// The external detail panel.
pub trait DossierSink {
    fn open(&mut self, context: &DossierContext);

    /// The open dossier narrowed to a region of the same country.
    fn refine(&mut self, context: &DossierContext);

    fn close(&mut self);
}

/// Hands selections to the dossier and keeps its open state in lockstep
/// with the scene's selection.
pub struct DossierBridge {
    catalog: CrisisCatalog,
    sink: Box<dyn DossierSink>,
    current: Option<DossierContext>,
}

impl DossierBridge {
    pub fn new(catalog: CrisisCatalog, sink: Box<dyn DossierSink>) -> Self {
        Self {
            catalog,
            sink,
            current: None,
        }
    }

    pub fn catalog(&self) -> &CrisisCatalog {
        &self.catalog
    }

    pub fn current(&self) -> Option<&DossierContext> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Resolves `country` against the catalog and opens (or retargets) the panel.
    pub fn open(&mut self, country: &BoundaryFeature) -> DossierContext {
        let resolution = self.catalog.resolve(country.name());
        let context = DossierContext {
            country_display_name: resolution.display_name,
            region_display_name: None,
            matched_record: resolution.record,
        };
        debug!(
            country = %context.country_display_name,
            has_record = context.matched_record.is_some(),
            "dossier open"
        );
        self.sink.open(&context);
        self.current = Some(context.clone());
        context
    }

    /// Adds a region name to the open dossier. No-op while closed or when
    /// the region is already shown.
    pub fn refine_region(&mut self, region: &BoundaryFeature) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        if current.region_display_name.as_deref() == Some(region.name()) {
            return false;
        }
        current.region_display_name = Some(region.name().to_string());
        self.sink.refine(current);
        true
    }

    /// Idempotent. Returns `true` if a close signal was sent.
    pub fn close(&mut self) -> bool {
        if self.current.take().is_none() {
            return false;
        }
        debug!("dossier close");
        self.sink.close();
        true
    }
}
