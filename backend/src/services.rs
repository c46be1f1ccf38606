//! Service registry: builds every port implementation once from settings.
//!
//! Callers hold an [`ApiServices`] and use its trait objects; whether those
//! talk to the backend or to bundled fixtures is decided here and nowhere
//! else.

use std::convert::Infallible;
use std::sync::Arc;

use futures_util::future::{BoxFuture, join_all};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::ports::{
    ApiGateway, LookupCache, LookupService, ProfileService, RequestService,
};
use crate::domain::{AppError, CityModel, Language, LookupCategory, LookupEntity, LookupModel};
use crate::outbound::api::{
    HttpLookupService, HttpProfileService, HttpRequestService, ReqwestApiGateway,
};
use crate::outbound::cache::{DisabledLookupCache, InMemoryLookupCache};
use crate::outbound::fixtures::{
    FixtureLookupService, FixtureProfileService, FixtureRequestService,
};
use crate::settings::ApiSettings;

/// Shared handle to a lookup service.
pub type SharedLookup<E> = Arc<dyn LookupService<E>>;

/// One lookup service per reference-data category.
#[derive(Clone)]
pub struct LookupServices {
    pub branches: SharedLookup<LookupModel>,
    pub cities: SharedLookup<CityModel>,
    pub classifications: SharedLookup<LookupModel>,
    pub employment_equities: SharedLookup<LookupModel>,
    pub employment_tenures: SharedLookup<LookupModel>,
    pub language_referral_types: SharedLookup<LookupModel>,
    pub language_requirements: SharedLookup<LookupModel>,
    pub languages: SharedLookup<LookupModel>,
    pub non_advertised_appointments: SharedLookup<LookupModel>,
    pub profile_statuses: SharedLookup<LookupModel>,
    pub provinces: SharedLookup<LookupModel>,
    pub request_statuses: SharedLookup<LookupModel>,
    pub security_clearances: SharedLookup<LookupModel>,
    pub selection_process_types: SharedLookup<LookupModel>,
    pub wfa_statuses: SharedLookup<LookupModel>,
    pub work_schedules: SharedLookup<LookupModel>,
}

/// Outcome of [`LookupServices::warm_up`].
#[derive(Debug, Default)]
pub struct WarmUpReport {
    /// Categories whose collection loaded.
    pub loaded: usize,
    /// Categories that failed, with the error each reported.
    pub failed: Vec<(LookupCategory, AppError)>,
}

impl WarmUpReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl LookupServices {
    fn build<Err, Plain, City>(mut plain: Plain, city: City) -> Result<Self, Err>
    where
        Plain: FnMut(LookupCategory) -> Result<SharedLookup<LookupModel>, Err>,
        City: FnOnce() -> Result<SharedLookup<CityModel>, Err>,
    {
        Ok(Self {
            branches: plain(LookupCategory::BRANCH)?,
            cities: city()?,
            classifications: plain(LookupCategory::CLASSIFICATION)?,
            employment_equities: plain(LookupCategory::EMPLOYMENT_EQUITY)?,
            employment_tenures: plain(LookupCategory::EMPLOYMENT_TENURE)?,
            language_referral_types: plain(LookupCategory::LANGUAGE_REFERRAL_TYPE)?,
            language_requirements: plain(LookupCategory::LANGUAGE_REQUIREMENT)?,
            languages: plain(LookupCategory::LANGUAGE)?,
            non_advertised_appointments: plain(LookupCategory::NON_ADVERTISED_APPOINTMENT)?,
            profile_statuses: plain(LookupCategory::PROFILE_STATUS)?,
            provinces: plain(LookupCategory::PROVINCE)?,
            request_statuses: plain(LookupCategory::REQUEST_STATUS)?,
            security_clearances: plain(LookupCategory::SECURITY_CLEARANCE)?,
            selection_process_types: plain(LookupCategory::SELECTION_PROCESS_TYPE)?,
            wfa_statuses: plain(LookupCategory::WFA_STATUS)?,
            work_schedules: plain(LookupCategory::WORK_SCHEDULE)?,
        })
    }

    /// HTTP-backed services sharing one gateway and one cache.
    pub fn http(gateway: &Arc<dyn ApiGateway>, cache: &Arc<dyn LookupCache>) -> Self {
        let plain = |category| -> Result<SharedLookup<LookupModel>, Infallible> {
            Ok(Arc::new(HttpLookupService::<LookupModel>::new(
                category,
                Arc::clone(gateway),
                Arc::clone(cache),
            )))
        };
        let city = || -> Result<SharedLookup<CityModel>, Infallible> {
            Ok(Arc::new(HttpLookupService::<CityModel>::new(
                LookupCategory::CITY,
                Arc::clone(gateway),
                Arc::clone(cache),
            )))
        };
        match Self::build(plain, city) {
            Ok(services) => services,
            Err(never) => match never {},
        }
    }

    /// Services over the bundled fixtures.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled fixture fails to decode.
    pub fn fixtures() -> Result<Self, AppError> {
        Self::build(
            |category| {
                FixtureLookupService::<LookupModel>::bundled(category)
                    .map(|service| Arc::new(service) as SharedLookup<LookupModel>)
            },
            || {
                FixtureLookupService::<CityModel>::bundled(LookupCategory::CITY)
                    .map(|service| Arc::new(service) as SharedLookup<CityModel>)
            },
        )
    }

    /// Service for a category whose entries are plain [`LookupModel`]s.
    ///
    /// Returns `None` for cities, which carry a nested province, and for
    /// categories this registry does not know.
    pub fn plain(&self, category: LookupCategory) -> Option<&SharedLookup<LookupModel>> {
        let service = match category {
            LookupCategory::BRANCH => &self.branches,
            LookupCategory::CLASSIFICATION => &self.classifications,
            LookupCategory::EMPLOYMENT_EQUITY => &self.employment_equities,
            LookupCategory::EMPLOYMENT_TENURE => &self.employment_tenures,
            LookupCategory::LANGUAGE_REFERRAL_TYPE => &self.language_referral_types,
            LookupCategory::LANGUAGE_REQUIREMENT => &self.language_requirements,
            LookupCategory::LANGUAGE => &self.languages,
            LookupCategory::NON_ADVERTISED_APPOINTMENT => &self.non_advertised_appointments,
            LookupCategory::PROFILE_STATUS => &self.profile_statuses,
            LookupCategory::PROVINCE => &self.provinces,
            LookupCategory::REQUEST_STATUS => &self.request_statuses,
            LookupCategory::SECURITY_CLEARANCE => &self.security_clearances,
            LookupCategory::SELECTION_PROCESS_TYPE => &self.selection_process_types,
            LookupCategory::WFA_STATUS => &self.wfa_statuses,
            LookupCategory::WORK_SCHEDULE => &self.work_schedules,
            _ => return None,
        };
        Some(service)
    }

    /// A whole category as JSON, bilingual or projected onto `language`.
    ///
    /// # Errors
    ///
    /// Propagates the lookup failure, or `UNEXPECTED_ERROR` for an unknown
    /// category.
    pub async fn category_json(
        &self,
        category: LookupCategory,
        language: Option<Language>,
    ) -> Result<Value, AppError> {
        if category == LookupCategory::CITY {
            return collection_json(&self.cities, language).await;
        }
        let service = self.plain(category).ok_or_else(|| {
            AppError::unexpected(format!("no lookup service registered for '{category}'"))
        })?;
        collection_json(service, language).await
    }

    /// Fetch every category concurrently, priming any shared cache.
    pub async fn warm_up(&self) -> WarmUpReport {
        let mut pending: Vec<BoxFuture<'_, (LookupCategory, Result<usize, AppError>)>> =
            LookupCategory::ALL
                .into_iter()
                .filter_map(|category| self.plain(category))
                .map(count_entries)
                .collect();
        pending.push(count_entries(&self.cities));

        let mut report = WarmUpReport::default();
        for (category, outcome) in join_all(pending).await {
            match outcome {
                Ok(entries) => {
                    info!(%category, entries, "lookup category warmed");
                    report.loaded += 1;
                }
                Err(error) => {
                    warn!(%category, code = %error.code(), %error, "lookup warm-up failed");
                    report.failed.push((category, error));
                }
            }
        }
        report
    }
}

fn count_entries<E: LookupEntity>(
    service: &SharedLookup<E>,
) -> BoxFuture<'_, (LookupCategory, Result<usize, AppError>)> {
    Box::pin(async move {
        let outcome = service.list_all().await.map(|entries| entries.len());
        (service.category(), outcome)
    })
}

async fn collection_json<E: LookupEntity>(
    service: &SharedLookup<E>,
    language: Option<Language>,
) -> Result<Value, AppError> {
    match language {
        Some(language) => to_json(&service.list_all_localized(language).await?),
        None => to_json(&service.list_all().await?),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value)
        .map_err(|error| AppError::unexpected(format!("failed to encode lookups: {error}")))
}

/// Every service the layer exposes.
#[derive(Clone)]
pub struct ApiServices {
    pub lookups: LookupServices,
    pub profiles: Arc<dyn ProfileService>,
    pub requests: Arc<dyn RequestService>,
}

impl ApiServices {
    /// Build services as `settings` describe.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_CONFIGURATION` for an unusable base URL or HTTP
    /// client, or the fixture error in mock mode.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, AppError> {
        if settings.mock() {
            info!("using fixture-backed services");
            return Self::fixtures();
        }

        let base_url = settings.api_base_url()?;
        let gateway = ReqwestApiGateway::new(base_url.clone()).map_err(|error| {
            AppError::invalid_configuration(format!("failed to build HTTP client: {error}"))
        })?;
        let cache: Arc<dyn LookupCache> = match (settings.cache_enabled(), settings.cache_ttl()) {
            (false, _) => Arc::new(DisabledLookupCache),
            (true, Some(ttl)) => Arc::new(InMemoryLookupCache::with_ttl(ttl)),
            (true, None) => Arc::new(InMemoryLookupCache::new()),
        };
        info!(
            base_url = %base_url,
            cache_enabled = settings.cache_enabled(),
            cache_ttl_seconds = settings.cache_ttl_seconds,
            "using backend API services"
        );
        Ok(Self::http(Arc::new(gateway), cache))
    }

    /// HTTP-backed services over an existing gateway and cache.
    pub fn http(gateway: Arc<dyn ApiGateway>, cache: Arc<dyn LookupCache>) -> Self {
        Self {
            lookups: LookupServices::http(&gateway, &cache),
            profiles: Arc::new(HttpProfileService::new(Arc::clone(&gateway))),
            requests: Arc::new(HttpRequestService::new(gateway)),
        }
    }

    /// # Errors
    ///
    /// Returns an error if a bundled fixture fails to decode.
    pub fn fixtures() -> Result<Self, AppError> {
        Ok(Self {
            lookups: LookupServices::fixtures()?,
            profiles: Arc::new(FixtureProfileService::bundled()?),
            requests: Arc::new(FixtureRequestService::bundled()?),
        })
    }
}
