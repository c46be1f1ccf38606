//! Request service over an in-memory copy of the bundled requests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::debug;

use super::{FixtureLookupService, FixtureUser, decode_bundle};
use crate::domain::ports::RequestService;
use crate::domain::{
    AppError, ErrorCode, LookupCategory, LookupModel, Request, RequestPutModel, RequestQuery,
    StatusUpdate, UserSummary,
};

const REQUESTS_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/requests.json"));
const NEW_REQUEST_STATUS: &str = "DRAFT";
const CURRENT_USER_ALIAS: &str = "me";

struct RequestLookups {
    classifications: FixtureLookupService<LookupModel>,
    work_units: FixtureLookupService<LookupModel>,
    selection_process_types: FixtureLookupService<LookupModel>,
    language_requirements: FixtureLookupService<LookupModel>,
    security_clearances: FixtureLookupService<LookupModel>,
    work_schedules: FixtureLookupService<LookupModel>,
    statuses: FixtureLookupService<LookupModel>,
}

impl RequestLookups {
    fn bundled() -> Result<Self, AppError> {
        Ok(Self {
            classifications: FixtureLookupService::bundled(LookupCategory::CLASSIFICATION)?,
            work_units: FixtureLookupService::bundled(LookupCategory::BRANCH)?,
            selection_process_types: FixtureLookupService::bundled(
                LookupCategory::SELECTION_PROCESS_TYPE,
            )?,
            language_requirements: FixtureLookupService::bundled(
                LookupCategory::LANGUAGE_REQUIREMENT,
            )?,
            security_clearances: FixtureLookupService::bundled(LookupCategory::SECURITY_CLEARANCE)?,
            work_schedules: FixtureLookupService::bundled(LookupCategory::WORK_SCHEDULE)?,
            statuses: FixtureLookupService::bundled(LookupCategory::REQUEST_STATUS)?,
        })
    }
}

/// Lookup references resolved from a [`RequestPutModel`] before the store
/// is locked.
struct ResolvedRequestUpdate {
    classification: Option<LookupModel>,
    work_unit: Option<LookupModel>,
    selection_process_type: Option<LookupModel>,
    language_requirement: Option<LookupModel>,
    security_clearance: Option<LookupModel>,
    work_schedule: Option<LookupModel>,
}

/// Request service for running without a backend.
pub struct FixtureRequestService {
    requests: Mutex<Vec<Request>>,
    lookups: RequestLookups,
    current_user: FixtureUser,
    clock: Arc<dyn Clock>,
}

impl FixtureRequestService {
    /// # Errors
    ///
    /// Returns an error if a bundled fixture fails to decode.
    pub fn bundled() -> Result<Self, AppError> {
        Ok(Self {
            requests: Mutex::new(decode_bundle(REQUESTS_JSON, "requests")?),
            lookups: RequestLookups::bundled()?,
            current_user: FixtureUser::default(),
            clock: Arc::new(DefaultClock),
        })
    }

    #[must_use]
    pub fn with_current_user(mut self, user: FixtureUser) -> Self {
        self.current_user = user;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Request>>, AppError> {
        self.requests
            .lock()
            .map_err(|_| AppError::unexpected("request fixture store is poisoned"))
    }

    fn with_request<T>(
        &self,
        id: i64,
        apply: impl FnOnce(&mut Request) -> T,
    ) -> Result<T, AppError> {
        let mut requests = self.lock()?;
        let request = requests
            .iter_mut()
            .find(|request| request.id == id)
            .ok_or_else(|| request_not_found(id))?;
        Ok(apply(request))
    }

    fn resolve(&self, body: &RequestPutModel) -> Result<ResolvedRequestUpdate, AppError> {
        let lookups = &self.lookups;
        Ok(ResolvedRequestUpdate {
            classification: lookups.classifications.resolve(body.classification_id)?,
            work_unit: lookups.work_units.resolve(body.work_unit_id)?,
            selection_process_type: lookups
                .selection_process_types
                .resolve(body.selection_process_type_id)?,
            language_requirement: lookups
                .language_requirements
                .resolve(body.language_requirement_id)?,
            security_clearance: lookups
                .security_clearances
                .resolve(body.security_clearance_id)?,
            work_schedule: lookups.work_schedules.resolve(body.work_schedule_id)?,
        })
    }

    /// Advisor id an `hr-advisor` filter refers to; `None` when the value is
    /// neither `me` nor a number.
    fn advisor_id(&self, filter: &str) -> Option<i64> {
        if filter.eq_ignore_ascii_case(CURRENT_USER_ALIAS) {
            Some(self.current_user.summary().id)
        } else {
            filter.parse().ok()
        }
    }

    /// A user known from the seeded requests, or a bare summary.
    fn known_user(requests: &[Request], id: i64) -> UserSummary {
        requests
            .iter()
            .flat_map(|request| [&request.hiring_manager, &request.hr_advisor])
            .flatten()
            .find(|user| user.id == id)
            .cloned()
            .unwrap_or(UserSummary {
                id,
                first_name: None,
                last_name: None,
                business_email_address: None,
            })
    }
}

fn request_not_found(id: i64) -> AppError {
    AppError::new(
        ErrorCode::RequestNotFound,
        format!("Request with id '{id}' not found."),
    )
}

fn replace_if_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

#[async_trait]
impl RequestService for FixtureRequestService {
    async fn list_requests(
        &self,
        query: &RequestQuery,
        _access_token: &str,
    ) -> Result<Vec<Request>, AppError> {
        let advisor = match query.hr_advisor.as_deref() {
            Some(filter) => match self.advisor_id(filter) {
                Some(id) => Some(id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        let requests = self.lock()?;
        Ok(requests
            .iter()
            .filter(|request| query.matches(request))
            .filter(|request| {
                advisor.is_none_or(|id| {
                    request
                        .hr_advisor
                        .as_ref()
                        .is_some_and(|user| user.id == id)
                })
            })
            .cloned()
            .collect())
    }

    async fn get_request_by_id(&self, id: i64, _access_token: &str) -> Result<Request, AppError> {
        self.with_request(id, |request| request.clone())
    }

    async fn create_request(&self, _access_token: &str) -> Result<Request, AppError> {
        let status = self.lookups.statuses.entry_by_code(NEW_REQUEST_STATUS)?;
        let now = self.clock.utc();
        let mut requests = self.lock()?;
        let id = requests.iter().map(|request| request.id).max().unwrap_or(0) + 1;
        let request = Request {
            id,
            status: Some(status),
            classification: None,
            work_unit: None,
            selection_process_type: None,
            language_requirement: None,
            security_clearance: None,
            work_schedule: None,
            english_title: None,
            french_title: None,
            position_number: None,
            hiring_manager: Some(self.current_user.summary().clone()),
            hr_advisor: None,
            created_date: Some(now),
            last_modified_date: Some(now),
        };
        requests.push(request.clone());
        debug!(request_id = id, "created fixture request");
        Ok(request)
    }

    async fn update_request(
        &self,
        id: i64,
        body: &RequestPutModel,
        _access_token: &str,
    ) -> Result<Request, AppError> {
        let resolved = self.resolve(body)?;
        let now = self.clock.utc();
        let mut requests = self.lock()?;
        let advisor = body
            .hr_advisor_id
            .map(|advisor_id| Self::known_user(&requests, advisor_id));
        let request = requests
            .iter_mut()
            .find(|request| request.id == id)
            .ok_or_else(|| request_not_found(id))?;

        replace_if_some(&mut request.classification, resolved.classification);
        replace_if_some(&mut request.work_unit, resolved.work_unit);
        replace_if_some(
            &mut request.selection_process_type,
            resolved.selection_process_type,
        );
        replace_if_some(
            &mut request.language_requirement,
            resolved.language_requirement,
        );
        replace_if_some(&mut request.security_clearance, resolved.security_clearance);
        replace_if_some(&mut request.work_schedule, resolved.work_schedule);
        replace_if_some(&mut request.english_title, body.english_title.clone());
        replace_if_some(&mut request.french_title, body.french_title.clone());
        replace_if_some(&mut request.position_number, body.position_number.clone());
        replace_if_some(&mut request.hr_advisor, advisor);
        request.last_modified_date = Some(now);
        Ok(request.clone())
    }

    async fn update_request_status(
        &self,
        id: i64,
        status: &StatusUpdate,
        _access_token: &str,
    ) -> Result<(), AppError> {
        let resolved = match status.id {
            Some(status_id) => self.lookups.statuses.entry_by_id(status_id)?,
            None => self.lookups.statuses.entry_by_code(&status.code)?,
        };
        let now = self.clock.utc();
        self.with_request(id, |request| {
            request.status = Some(resolved);
            request.last_modified_date = Some(now);
        })
    }
}
