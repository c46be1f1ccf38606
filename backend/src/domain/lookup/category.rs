//! Static description of each reference-data category.

use crate::domain::{AppError, ErrorCode};

/// Where a category lives on the backend API and how its absence is reported.
///
/// # Examples
/// ```
/// use vacman::domain::{ErrorCode, LookupCategory};
///
/// let branches = LookupCategory::BRANCH;
/// assert_eq!(branches.endpoint(), "/codes/branches");
/// assert_eq!(branches.not_found_code(), ErrorCode::NoBranchFound);
/// assert_eq!(LookupCategory::from_slug("branches"), Some(branches));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupCategory {
    endpoint: &'static str,
    entity_name: &'static str,
    not_found_code: ErrorCode,
}

const CODES_PREFIX: &str = "/codes/";

impl LookupCategory {
    pub const BRANCH: Self = Self::new("/codes/branches", "Branch", ErrorCode::NoBranchFound);
    pub const CITY: Self = Self::new("/codes/cities", "City", ErrorCode::NoCityFound);
    pub const CLASSIFICATION: Self = Self::new(
        "/codes/classifications",
        "Classification",
        ErrorCode::NoClassificationFound,
    );
    pub const EMPLOYMENT_EQUITY: Self = Self::new(
        "/codes/employment-equities",
        "Employment equity",
        ErrorCode::NoEmploymentEquityFound,
    );
    pub const EMPLOYMENT_TENURE: Self = Self::new(
        "/codes/employment-tenures",
        "Employment tenure",
        ErrorCode::NoEmploymentTenureFound,
    );
    pub const LANGUAGE: Self = Self::new("/codes/languages", "Language", ErrorCode::NoLanguageFound);
    pub const LANGUAGE_REFERRAL_TYPE: Self = Self::new(
        "/codes/language-referral-types",
        "Language referral type",
        ErrorCode::NoLanguageReferralTypeFound,
    );
    pub const LANGUAGE_REQUIREMENT: Self = Self::new(
        "/codes/language-requirements",
        "Language requirement",
        ErrorCode::NoLanguageRequirementFound,
    );
    pub const NON_ADVERTISED_APPOINTMENT: Self = Self::new(
        "/codes/non-advertised-appointments",
        "Non-advertised appointment",
        ErrorCode::NoNonAdvertisedAppointmentFound,
    );
    pub const PROFILE_STATUS: Self = Self::new(
        "/codes/profile-statuses",
        "Profile status",
        ErrorCode::NoProfileStatusFound,
    );
    pub const PROVINCE: Self = Self::new(
        "/codes/provinces",
        "Province or territory",
        ErrorCode::NoProvinceFound,
    );
    pub const REQUEST_STATUS: Self = Self::new(
        "/codes/request-statuses",
        "Request status",
        ErrorCode::NoRequestStatusFound,
    );
    pub const SECURITY_CLEARANCE: Self = Self::new(
        "/codes/security-clearances",
        "Security clearance",
        ErrorCode::NoSecurityClearanceFound,
    );
    pub const SELECTION_PROCESS_TYPE: Self = Self::new(
        "/codes/selection-process-types",
        "Selection process type",
        ErrorCode::NoSelectionProcessTypeFound,
    );
    pub const WFA_STATUS: Self = Self::new(
        "/codes/wfa-statuses",
        "WFA status",
        ErrorCode::NoWfaStatusFound,
    );
    pub const WORK_SCHEDULE: Self = Self::new(
        "/codes/work-schedules",
        "Work schedule",
        ErrorCode::NoWorkScheduleFound,
    );

    /// Every category the backend exposes, in slug order.
    pub const ALL: [Self; 16] = [
        Self::BRANCH,
        Self::CITY,
        Self::CLASSIFICATION,
        Self::EMPLOYMENT_EQUITY,
        Self::EMPLOYMENT_TENURE,
        Self::LANGUAGE_REFERRAL_TYPE,
        Self::LANGUAGE_REQUIREMENT,
        Self::LANGUAGE,
        Self::NON_ADVERTISED_APPOINTMENT,
        Self::PROFILE_STATUS,
        Self::PROVINCE,
        Self::REQUEST_STATUS,
        Self::SECURITY_CLEARANCE,
        Self::SELECTION_PROCESS_TYPE,
        Self::WFA_STATUS,
        Self::WORK_SCHEDULE,
    ];

    /// Describe a category by its collection endpoint, the display name used
    /// in error messages, and the code reported when an entry is absent.
    #[must_use]
    pub const fn new(
        endpoint: &'static str,
        entity_name: &'static str,
        not_found_code: ErrorCode,
    ) -> Self {
        Self {
            endpoint,
            entity_name,
            not_found_code,
        }
    }

    /// Path of the full collection, relative to the API base URL.
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    #[must_use]
    pub fn entity_name(&self) -> &'static str {
        self.entity_name
    }

    #[must_use]
    pub fn not_found_code(&self) -> ErrorCode {
        self.not_found_code
    }

    /// Last path segment of the endpoint (`branches`, `wfa-statuses`, ...).
    #[must_use]
    pub fn slug(&self) -> &'static str {
        self.endpoint
            .strip_prefix(CODES_PREFIX)
            .unwrap_or(self.endpoint)
    }

    /// Find a known category by slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.slug() == slug)
    }

    /// Not-found error for a missing id.
    #[must_use]
    pub fn not_found_by_id(&self, id: i64) -> AppError {
        AppError::new(
            self.not_found_code,
            format!("{} with id '{id}' not found.", self.entity_name),
        )
    }

    /// Not-found error for a missing code.
    #[must_use]
    pub fn not_found_by_code(&self, code: &str) -> AppError {
        AppError::new(
            self.not_found_code,
            format!("{} with code '{code}' not found.", self.entity_name),
        )
    }

    /// Human-readable description of fetching the collection, used as the
    /// gateway's error context.
    #[must_use]
    pub fn list_context(&self) -> String {
        format!("retrieve {} list", self.entity_name.to_lowercase())
    }
}

impl std::fmt::Display for LookupCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}
