//! Reference-data (lookup) records and their localised projections.
//!
//! Lookup records are small bilingual catalogue entries (branches, cities,
//! classifications, ...) fetched from the backend API. They are immutable
//! once fetched; the localised forms are derived at read time and never
//! persisted.

mod category;
mod city;

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::Language;

pub use category::LookupCategory;
pub use city::{CityModel, LocalizedCityModel};


/// Canonical bilingual reference-data record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupModel {
    pub id: i64,
    pub code: String,
    pub name_en: String,
    pub name_fr: String,
}

impl LookupModel {
    pub fn new(
        id: i64,
        code: impl Into<String>,
        name_en: impl Into<String>,
        name_fr: impl Into<String>,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name_en: name_en.into(),
            name_fr: name_fr.into(),
        }
    }
}

/// [`LookupModel`] with the name resolved for one display language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedLookupModel {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// A record a lookup service can serve.
///
/// Implementors identify themselves by `id` and `code` and know how to
/// project themselves onto a single display language.
pub trait LookupEntity:
    DeserializeOwned + Serialize + Debug + Clone + PartialEq + Send + Sync + 'static
{
    /// Single-language projection of the record.
    type Localized: Serialize + Debug + Clone + PartialEq + Send + Sync + 'static;

    fn id(&self) -> i64;

    fn code(&self) -> &str;

    /// Replace the bilingual names with the one matching `language`.
    fn localize(&self, language: Language) -> Self::Localized;
}

impl LookupEntity for LookupModel {
    type Localized = LocalizedLookupModel;

    fn id(&self) -> i64 {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn localize(&self, language: Language) -> LocalizedLookupModel {
        LocalizedLookupModel {
            id: self.id,
            code: self.code.clone(),
            name: language.pick(&self.name_en, &self.name_fr).to_owned(),
        }
    }
}
