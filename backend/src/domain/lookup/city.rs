//! Cities carry the province or territory they belong to.

use serde::{Deserialize, Serialize};

use super::{LocalizedLookupModel, LookupEntity, LookupModel};
use crate::domain::Language;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityModel {
    pub id: i64,
    pub code: String,
    pub name_en: String,
    pub name_fr: String,
    pub province_territory: LookupModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedCityModel {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub province_territory: LocalizedLookupModel,
}

impl LookupEntity for CityModel {
    type Localized = LocalizedCityModel;

    fn id(&self) -> i64 {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn localize(&self, language: Language) -> LocalizedCityModel {
        LocalizedCityModel {
            id: self.id,
            code: self.code.clone(),
            name: language.pick(&self.name_en, &self.name_fr).to_owned(),
            province_territory: self.province_territory.localize(language),
        }
    }
}
