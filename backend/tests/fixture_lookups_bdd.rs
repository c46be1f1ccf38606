//! Behaviour tests for fixture-backed lookup services.
//!
//! Scenarios exercise the public `LookupService` contract over fixtures:
//! localisation, optional lookups and category-specific not-found errors.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;
use vacman::domain::ports::LookupService;
use vacman::domain::{AppError, Language, LocalizedLookupModel, LookupCategory, LookupModel};
use vacman::outbound::fixtures::FixtureLookupService;

struct LookupWorld {
    runtime: Runtime,
    service: RefCell<Option<FixtureLookupService<LookupModel>>>,
    entry: RefCell<Option<Option<LocalizedLookupModel>>>,
    error: RefCell<Option<AppError>>,
    bilingual: RefCell<Vec<LookupModel>>,
    localised: RefCell<Vec<LocalizedLookupModel>>,
}

impl LookupWorld {
    fn new() -> Self {
        Self {
            runtime: Runtime::new().expect("tokio runtime should initialize"),
            service: RefCell::new(None),
            entry: RefCell::new(None),
            error: RefCell::new(None),
            bilingual: RefCell::new(Vec::new()),
            localised: RefCell::new(Vec::new()),
        }
    }

    fn install(&self, service: FixtureLookupService<LookupModel>) {
        *self.service.borrow_mut() = Some(service);
    }

    fn service(&self) -> FixtureLookupService<LookupModel> {
        self.service
            .borrow()
            .clone()
            .expect("a fixture should be installed")
    }

    fn localised_entry(&self) -> Option<LocalizedLookupModel> {
        self.entry
            .borrow()
            .clone()
            .expect("an entry should have been requested")
    }
}

#[fixture]
fn world() -> LookupWorld {
    LookupWorld::new()
}

#[given("a non-advertised appointment fixture holding only \"{code}\"")]
fn a_single_entry_fixture(world: &LookupWorld, code: String) {
    let json = format!(
        r#"{{"content":[{{"id":1,"code":"{code}","nameEn":"Not Applicable","nameFr":"Sans objet"}}]}}"#
    );
    let service = FixtureLookupService::from_json(LookupCategory::NON_ADVERTISED_APPOINTMENT, &json)
        .expect("fixture should parse");
    world.install(service);
}

#[given("the bundled \"{slug}\" fixture")]
fn the_bundled_fixture(world: &LookupWorld, slug: String) {
    let category = LookupCategory::from_slug(&slug).expect("known category");
    world.install(FixtureLookupService::bundled(category).expect("bundled fixture"));
}

#[when("entry {id} is requested in French")]
fn entry_is_requested_in_french(world: &LookupWorld, id: i64) {
    let service = world.service();
    let outcome = world
        .runtime
        .block_on(service.get_localized_by_id(id, Language::Fr));
    match outcome {
        Ok(entry) => *world.entry.borrow_mut() = Some(Some(entry)),
        Err(error) => *world.error.borrow_mut() = Some(error),
    }
}

#[when("entry {id} is looked up optionally in French")]
fn entry_is_looked_up_optionally(world: &LookupWorld, id: i64) {
    let service = world.service();
    let entry = world
        .runtime
        .block_on(service.find_localized_by_id(id, Language::Fr));
    *world.entry.borrow_mut() = Some(entry);
}

#[when("the entry with code \"{code}\" is requested")]
fn the_entry_with_code_is_requested(world: &LookupWorld, code: String) {
    let service = world.service();
    let outcome = world.runtime.block_on(service.get_by_code(&code));
    if let Err(error) = outcome {
        *world.error.borrow_mut() = Some(error);
    }
}

#[when("every entry is listed in French")]
fn every_entry_is_listed_in_french(world: &LookupWorld) {
    let service = world.service();
    let (bilingual, localised) = world.runtime.block_on(async {
        let bilingual = service.list_all().await.expect("list should succeed");
        let localised = service
            .list_all_localized(Language::Fr)
            .await
            .expect("localised list should succeed");
        (bilingual, localised)
    });
    *world.bilingual.borrow_mut() = bilingual;
    *world.localised.borrow_mut() = localised;
}

#[then("the localised entry has id {id}, code \"{code}\" and name \"{name}\"")]
fn the_localised_entry_matches(world: &LookupWorld, id: i64, code: String, name: String) {
    assert!(world.error.borrow().is_none(), "lookup should succeed");
    assert_eq!(
        world.localised_entry(),
        Some(LocalizedLookupModel { id, code, name })
    );
}

#[then("no entry is returned")]
fn no_entry_is_returned(world: &LookupWorld) {
    assert_eq!(world.localised_entry(), None);
}

#[then("the lookup fails with code \"{code}\"")]
fn the_lookup_fails_with_code(world: &LookupWorld, code: String) {
    let error = world.error.borrow();
    let error = error.as_ref().expect("lookup should fail");
    assert_eq!(error.code().as_str(), code);
    assert!(error.is_not_found());
}

#[then("the localised list is as long as the bilingual list")]
fn the_localised_list_keeps_cardinality(world: &LookupWorld) {
    assert!(!world.bilingual.borrow().is_empty());
    assert_eq!(world.localised.borrow().len(), world.bilingual.borrow().len());
}

#[then("the entry \"{code}\" is named \"{name}\"")]
fn the_entry_is_named(world: &LookupWorld, code: String, name: String) {
    let localised = world.localised.borrow();
    let entry = localised
        .iter()
        .find(|entry| entry.code == code)
        .expect("entry should be listed");
    assert_eq!(entry.name, name);
}

#[scenario(
    path = "tests/features/fixture_lookups.feature",
    name = "A lookup entry is localised by id"
)]
fn a_lookup_entry_is_localised_by_id(world: LookupWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/fixture_lookups.feature",
    name = "An absent id yields no entry"
)]
fn an_absent_id_yields_no_entry(world: LookupWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/fixture_lookups.feature",
    name = "A missing code reports the category error"
)]
fn a_missing_code_reports_the_category_error(world: LookupWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/fixture_lookups.feature",
    name = "Localised lists keep every entry"
)]
fn localised_lists_keep_every_entry(world: LookupWorld) {
    drop(world);
}
