//! Integration tests for filtering and sorting the catalog.

use career_compass::{
    filter_jobs, sort_jobs, sort_sectors, Catalog, CatalogError, Difficulty, FilterCriteria,
    SalaryRange, SortOption, ViewCounts,
};

fn catalog() -> Catalog {
    Catalog::from_json(include_str!("../fixtures/careers.json")).unwrap()
}

fn ids<'a>(jobs: impl IntoIterator<Item = &'a career_compass::Job>) -> Vec<&'a str> {
    jobs.into_iter().map(|j| j.id.as_str()).collect()
}

#[test]
fn fixture_catalog_is_consistent() {
    let catalog = catalog();
    assert_eq!(catalog.sectors().len(), 3);
    assert_eq!(catalog.jobs().len(), 5);

    for job in catalog.jobs() {
        assert!(catalog.sector_for(job).is_ok());
    }

    let scientist = catalog.job("data-scientist").unwrap();
    assert_eq!(scientist.required_certificates().count(), 1);
    assert_eq!(scientist.roadmap[0].title, "Statistics");
}

#[test]
fn missing_ids_render_as_not_found() {
    let catalog = catalog();
    assert!(catalog.job("astronaut").unwrap_err().is_not_found());
    assert_eq!(
        catalog.sector("space").unwrap_err(),
        CatalogError::UnknownSectorId("space".into())
    );
}

#[test]
fn default_criteria_keep_everything() {
    let catalog = catalog();
    let all = filter_jobs(catalog.jobs(), &FilterCriteria::default());
    assert_eq!(all.len(), catalog.jobs().len());
}

#[test]
fn filter_then_sort_within_a_sector() {
    let catalog = catalog();
    let tech = catalog.jobs_in_sector("technology").unwrap();

    let criteria = FilterCriteria::new()
        .with_difficulty(Difficulty::Beginner)
        .with_difficulty(Difficulty::Advanced);
    let filtered = filter_jobs(tech.iter().copied(), &criteria);
    let sorted = sort_jobs(filtered, SortOption::AlphabeticalAsc, &ViewCounts::default());

    assert_eq!(ids(sorted), vec!["data-scientist", "it-support"]);
}

#[test]
fn shared_skill_matches_across_sectors() {
    let catalog = catalog();
    let criteria = FilterCriteria::new().with_skill("communication");
    assert_eq!(
        ids(filter_jobs(catalog.jobs(), &criteria)),
        vec!["nurse", "graphic-designer"]
    );
}

#[test]
fn salary_band_overlap() {
    let catalog = catalog();

    let band = FilterCriteria::new().with_salary_range(45_000, 65_000);
    assert_eq!(
        ids(filter_jobs(catalog.jobs(), &band)),
        vec!["web-developer", "it-support", "nurse", "graphic-designer"]
    );

    let out_of_reach = FilterCriteria {
        salary_range: SalaryRange::new(200_000, 300_000),
        ..FilterCriteria::default()
    };
    assert!(filter_jobs(catalog.jobs(), &out_of_reach).is_empty());
}

#[test]
fn unbounded_range_admits_high_salaries() {
    let catalog = catalog();
    let criteria = FilterCriteria {
        salary_range: SalaryRange::any(),
        ..FilterCriteria::default()
    };
    assert_eq!(filter_jobs(catalog.jobs(), &criteria).len(), 5);
}

#[test]
fn sort_is_case_insensitive_and_reversible() {
    let catalog = catalog();
    let counts = ViewCounts::default();

    let asc = sort_jobs(catalog.jobs(), SortOption::AlphabeticalAsc, &counts);
    assert_eq!(
        ids(asc.iter().copied()),
        vec![
            "data-scientist",
            "graphic-designer",
            "it-support",
            "nurse",
            "web-developer"
        ]
    );

    let desc = sort_jobs(asc.iter().copied(), SortOption::AlphabeticalDesc, &counts);
    let mut reversed = ids(asc.iter().copied());
    reversed.reverse();
    assert_eq!(ids(desc), reversed);
}

#[test]
fn sector_sorting() {
    let catalog = catalog();
    let names = |option| -> Vec<String> {
        sort_sectors(catalog.sectors(), option)
            .iter()
            .map(|s| s.id.clone())
            .collect()
    };

    assert_eq!(names(SortOption::AlphabeticalAsc), vec!["arts", "healthcare", "technology"]);
    assert_eq!(names(SortOption::AlphabeticalDesc), vec!["technology", "healthcare", "arts"]);
    assert_eq!(names(SortOption::MostViewed), vec!["technology", "healthcare", "arts"]);
}

#[test]
fn every_sort_option_keeps_all_jobs() {
    let catalog = catalog();
    for option in SortOption::ALL {
        assert_eq!(
            sort_jobs(catalog.jobs(), option, &ViewCounts::default()).len(),
            catalog.jobs().len()
        );
    }
}
