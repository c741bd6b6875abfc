use vitesse_core::{
    derive_displayed, CandidateDraft, CandidateRecord, CandidateRepository, CandidateStore,
    CoreConfig, DisplayQuery, DisplayTab,
};

fn draft(first: &str, last: &str, is_favorite: bool) -> CandidateDraft {
    CandidateDraft {
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone_number: "0612345678".to_string(),
        email: "someone@email.com".to_string(),
        date_of_birth: "01/01/1990".to_string(),
        expected_salary: 40000.0,
        notes: String::new(),
        profile_photo_ref: None,
        is_favorite,
    }
}

fn query(active_tab: DisplayTab, search_text: &str) -> DisplayQuery {
    DisplayQuery {
        active_tab,
        search_text: search_text.to_string(),
    }
}

struct Fixture {
    store: CandidateStore,
}

impl Fixture {
    fn new(rows: &[(&str, &str, bool)]) -> Self {
        let store = CandidateStore::open(&CoreConfig::in_memory()).unwrap();
        for (first, last, favorite) in rows {
            store.insert(&draft(first, last, *favorite)).unwrap();
        }
        Self { store }
    }

    fn displayed(&self, query: &DisplayQuery) -> Vec<CandidateRecord> {
        let all = self.store.list_all().unwrap();
        let favorites = self.store.list_favorites().unwrap();
        derive_displayed(&all, &favorites, query)
    }

    fn names(&self, query: &DisplayQuery) -> Vec<String> {
        self.displayed(query)
            .into_iter()
            .map(|record| record.first_name)
            .collect()
    }
}

#[test]
fn scenario_tabs_and_search() {
    let fixture = Fixture::new(&[("Jean", "Dupont", false), ("Marie", "Martin", true)]);

    assert_eq!(fixture.names(&query(DisplayTab::All, "")), vec!["Jean", "Marie"]);
    assert_eq!(fixture.names(&query(DisplayTab::Favorites, "")), vec!["Marie"]);
    assert_eq!(fixture.names(&query(DisplayTab::All, "mar")), vec!["Marie"]);
}

#[test]
fn all_tab_without_search_equals_all_stream_verbatim() {
    let fixture = Fixture::new(&[
        ("Zoe", "Zola", true),
        ("Adam", "Abel", false),
        ("Marc", "Morel", true),
    ]);
    let stream = fixture.store.stream_all().unwrap();

    let displayed = fixture.displayed(&query(DisplayTab::All, "   "));
    assert_eq!(displayed, *stream.borrow());
}

#[test]
fn favorites_tab_lists_only_favorites_in_name_order() {
    let fixture = Fixture::new(&[
        ("Zoe", "zola", true),
        ("Adam", "Abel", false),
        ("marc", "Morel", true),
        ("Anna", "morel", true),
    ]);

    let displayed = fixture.displayed(&query(DisplayTab::Favorites, ""));
    assert!(displayed.iter().all(|record| record.is_favorite));
    let names: Vec<_> = displayed
        .iter()
        .map(|record| format!("{} {}", record.first_name, record.last_name))
        .collect();
    assert_eq!(names, vec!["Anna morel", "marc Morel", "Zoe zola"]);
}

#[test]
fn search_matches_first_or_last_name_case_insensitively_without_reordering() {
    let fixture = Fixture::new(&[
        ("Marie", "Martin", false),
        ("Jean", "Dupont", false),
        ("Thomas", "Marchand", true),
        ("Omar", "Sy", false),
        ("Lucas", "Robert", true),
    ]);

    for text in ["MAR", " mar ", "Mar"] {
        let names = fixture.names(&query(DisplayTab::All, text));
        assert_eq!(names, vec!["Marie", "Thomas", "Omar"], "search {text:?}");
    }

    assert_eq!(
        fixture.names(&query(DisplayTab::Favorites, "mar")),
        vec!["Thomas"]
    );
    assert!(fixture.names(&query(DisplayTab::All, "xyz")).is_empty());
}

#[test]
fn search_result_is_exactly_the_matching_subset_of_base() {
    let fixture = Fixture::new(&[
        ("Chloé", "Moreau", true),
        ("Emma", "Richard", true),
        ("Antoine", "Durand", false),
        ("Sophie", "Petit", true),
    ]);

    for tab in [DisplayTab::All, DisplayTab::Favorites] {
        for text in ["o", "ÉM", "é", "ar", "petit", "z"] {
            let q = query(tab, text);
            let base = fixture.displayed(&query(tab, ""));
            let needle = text.trim().to_lowercase();
            let expected: Vec<_> = base
                .into_iter()
                .filter(|record| {
                    record.first_name.to_lowercase().contains(&needle)
                        || record.last_name.to_lowercase().contains(&needle)
                })
                .collect();
            assert_eq!(fixture.displayed(&q), expected, "{tab:?} / {text:?}");
        }
    }
}
