use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::timeout;
use vitesse_core::{
    CandidateInput, CandidateRecord, CandidateService, CandidateStore, CoreConfig,
    DirectoryViewState, DisplayTab,
};

const WAIT: Duration = Duration::from_secs(2);

fn input<'a>(first_name: &'a str, last_name: &'a str) -> CandidateInput<'a> {
    CandidateInput {
        first_name,
        last_name,
        phone_number: "0612345678",
        email: "someone@email.com",
        date_of_birth: "01/01/1990",
        salary_text: "40000",
        notes: "",
        profile_photo_ref: None,
    }
}

fn names(records: &[CandidateRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.first_name.clone())
        .collect()
}

async fn wait_for_names(rx: &mut watch::Receiver<Vec<CandidateRecord>>, expected: &[&str]) {
    let satisfied = timeout(WAIT, rx.wait_for(|records| names(records) == expected))
        .await
        .map(|outcome| outcome.is_ok());
    match satisfied {
        Ok(true) => {}
        Ok(false) => panic!("displayed channel closed"),
        Err(_) => panic!(
            "timed out waiting for {expected:?}, last value {:?}",
            names(&rx.borrow())
        ),
    }
}

async fn eventually(mut condition: impl FnMut() -> bool) {
    let poll = async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };
    within(poll).await;
}

async fn within<F: Future>(future: F) -> F::Output {
    timeout(WAIT, future).await.expect("condition not met in time")
}

fn setup() -> (Arc<CandidateStore>, CandidateService<Arc<CandidateStore>>) {
    let store = Arc::new(CandidateStore::open(&CoreConfig::in_memory()).unwrap());
    let service = CandidateService::new(Arc::clone(&store));
    (store, service)
}

#[tokio::test]
async fn loads_initial_snapshot_then_clears_loading() {
    let (store, service) = setup();
    service.add_candidate(&input("Jean", "Dupont")).unwrap();

    let view = DirectoryViewState::spawn(&store).unwrap();
    within(view.wait_until_loaded()).await.unwrap();

    assert!(!view.is_loading());
    assert_eq!(names(&view.current()), vec!["Jean"]);
}

#[tokio::test]
async fn scenario_reacts_to_tab_search_and_store_changes() {
    let (store, service) = setup();
    let jean = service.add_candidate(&input("Jean", "Dupont")).unwrap();
    let marie = service.add_candidate(&input("Marie", "Martin")).unwrap();
    service.toggle_favorite(&marie).unwrap();

    let view = DirectoryViewState::spawn(&store).unwrap();
    let mut displayed = view.displayed();
    wait_for_names(&mut displayed, &["Jean", "Marie"]).await;

    view.set_tab(DisplayTab::Favorites).unwrap();
    wait_for_names(&mut displayed, &["Marie"]).await;

    view.set_tab(DisplayTab::All).unwrap();
    view.set_search_text("dup").unwrap();
    wait_for_names(&mut displayed, &["Jean"]).await;

    view.set_search_text("mar").unwrap();
    wait_for_names(&mut displayed, &["Marie"]).await;
    let query = view.query().unwrap();
    assert_eq!(query.search_text, "mar");
    assert_eq!(query.active_tab, DisplayTab::All);

    // A store write alone must refresh the list under the active search.
    service.add_candidate(&input("Martine", "Aubry")).unwrap();
    wait_for_names(&mut displayed, &["Marie", "Martine"]).await;

    service.toggle_favorite(&jean).unwrap();
    view.set_search_text("").unwrap();
    view.set_tab(DisplayTab::Favorites).unwrap();
    wait_for_names(&mut displayed, &["Jean", "Marie"]).await;
}

#[tokio::test]
async fn tab_and_search_changes_are_visible_as_soon_as_they_return() {
    let (store, service) = setup();
    service.add_candidate(&input("Jean", "Dupont")).unwrap();
    let marie = service.add_candidate(&input("Marie", "Martin")).unwrap();
    service.toggle_favorite(&marie).unwrap();

    let view = DirectoryViewState::spawn(&store).unwrap();
    within(view.wait_until_loaded()).await.unwrap();
    let mut displayed = view.displayed();
    displayed.borrow_and_update();

    view.set_tab(DisplayTab::Favorites).unwrap();
    assert_eq!(view.query().unwrap().active_tab, DisplayTab::Favorites);
    assert_eq!(names(&view.current()), vec!["Marie"]);
    assert!(displayed.has_changed().unwrap());
    assert_eq!(names(&displayed.borrow_and_update()), vec!["Marie"]);

    view.set_tab(DisplayTab::All).unwrap();
    view.set_search_text("  DUP ").unwrap();
    assert_eq!(names(&view.current()), vec!["Jean"]);

    view.set_search_text("nobody").unwrap();
    assert!(view.current().is_empty());
}

#[tokio::test]
async fn deleting_a_favorite_updates_favorites_tab() {
    let (store, service) = setup();
    let marie = service.add_candidate(&input("Marie", "Martin")).unwrap();
    let marie = service.toggle_favorite(&marie).unwrap();

    let view = DirectoryViewState::spawn(&store).unwrap();
    view.set_tab(DisplayTab::Favorites).unwrap();
    let mut displayed = view.displayed();
    wait_for_names(&mut displayed, &["Marie"]).await;

    service.remove(&marie).unwrap();
    wait_for_names(&mut displayed, &[]).await;
}

#[tokio::test]
async fn views_share_store_streams_and_release_them_on_drop() {
    let (store, _service) = setup();

    let first = DirectoryViewState::spawn(&store).unwrap();
    let second = DirectoryViewState::spawn(&store).unwrap();
    within(first.wait_until_loaded()).await.unwrap();
    within(second.wait_until_loaded()).await.unwrap();
    assert_eq!(store.subscriber_counts(), (2, 2));

    drop(first);
    eventually(|| store.subscriber_counts() == (1, 1)).await;

    drop(second);
    eventually(|| store.subscriber_counts() == (0, 0)).await;
}

#[tokio::test]
async fn view_keeps_serving_after_store_handle_is_dropped() {
    let (store, service) = setup();
    service.add_candidate(&input("Jean", "Dupont")).unwrap();

    let view = DirectoryViewState::spawn(&store).unwrap();
    let mut displayed = view.displayed();
    wait_for_names(&mut displayed, &["Jean"]).await;
    drop(service);
    drop(store);

    view.set_search_text("zzz").unwrap();
    wait_for_names(&mut displayed, &[]).await;
}

#[tokio::test]
async fn dropping_view_closes_displayed_channel() {
    let (store, _service) = setup();
    let view = DirectoryViewState::spawn(&store).unwrap();
    within(view.wait_until_loaded()).await.unwrap();

    let mut displayed = view.displayed();
    displayed.borrow_and_update();
    drop(view);

    let closed = within(displayed.changed()).await;
    assert!(closed.is_err());
}
