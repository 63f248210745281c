use async_trait::async_trait;
use chrono::Utc;
use club_site::{
    client::{
        AdminConsole, ClientError, GatewayClient, LoginReply, MemoryTokenStore, Mutation, Notice,
        RecordEditor, TokenStore, VerifyReply,
    },
    models::{
        Collection, CollectionType, GalleryItem, Match, NewsItem, Player, RecordKind, Settings,
    },
};
use serde_json::{Value, json};
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Fetch(CollectionType),
    Login(String),
    Verify(String),
    Send {
        method: String,
        query: Vec<(&'static str, String)>,
        body: Option<Value>,
        token: Option<String>,
    },
}

/// Scripted gateway. Serves a fixed data set, records every call and can
/// fail or hang individual reads.
#[derive(Default)]
struct FakeGateway {
    calls: Mutex<Vec<Call>>,
    data: Mutex<Vec<Collection>>,
    failing: Mutex<HashSet<CollectionType>>,
    hanging: Mutex<HashSet<CollectionType>>,
    fail_sends: Mutex<bool>,
}

impl FakeGateway {
    fn with_data(data: Vec<Collection>) -> Arc<Self> {
        Arc::new(Self {
            data: Mutex::new(data),
            ..Default::default()
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn sends(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Send { .. }))
            .collect()
    }

    fn fetch_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Fetch(_)))
            .count()
    }

    fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn set(&self, collection: Collection) {
        let mut data = self.data.lock().unwrap();
        data.retain(|c| c.collection_type() != collection.collection_type());
        data.push(collection);
    }

    fn fail(&self, collection: CollectionType) {
        self.failing.lock().unwrap().insert(collection);
    }

    fn hang(&self, collection: CollectionType) {
        self.hanging.lock().unwrap().insert(collection);
    }
}

#[async_trait]
impl GatewayClient for FakeGateway {
    async fn fetch(&self, collection: CollectionType) -> Result<Collection, ClientError> {
        self.calls.lock().unwrap().push(Call::Fetch(collection));

        if self.hanging.lock().unwrap().contains(&collection) {
            std::future::pending::<()>().await;
        }
        if self.failing.lock().unwrap().contains(&collection) {
            return Err(ClientError::Status {
                status: 500,
                message: "boom".into(),
            });
        }

        let found = self
            .data
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.collection_type() == collection)
            .cloned();
        Ok(found.unwrap_or_else(|| empty(collection)))
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginReply, ClientError> {
        self.calls.lock().unwrap().push(Call::Login(username.into()));
        if username == "admin" && password == "secret" {
            Ok(LoginReply {
                token: Some("good-token".into()),
                username: Some("admin".into()),
                error: None,
            })
        } else {
            Ok(LoginReply {
                token: None,
                username: None,
                error: Some("Invalid credentials".into()),
            })
        }
    }

    async fn verify(&self, token: &str) -> Result<VerifyReply, ClientError> {
        self.calls.lock().unwrap().push(Call::Verify(token.into()));
        if token == "unreachable" {
            return Err(ClientError::Transport("connection refused".into()));
        }
        Ok(VerifyReply {
            valid: token == "good-token",
            username: (token == "good-token").then(|| "admin".to_string()),
            error: (token != "good-token").then(|| "Invalid token".to_string()),
        })
    }

    async fn send(&self, mutation: &Mutation, token: Option<&str>) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(Call::Send {
            method: mutation.method().to_string(),
            query: mutation.query(),
            body: mutation.body(),
            token: token.map(str::to_string),
        });
        if *self.fail_sends.lock().unwrap() {
            return Err(ClientError::Status {
                status: 500,
                message: "write failed".into(),
            });
        }
        Ok(())
    }
}

fn empty(collection: CollectionType) -> Collection {
    match collection {
        CollectionType::News => Collection::News(Vec::new()),
        CollectionType::Matches => Collection::Matches(Vec::new()),
        CollectionType::Players => Collection::Players(Vec::new()),
        CollectionType::Gallery => Collection::Gallery(Vec::new()),
        CollectionType::Settings => Collection::Settings(Settings::default()),
    }
}

fn player(id: i32, number: i32, name: &str) -> Player {
    Player {
        id,
        number,
        name: name.into(),
        position: "Forward".into(),
        image_url: None,
        bio: None,
    }
}

fn game(id: i32, home: &str) -> Match {
    Match {
        id,
        match_date: "2026-02-01".into(),
        match_time: "18:30".into(),
        home_team: home.into(),
        away_team: "Visitors".into(),
        score: None,
        location: "Arena".into(),
        home_logo: None,
        away_logo: None,
        created_at: Utc::now(),
    }
}

fn news(id: i32, title: &str) -> NewsItem {
    NewsItem {
        id,
        title: title.into(),
        content: "Body".into(),
        category: Some("Club".into()),
        image_url: None,
        published_date: Utc::now(),
    }
}

fn settings(pairs: &[(&str, &str)]) -> Settings {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

async fn logged_in(
    gateway: Arc<FakeGateway>,
) -> AdminConsole<Arc<FakeGateway>, MemoryTokenStore> {
    let mut console = AdminConsole::new(gateway, MemoryTokenStore::new());
    assert!(console.login("admin", "secret").await);
    console.take_notices();
    console
}

#[tokio::test]
async fn test_invalid_login_keeps_session_anonymous() {
    let gateway = FakeGateway::with_data(Vec::new());
    let mut console = AdminConsole::new(gateway.clone(), MemoryTokenStore::new());

    assert!(!console.login("admin", "wrong").await);

    assert!(!console.session().is_authenticated());
    assert_eq!(console.session().store().load().unwrap(), None);
    assert_eq!(
        console.notices(),
        &[Notice::Failure("Invalid username or password".into())]
    );
    assert_eq!(gateway.fetch_count(), 0);
}

#[tokio::test]
async fn test_login_persists_token_and_loads_everything() {
    let gateway = FakeGateway::with_data(vec![Collection::Players(vec![player(1, 7, "Ivan")])]);
    let mut console = AdminConsole::new(gateway.clone(), MemoryTokenStore::new());

    assert!(console.login("admin", "secret").await);

    assert_eq!(console.session().token(), Some("good-token"));
    assert_eq!(console.session().username(), Some("admin"));
    assert_eq!(
        console.session().store().load().unwrap().as_deref(),
        Some("good-token")
    );
    assert_eq!(console.notices(), &[Notice::Success("Welcome, admin!".into())]);
    assert_eq!(gateway.fetch_count(), 5);
    assert_eq!(console.content().players.len(), 1);
}

#[tokio::test]
async fn test_mount_restores_valid_stored_token() {
    let gateway = FakeGateway::with_data(Vec::new());
    let mut console =
        AdminConsole::new(gateway.clone(), MemoryTokenStore::with_token("good-token"));

    assert!(console.mount().await);

    assert!(console.session().is_authenticated());
    assert_eq!(gateway.calls()[0], Call::Verify("good-token".into()));
    assert_eq!(gateway.fetch_count(), 5);
}

#[tokio::test]
async fn test_mount_clears_rejected_token() {
    let gateway = FakeGateway::with_data(Vec::new());
    let mut console = AdminConsole::new(gateway.clone(), MemoryTokenStore::with_token("stale"));

    assert!(!console.mount().await);

    assert!(!console.session().is_authenticated());
    assert_eq!(console.session().store().load().unwrap(), None);
    assert_eq!(gateway.fetch_count(), 0);
}

#[tokio::test]
async fn test_mount_keeps_token_when_gateway_unreachable() {
    let gateway = FakeGateway::with_data(Vec::new());
    let mut console =
        AdminConsole::new(gateway.clone(), MemoryTokenStore::with_token("unreachable"));

    assert!(!console.mount().await);

    assert!(!console.session().is_authenticated());
    assert_eq!(
        console.session().store().load().unwrap().as_deref(),
        Some("unreachable")
    );
}

#[tokio::test]
async fn test_logout_clears_token_and_editor() {
    let gateway = FakeGateway::with_data(Vec::new());
    let mut console = logged_in(gateway).await;
    console.open_editor(RecordKind::News, None);

    console.logout();

    assert!(!console.session().is_authenticated());
    assert!(console.editor().is_none());
    assert_eq!(console.session().store().load().unwrap(), None);
}

#[tokio::test]
async fn test_update_player_sends_exact_field_map_then_reloads() {
    let gateway = FakeGateway::with_data(vec![Collection::Players(vec![player(5, 7, "Ivan")])]);
    let mut console = logged_in(gateway.clone()).await;

    assert!(console.edit_record(RecordKind::Players, 5));
    let editor = console.editor_mut().unwrap();
    assert_eq!(editor.value("number"), Some("7"));
    assert_eq!(editor.value("bio"), Some(""));
    editor.set("name", "Ivan Petrov").unwrap();

    gateway.clear_calls();
    gateway.set(Collection::Players(vec![Player {
        name: "Ivan Petrov".into(),
        ..player(5, 7, "")
    }]));

    console.save().await.unwrap();

    let calls = gateway.calls();
    assert_eq!(
        calls[0],
        Call::Send {
            method: "PUT".into(),
            query: vec![("type", "players".into()), ("id", "5".into())],
            body: Some(json!({
                "number": "7",
                "name": "Ivan Petrov",
                "position": "Forward",
                "image_url": "",
                "bio": ""
            })),
            token: Some("good-token".into()),
        }
    );
    assert_eq!(calls.len(), 6);
    assert!(calls[1..].iter().all(|c| matches!(c, Call::Fetch(_))));

    assert!(console.editor().is_none());
    assert_eq!(console.content().players[0].name, "Ivan Petrov");
    assert_eq!(console.notices(), &[Notice::Success("Changes saved".into())]);
}

#[tokio::test]
async fn test_create_news_sends_action_and_type() {
    let gateway = FakeGateway::with_data(Vec::new());
    let mut console = logged_in(gateway.clone()).await;

    console.open_editor(RecordKind::News, None);
    let editor = console.editor_mut().unwrap();
    assert!(editor.is_new());
    editor.set("title", "Derby win").unwrap();
    editor.set("content", "4:1 at home").unwrap();
    editor.set("category", "Results").unwrap();
    gateway.clear_calls();

    console.save().await.unwrap();

    match &gateway.sends()[0] {
        Call::Send {
            method,
            query,
            body,
            ..
        } => {
            assert_eq!(method, "POST");
            assert!(query.is_empty());
            let body = body.as_ref().unwrap();
            assert_eq!(body["action"], "create");
            assert_eq!(body["type"], "news");
            assert_eq!(body["title"], "Derby win");
        }
        other => panic!("unexpected call {:?}", other),
    }
    assert_eq!(console.notices(), &[Notice::Success("Item created".into())]);
}

#[tokio::test]
async fn test_blank_required_field_blocks_submit() {
    let gateway = FakeGateway::with_data(Vec::new());
    let mut console = logged_in(gateway.clone()).await;

    console.open_editor(RecordKind::News, None);
    let editor = console.editor_mut().unwrap();
    editor.set("title", "   ").unwrap();
    editor.set("content", "Body").unwrap();
    editor.set("category", "Club").unwrap();
    gateway.clear_calls();

    let err = console.save().await.unwrap_err();

    assert!(matches!(err, ClientError::MissingFields(ref fields) if fields == &["title"]));
    assert!(gateway.calls().is_empty());
    assert!(console.editor().is_some());
    assert!(console.notices().is_empty());
}

#[tokio::test]
async fn test_editor_rejects_unknown_field() {
    let mut editor = RecordEditor::create(RecordKind::Gallery);
    assert!(matches!(
        editor.set("number", "3"),
        Err(ClientError::UnknownField { .. })
    ));
    assert_eq!(editor.missing_required(), vec!["image_url"]);
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let gateway = FakeGateway::with_data(vec![Collection::News(vec![news(3, "Old")])]);
    let mut console = logged_in(gateway.clone()).await;
    gateway.clear_calls();

    let mut prompt = String::new();
    let sent = console
        .delete(RecordKind::News, 3, |text| {
            prompt = text.to_string();
            false
        })
        .await
        .unwrap();

    assert!(!sent);
    assert_eq!(prompt, "Are you sure?");
    assert!(gateway.calls().is_empty());
    assert_eq!(console.content().news.len(), 1);
}

#[tokio::test]
async fn test_confirmed_delete_sends_and_reloads() {
    let gateway = FakeGateway::with_data(vec![Collection::News(vec![news(3, "Old")])]);
    let mut console = logged_in(gateway.clone()).await;
    gateway.clear_calls();
    gateway.set(Collection::News(Vec::new()));

    assert!(console.delete(RecordKind::News, 3, |_| true).await.unwrap());

    assert_eq!(
        gateway.calls()[0],
        Call::Send {
            method: "DELETE".into(),
            query: vec![("type", "news".into()), ("id", "3".into())],
            body: None,
            token: Some("good-token".into()),
        }
    );
    assert_eq!(gateway.fetch_count(), 5);
    assert!(console.content().news.is_empty());
    assert_eq!(console.notices(), &[Notice::Success("Item deleted".into())]);
}

#[tokio::test]
async fn test_failed_write_keeps_editor_and_skips_reload() {
    let gateway = FakeGateway::with_data(Vec::new());
    let mut console = logged_in(gateway.clone()).await;
    *gateway.fail_sends.lock().unwrap() = true;

    console.open_editor(RecordKind::Gallery, None);
    console.editor_mut().unwrap().set("image_url", "a.jpg").unwrap();
    gateway.clear_calls();

    assert!(console.save().await.is_err());

    assert_eq!(gateway.fetch_count(), 0);
    assert!(console.editor().is_some());
    assert_eq!(console.notices(), &[Notice::Failure("Failed to save".into())]);

    assert!(console.delete(RecordKind::Gallery, 1, |_| true).await.is_err());
    assert_eq!(
        console.notices().last(),
        Some(&Notice::Failure("Failed to delete".into()))
    );
}

#[tokio::test]
async fn test_settings_form_sends_whole_record() {
    let gateway = FakeGateway::with_data(vec![Collection::Settings(settings(&[
        ("site_title", "Club"),
        ("hero_title", "Welcome"),
    ]))]);
    let mut console = logged_in(gateway.clone()).await;

    let mut form = console.settings_form();
    assert_eq!(form.value("contact_phone"), Some(""));
    form.set("site_title", "Renamed");
    gateway.clear_calls();

    console.save_settings(&form).await.unwrap();

    match &gateway.sends()[0] {
        Call::Send { method, query, body, .. } => {
            assert_eq!(method, "PUT");
            assert_eq!(query, &vec![("type", "settings".to_string())]);
            let body = body.as_ref().unwrap();
            assert_eq!(body["site_title"], "Renamed");
            assert_eq!(body["hero_title"], "Welcome");
            assert_eq!(body["contact_email"], "");
        }
        other => panic!("unexpected call {:?}", other),
    }
    assert_eq!(console.notices(), &[Notice::Success("Settings saved".into())]);
}

#[tokio::test]
async fn test_failed_read_keeps_previous_collection() {
    let gateway = FakeGateway::with_data(vec![
        Collection::Matches(vec![game(1, "Old Home")]),
        Collection::Players(vec![player(1, 1, "Old")]),
    ]);
    let mut console = logged_in(gateway.clone()).await;
    assert_eq!(console.content().matches.len(), 1);

    gateway.fail(CollectionType::Matches);
    gateway.set(Collection::Matches(vec![game(1, "New Home"), game(2, "Other")]));
    gateway.set(Collection::Players(vec![player(1, 1, "New")]));
    gateway.set(Collection::News(vec![news(1, "Fresh")]));
    gateway.set(Collection::Settings(settings(&[("site_title", "Fresh")])));
    gateway.set(Collection::Gallery(vec![GalleryItem {
        id: 4,
        image_url: "fresh.jpg".into(),
        title: None,
        description: None,
        created_at: Utc::now(),
    }]));

    assert!(!console.reload().await);

    let content = console.content();
    assert_eq!(content.matches.len(), 1);
    assert_eq!(content.matches[0].home_team, "Old Home");
    assert_eq!(content.players[0].name, "New");
    assert_eq!(content.news[0].title, "Fresh");
    assert_eq!(content.settings.get("site_title"), Some("Fresh"));
    assert_eq!(content.gallery.len(), 1);
    assert_eq!(content.gallery[0].image_url, "fresh.jpg");
    assert_eq!(
        console.notices(),
        &[Notice::Failure("Failed to load data".into())]
    );
}

#[tokio::test]
async fn test_hung_read_holds_refresh_open() {
    let gateway = FakeGateway::with_data(vec![Collection::News(vec![news(1, "Loaded")])]);
    gateway.hang(CollectionType::Matches);
    let mut console = AdminConsole::new(gateway.clone(), MemoryTokenStore::new());

    let refresh = tokio::time::timeout(Duration::from_millis(100), console.reload()).await;

    assert!(refresh.is_err());
    assert_eq!(gateway.fetch_count(), 5);
    // Reads that did answer were applied before the hang
    assert_eq!(console.content().news[0].title, "Loaded");
}
