use club_site::{
    client::{
        AdminConsole, GatewayClient, GatewayConfig, HttpGateway, MemoryTokenStore, Notice,
        PublicSite, Section,
    },
    models::{CollectionType, RecordKind},
};

mod common;
use common::{ADMIN_PASSWORD, ADMIN_USER, spawn_app, test_state};

async fn gateway(require_write_auth: bool) -> HttpGateway {
    let (state, _) = test_state(require_write_auth).await;
    let url = spawn_app(state).await;
    HttpGateway::new(GatewayConfig::new(url))
}

#[tokio::test]
async fn test_console_manages_content_over_http() {
    let gateway = gateway(true).await;
    let mut console = AdminConsole::new(gateway.clone(), MemoryTokenStore::new());

    assert!(!console.login(ADMIN_USER, "nope").await);
    assert!(!console.session().is_authenticated());

    assert!(console.login(ADMIN_USER, ADMIN_PASSWORD).await);
    assert!(console.session().is_authenticated());

    for (number, name) in [("19", "Sergei"), ("4", "Pavel")] {
        console.open_editor(RecordKind::Players, None);
        let editor = console.editor_mut().unwrap();
        editor.set("number", number).unwrap();
        editor.set("name", name).unwrap();
        editor.set("position", "Defense").unwrap();
        console.save().await.unwrap();
    }

    let numbers: Vec<i32> = console.content().players.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![4, 19]);

    let id = console.content().players[1].id;
    assert!(console.edit_record(RecordKind::Players, id));
    console.editor_mut().unwrap().set("bio", "Captain").unwrap();
    console.save().await.unwrap();
    assert_eq!(
        console.content().players[1].bio.as_deref(),
        Some("Captain")
    );

    assert!(console.delete(RecordKind::Players, id, |_| true).await.unwrap());
    assert_eq!(console.content().players.len(), 1);

    let failures: Vec<&Notice> = console.notices().iter().filter(|n| n.is_failure()).collect();
    assert_eq!(failures, vec![&Notice::Failure("Invalid username or password".into())]);
}

#[tokio::test]
async fn test_stored_token_survives_reload_over_http() {
    let gateway = gateway(false).await;

    let mut first = AdminConsole::new(gateway.clone(), MemoryTokenStore::new());
    assert!(first.login(ADMIN_USER, ADMIN_PASSWORD).await);
    let token = first.session().token().unwrap().to_string();

    let mut second = AdminConsole::new(gateway.clone(), MemoryTokenStore::with_token(token));
    assert!(second.mount().await);
    assert_eq!(second.session().username(), Some(ADMIN_USER));

    let mut third = AdminConsole::new(gateway, MemoryTokenStore::with_token("garbage"));
    assert!(!third.mount().await);
}

#[tokio::test]
async fn test_public_site_reflects_settings_and_limits() {
    let gateway = gateway(false).await;
    let mut console = AdminConsole::new(gateway.clone(), MemoryTokenStore::new());
    assert!(console.login(ADMIN_USER, ADMIN_PASSWORD).await);

    for i in 0..4 {
        console.open_editor(RecordKind::News, None);
        let editor = console.editor_mut().unwrap();
        editor.set("title", format!("Story {i}")).unwrap();
        editor.set("content", "Text").unwrap();
        editor.set("category", "Club").unwrap();
        console.save().await.unwrap();
    }

    for (home, score) in [("Wolves", ""), ("Bears", "2:1")] {
        console.open_editor(RecordKind::Matches, None);
        let editor = console.editor_mut().unwrap();
        editor.set("match_date", "2026-03-01").unwrap();
        editor.set("match_time", "19:00").unwrap();
        editor.set("home_team", home).unwrap();
        editor.set("away_team", "Visitors").unwrap();
        editor.set("location", "Arena").unwrap();
        editor.set("score", score).unwrap();
        console.save().await.unwrap();
    }

    let mut form = console.settings_form();
    form.set("hero_title", "Ice Wolves");
    form.set("contact_email", "info@club.test");
    form.set("history_block2_title", "Three titles");
    console.save_settings(&form).await.unwrap();

    let mut site = PublicSite::new(gateway.clone());
    assert!(site.is_loading());
    let report = site.load().await;
    assert!(report.is_complete());
    assert!(!site.is_loading());

    assert_eq!(site.latest_news().len(), 3);
    assert_eq!(site.hero().title, "Ice Wolves");
    assert_eq!(site.hero().site_title, "Club");
    assert_eq!(site.hero().logo, "/images/logo.jpg");
    assert_eq!(site.hero().image, "/images/hero.jpg");
    assert_eq!(site.contacts().email, "info@club.test");
    // Blank form fields fall back to the defaults
    assert_eq!(site.contacts().phone, "+1 (555) 010-0000");
    assert_eq!(site.contacts().address, "Club arena, Main street 1");
    assert_eq!(site.heading(Section::Team).title, "Team roster");

    let history = site.history_blocks();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].title, "Founding");
    assert_eq!(history[1].title, "Three titles");
    assert_eq!(history[1].text, "The team competes in the national league");

    let schedule = site.schedule();
    assert_eq!(schedule.len(), 2);
    let scoreboard = |home: &str| {
        schedule
            .iter()
            .find(|f| f.game.home_team == home)
            .map(|f| f.scoreboard)
    };
    assert_eq!(scoreboard("Wolves"), Some("VS"));
    assert_eq!(scoreboard("Bears"), Some("2:1"));

    let settings = gateway.fetch(CollectionType::Settings).await.unwrap();
    assert_eq!(settings.collection_type(), CollectionType::Settings);
}
