use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{http::StatusCode, routing::get, Router};
use client_core::{
    render::{render_text, EMPTY_RESULT_MESSAGE},
    CourseSource, HttpCourseSource, MissingTierDisplay, RenderState, ViewHandle, ViewOptions,
    ViewSnapshot,
};
use shared::{
    domain::Course,
    error::CollectionFetchError,
    protocol::IngestReport,
};
use tokio::net::TcpListener;
use url::Url;

struct Fixed(Vec<Course>);

#[async_trait]
impl CourseSource for Fixed {
    async fn fetch_collection(&self) -> Result<IngestReport, CollectionFetchError> {
        Ok(IngestReport::accepted(self.0.clone()))
    }
}

fn scenario_collection() -> Vec<Course> {
    vec![
        Course::new(1, "Data Science", "MIT", "Technology", "4 years"),
        Course::new(2, "Law", "Oxford", "Humanities", "3 years"),
    ]
}

async fn search(view: &ViewHandle, text: &str) -> Arc<ViewSnapshot> {
    let before = view.snapshot().recompute_count;
    view.on_search_input(text);
    view.wait_for(|s| !s.loading && s.recompute_count > before)
        .await
        .expect("recompute")
}

fn ids(snapshot: &Arc<ViewSnapshot>) -> Vec<i64> {
    snapshot.visible.iter().map(|c| c.id.0).collect()
}

async fn mount_fixed() -> ViewHandle {
    let view = ViewHandle::mount(
        Arc::new(Fixed(scenario_collection())),
        ViewOptions::default(),
    );
    view.wait_for(|s| !s.loading).await.expect("loads");
    view
}

#[tokio::test(start_paused = true)]
async fn scenario_a_title_substring() {
    let view = mount_fixed().await;
    assert_eq!(ids(&search(&view, "da").await), vec![1]);
}

#[tokio::test(start_paused = true)]
async fn scenario_b_university_substring() {
    let view = mount_fixed().await;
    assert_eq!(ids(&search(&view, "oxford").await), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn scenario_c_no_match_renders_empty_result() {
    let view = mount_fixed().await;
    let snap = search(&view, "zzz").await;
    assert!(snap.visible.is_empty());
    assert_eq!(snap.render_state(), RenderState::EmptyResult);
    assert_eq!(
        render_text(&snap, MissingTierDisplay::Hide).trim_end(),
        EMPTY_RESULT_MESSAGE
    );
}

#[tokio::test(start_paused = true)]
async fn scenario_e_empty_search_keeps_collection() {
    let view = mount_fixed().await;
    search(&view, "law").await;
    assert_eq!(ids(&search(&view, "").await), vec![1, 2]);
}

async fn spawn_server() -> Url {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route(
            "/courses.json",
            get(|| async {
                r#"[{"id":1,"title":"Data Science","university":"MIT","category":"Technology","duration":"4 years"},
                    {"id":2,"title":"Law","university":"Oxford","category":"Humanities","duration":"3 years","recommendationLevel":"Recommended"}]"#
            }),
        )
        .route(
            "/down.json",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Url::parse(&format!("http://{addr}/")).expect("url")
}

fn fast() -> ViewOptions {
    ViewOptions {
        quiet_period: Duration::from_millis(20),
    }
}

#[tokio::test]
async fn scenario_d_fetch_failure_renders_empty_result() {
    let base = spawn_server().await;
    let source = HttpCourseSource::new(base.join("down.json").expect("url"));
    let view = ViewHandle::mount(Arc::new(source), fast());

    let snap = view.wait_for(|s| !s.loading).await.expect("settles");
    assert!(snap.load_failed);
    assert_eq!(snap.total, 0);
    assert_eq!(snap.render_state(), RenderState::EmptyResult);
    view.unmount().await;
}

#[tokio::test]
async fn http_backed_view_filters_and_renders_cards() {
    let base = spawn_server().await;
    let source = HttpCourseSource::new(base.join("courses.json").expect("url"));
    let view = ViewHandle::mount(Arc::new(source), fast());

    let loaded = view.wait_for(|s| !s.loading).await.expect("settles");
    assert_eq!(ids(&loaded), vec![1, 2]);

    let snap = search(&view, "LAW").await;
    assert_eq!(
        render_text(&snap, MissingTierDisplay::NotAvailable),
        "Law\n  University: Oxford\n  Category: Humanities\n  Duration: 3 years\n  Recommendation: Recommended\n"
    );
    view.unmount().await;
}
