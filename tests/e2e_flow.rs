//! Drives the learner flow over real HTTP against a server on an ephemeral port.

mod common;

use common::{LISTING, TEACHER, test_state, token_for};
use skillswap::router::init_router;
use skillswap_client::{
    ClientConfig, CurrentUser, FlowContext, FlowDriver, FlowObserver, FlowOptions,
    HttpFeedbackApi, Notice, NoticeLevel, RatingStep, Role, Route, Session, Stars,
};

#[derive(Debug, Default)]
struct RecordingObserver {
    notices: Vec<Notice>,
    routes: Vec<Route>,
}

impl FlowObserver for RecordingObserver {
    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn navigate(&mut self, route: &Route) {
        self.routes.push(route.clone());
    }
}

async fn spawn_server() -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = init_router(test_state());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ClientConfig::new(format!("http://{}", addr))
}

fn learner_session(user_id: &str) -> Session {
    Session::signed_in(CurrentUser::new(user_id, Role::Learner), token_for(user_id))
}

async fn open(
    config: &ClientConfig,
    session: &Session,
) -> FlowDriver<HttpFeedbackApi, RecordingObserver> {
    FlowDriver::mount(
        HttpFeedbackApi::new(config, session),
        RecordingObserver::default(),
        session,
        FlowContext::for_listing(LISTING).with_teacher(TEACHER),
        FlowOptions::default(),
    )
    .await
}

#[tokio::test]
async fn test_rate_review_then_revisit() {
    let config = spawn_server().await;
    let session = learner_session("learner-1");

    let mut driver = open(&config, &session).await;
    assert_eq!(driver.flow().step().number(), 1);

    driver.flow_mut().select_star(Stars::new(4).unwrap());
    driver.submit_rating().await;
    match driver.flow().step() {
        RatingStep::Review { submitted, .. } => {
            assert_eq!(submitted.rating, 4);
            assert_eq!(submitted.id.len(), 24);
        }
        other => panic!("expected review step, got {other:?}"),
    }

    driver.flow_mut().edit_review("Twelve chars");
    driver.submit_review().await;
    assert_eq!(driver.observer().routes, vec![Route::LearnerSessions]);
    assert!(
        !driver
            .observer()
            .notices
            .iter()
            .any(|n| n.level == NoticeLevel::Error),
        "{:?}",
        driver.observer().notices
    );

    // coming back lands on the completion step without re-prompting
    let revisit = open(&config, &session).await;
    match revisit.flow().step() {
        RatingStep::Complete { submitted } => assert_eq!(submitted.rating, 4),
        other => panic!("expected completion, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rating_from_another_tab_is_reconciled() {
    let config = spawn_server().await;
    let session = learner_session("learner-2");

    let mut stale = open(&config, &session).await;
    let mut fresh = open(&config, &session).await;

    fresh.flow_mut().select_star(Stars::new(2).unwrap());
    fresh.submit_rating().await;
    assert_eq!(fresh.flow().step().number(), 2);

    stale.flow_mut().select_star(Stars::new(5).unwrap());
    stale.submit_rating().await;

    assert_eq!(stale.flow().step().number(), 2);
    assert_eq!(stale.flow().step().submitted().map(|r| r.rating), Some(2));
    assert!(stale.observer().notices.contains(&Notice::info(
        "You have already rated this listing. Checking your existing rating..."
    )));
}

#[tokio::test]
async fn test_malformed_credential_surfaces_server_error() {
    let config = spawn_server().await;
    let session = Session::signed_in(
        CurrentUser::new("learner-3", Role::Learner),
        "not-a-jwt",
    );

    let mut driver = open(&config, &session).await;
    // lookup failure keeps the learner on the rating step
    assert_eq!(driver.flow().step().number(), 1);

    driver.flow_mut().select_star(Stars::new(3).unwrap());
    driver.submit_rating().await;

    assert_eq!(driver.flow().step().number(), 1);
    assert_eq!(
        driver.observer().notices.last(),
        Some(&Notice::error("Internal server error"))
    );
}
