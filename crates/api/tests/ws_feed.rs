//! Realtime push over a real WebSocket: the server is bound to an
//! ephemeral port and clients connect with tokio-tungstenite.

mod common;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, create_user, post_auth, post_json_auth, ScriptedChat};
use edupass_api::router::build_app_router;
use edupass_api::ws::WsManager;
use edupass_events::EventBus;
use futures::StreamExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const WAIT: Duration = Duration::from_secs(5);

/// A served app plus handles on its shared state.
struct Served {
    addr: SocketAddr,
    app: axum::Router,
    bus: Arc<EventBus>,
    ws_manager: Arc<WsManager>,
}

async fn serve(pool: PgPool) -> Served {
    let state = common::test_state(
        pool,
        Arc::new(ScriptedChat {
            reply: Ok(String::new()),
        }),
    );
    let bus = Arc::clone(&state.event_bus);
    let ws_manager = Arc::clone(&state.ws_manager);
    let app = build_app_router(state, &common::test_config());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = app.clone();
    tokio::spawn(async move {
        axum::serve(listener, server).await.unwrap();
    });

    Served {
        addr,
        app,
        bus,
        ws_manager,
    }
}

/// Poll `check` until it holds, failing the test after `WAIT`.
async fn eventually<F, Fut>(what: &str, mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + WAIT;
    while !check().await {
        assert!(tokio::time::Instant::now() < deadline, "timed out waiting for {what}");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

impl Served {
    /// Open a socket for `token` and wait until its feed is subscribed.
    async fn connect(&self, token: &str) -> Client {
        let before = self.bus.subscriber_count();
        let url = format!("ws://{}/api/v1/ws?token={token}", self.addr);
        let (client, _) = connect_async(url.as_str()).await.unwrap();
        let bus = Arc::clone(&self.bus);
        eventually("feed subscription", || {
            let bus = Arc::clone(&bus);
            async move { bus.subscriber_count() > before }
        })
        .await;
        client
    }
}

/// Next JSON frame, skipping control frames.
async fn next_frame(client: &mut Client) -> Value {
    loop {
        let message = tokio::time::timeout(WAIT, client.next())
            .await
            .expect("frame within deadline")
            .expect("socket still open")
            .unwrap();
        if let Message::Text(text) = message {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

async fn notify(app: axum::Router, admin: &str, user_id: Option<i64>, title: &str) {
    let body = json!({ "user_id": user_id, "title": title, "message": "details" });
    let response = post_json_auth(app, "/api/v1/admin/notifications", body, admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_receives_insert_and_foreign_rows_are_skipped(pool: PgPool) {
    let (_admin, admin) = create_user(&pool, "ws-admin", "admin").await;
    let (me, my_token) = create_user(&pool, "ws-me", "student").await;
    let (other, _) = create_user(&pool, "ws-other", "student").await;
    let served = serve(pool).await;
    let mut client = served.connect(&my_token).await;

    notify(served.app.clone(), &admin, Some(other.id), "Not yours").await;
    notify(served.app.clone(), &admin, Some(me.id), "Yours").await;

    let frame = next_frame(&mut client).await;
    assert_eq!(frame["type"], "event");
    assert_eq!(frame["event_type"], "notification.insert");
    assert_eq!(frame["payload"]["title"], "Yours");
    assert_eq!(frame["payload"]["user_id"], me.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn read_all_over_a_broadcast_reaches_other_viewers(pool: PgPool) {
    let (_admin, admin) = create_user(&pool, "bc-admin", "admin").await;
    let (_reader, reader_token) = create_user(&pool, "bc-reader", "student").await;
    let (_watcher, watcher_token) = create_user(&pool, "bc-watcher", "student").await;
    let served = serve(pool).await;
    let mut watcher = served.connect(&watcher_token).await;

    notify(served.app.clone(), &admin, None, "Holiday").await;
    let inserted = next_frame(&mut watcher).await;
    assert_eq!(inserted["event_type"], "notification.insert");

    let response =
        post_auth(served.app.clone(), "/api/v1/notifications/read-all", &reader_token).await;
    assert_eq!(body_json(response).await["data"]["marked_read"], 1);

    let updated = next_frame(&mut watcher).await;
    assert_eq!(updated["event_type"], "notification.update");
    assert_eq!(updated["payload"]["user_id"], Value::Null);
    assert_eq!(updated["payload"]["marked_read"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn verification_pushes_access_granted(pool: PgPool) {
    let (_user, token) = create_user(&pool, "ws-verifier", "student").await;
    let served = serve(pool).await;
    let mut client = served.connect(&token).await;

    let link =
        body_json(post_auth(served.app.clone(), "/api/v1/access/request", &token).await).await;
    let body = json!({ "token": link["token"] });
    let response = post_json_auth(served.app.clone(), "/api/v1/access/verify", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let frame = next_frame(&mut client).await;
    assert_eq!(frame["event_type"], "access.granted");
    assert_eq!(frame["payload"]["hasAccess"], true);
    assert_eq!(frame["payload"]["remainingHours"], 24);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn closing_the_socket_releases_its_feed(pool: PgPool) {
    let (_user, token) = create_user(&pool, "ws-leaver", "student").await;
    let served = serve(pool).await;
    let mut client = served.connect(&token).await;
    assert_eq!(served.bus.subscriber_count(), 1);
    assert_eq!(served.ws_manager.connection_count().await, 1);

    client.close(None).await.unwrap();
    drop(client);

    let bus = Arc::clone(&served.bus);
    eventually("feed release", || {
        let bus = Arc::clone(&bus);
        async move { bus.subscriber_count() == 0 }
    })
    .await;
    let ws_manager = Arc::clone(&served.ws_manager);
    eventually("connection removal", || {
        let ws_manager = Arc::clone(&ws_manager);
        async move { ws_manager.connection_count().await == 0 }
    })
    .await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn server_shutdown_closes_sockets_and_releases_feeds(pool: PgPool) {
    let (_user, token) = create_user(&pool, "ws-shutdown", "student").await;
    let served = serve(pool).await;
    let mut client = served.connect(&token).await;

    served.ws_manager.shutdown_all().await;

    let mut saw_close = false;
    while let Ok(Some(message)) = tokio::time::timeout(WAIT, client.next()).await {
        match message {
            Ok(Message::Close(_)) => saw_close = true,
            Ok(_) => {}
            Err(_) => break,
        }
    }
    assert!(saw_close);

    let bus = Arc::clone(&served.bus);
    eventually("feed release after shutdown", || {
        let bus = Arc::clone(&bus);
        async move { bus.subscriber_count() == 0 }
    })
    .await;
}
