// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::queue::FakeQueueAdapter;
use axum::routing::{get, put};
use axum::{Json, Router};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio_tungstenite::tungstenite::Message;

/// Minimal stand-in for a browser's DevTools endpoints.
struct Browser {
    http_url: String,
    methods: Arc<Mutex<Vec<String>>>,
    close: Arc<Notify>,
    activated: Arc<AtomicUsize>,
}

async fn serve_socket(stream: TcpStream, methods: Arc<Mutex<Vec<String>>>, close: Arc<Notify>) {
    let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
        return;
    };
    loop {
        tokio::select! {
            _ = close.notified() => {
                let _ = ws.close(None).await;
                return;
            }
            msg = ws.next() => {
                let Some(Ok(Message::Text(text))) = msg else {
                    return;
                };
                let request: Value = serde_json::from_str(text.as_str()).unwrap();
                let method = request["method"].as_str().unwrap_or_default().to_string();
                methods.lock().push(method.clone());

                let result = match method.as_str() {
                    "Runtime.evaluate" => {
                        let expr = request["params"]["expression"].as_str().unwrap_or_default();
                        let value = expr == "true" || expr.contains("readyState");
                        json!({ "result": { "type": "boolean", "value": value } })
                    }
                    "Page.navigate" => json!({ "frameId": "F1" }),
                    _ => json!({}),
                };
                let reply = json!({ "id": request["id"], "result": result });
                ws.send(Message::Text(reply.to_string().into())).await.unwrap();

                if method == "Page.navigate" {
                    let url = &request["params"]["url"];
                    let navigated = json!({
                        "method": "Page.frameNavigated",
                        "params": { "frame": { "id": "F1", "url": url } },
                    });
                    let loaded = json!({ "method": "Page.loadEventFired", "params": { "timestamp": 1.0 } });
                    ws.send(Message::Text(navigated.to_string().into())).await.unwrap();
                    ws.send(Message::Text(loaded.to_string().into())).await.unwrap();
                }
            }
        }
    }
}

async fn browser() -> Browser {
    let methods = Arc::new(Mutex::new(Vec::new()));
    let close = Arc::new(Notify::new());

    let ws_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let ws_addr = ws_listener.local_addr().unwrap();
    {
        let methods = methods.clone();
        let close = close.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = ws_listener.accept().await {
                tokio::spawn(serve_socket(stream, methods.clone(), close.clone()));
            }
        });
    }

    let created = Arc::new(AtomicUsize::new(0));
    let activated = Arc::new(AtomicUsize::new(0));
    let activated_route = activated.clone();
    let app = Router::new()
        .route(
            "/json/new",
            put(move || {
                let n = created.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    Json(json!({
                        "id": format!("T{n}"),
                        "type": "page",
                        "url": "about:blank",
                        "webSocketDebuggerUrl": format!("ws://{ws_addr}/devtools/page/T{n}"),
                    }))
                }
            }),
        )
        .route(
            "/json/activate/{id}",
            get(move || {
                activated_route.fetch_add(1, Ordering::SeqCst);
                async { "Target activated" }
            }),
        );
    let http_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let http_addr = http_listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(http_listener, app).await;
    });

    Browser { http_url: format!("http://{http_addr}"), methods, close, activated }
}

fn adapter(browser: &Browser) -> (ChromeAdapter<FakeQueueAdapter>, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(32);
    let adapter = ChromeAdapter::new(&browser.http_url, FakeQueueAdapter::new(), tx)
        .with_timing(StepTiming::quick());
    (adapter, rx)
}

async fn next_event(rx: &mut mpsc::Receiver<Event>) -> Event {
    tokio::time::timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap()
}

#[tokio::test]
async fn open_creates_blank_page_then_navigates() {
    let browser = browser().await;
    let (adapter, mut rx) = adapter(&browser);

    let page = adapter.open(None, "https://store.example/design/1").await.unwrap();
    assert_eq!(page, "T1");
    assert_eq!(*browser.methods.lock(), ["Page.enable", "Page.navigate"]);
    assert_eq!(
        next_event(&mut rx).await,
        Event::PageLoaded { page, url: "https://store.example/design/1".to_string() }
    );
}

#[tokio::test]
async fn open_reuses_a_live_page() {
    let browser = browser().await;
    let (adapter, mut rx) = adapter(&browser);

    let first = adapter.open(None, "https://store.example/a").await.unwrap();
    next_event(&mut rx).await;
    let second = adapter.open(Some(&first), "https://store.example/b").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(browser.activated.load(Ordering::SeqCst), 1);
    assert_eq!(
        next_event(&mut rx).await,
        Event::PageLoaded { page: second, url: "https://store.example/b".to_string() }
    );
}

#[tokio::test]
async fn closed_session_makes_page_unreachable() {
    let browser = browser().await;
    let (adapter, mut rx) = adapter(&browser);
    let page = adapter.open(None, "https://store.example/a").await.unwrap();
    next_event(&mut rx).await;

    browser.close.notify_one();
    for _ in 0..100 {
        if adapter.live_session(&page).is_none() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let (tx, _rx) = mpsc::channel(4);
    let err = adapter
        .dispatch(&page, Instruction::StoreStep { id: "7".into() }, tx)
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::Unreachable(_)), "got {err:?}");

    let reopened = adapter.open(Some(&page), "https://store.example/a").await.unwrap();
    assert_eq!(reopened, "T2");
}

#[tokio::test]
async fn replies_arrive_while_event_channel_is_full() {
    let browser = browser().await;
    let (tx, mut rx) = mpsc::channel(1);
    let adapter = ChromeAdapter::new(&browser.http_url, FakeQueueAdapter::new(), tx)
        .with_timing(StepTiming::quick());

    let page = adapter.open(None, "https://store.example/a").await.unwrap();
    let urls = ["https://store.example/b", "https://store.example/c", "https://store.example/d"];
    for url in urls {
        tokio::time::timeout(Duration::from_secs(5), adapter.navigate(&page, url))
            .await
            .unwrap()
            .unwrap();
    }

    let mut loaded = Vec::new();
    for _ in 0..4 {
        match next_event(&mut rx).await {
            Event::PageLoaded { url, .. } => loaded.push(url),
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(
        loaded,
        ["https://store.example/a", "https://store.example/b", "https://store.example/c", "https://store.example/d"]
    );
}

#[tokio::test]
async fn dispatch_to_unknown_page_is_unreachable() {
    let browser = browser().await;
    let (adapter, _rx) = adapter(&browser);
    let (tx, _events) = mpsc::channel(4);

    let err = adapter
        .dispatch(&PageId::new("nope"), Instruction::StoreStep { id: "1".into() }, tx)
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::Unreachable(_)));
}

#[tokio::test]
async fn failing_step_reports_page_error() {
    let browser = browser().await;
    let (adapter, mut rx) = adapter(&browser);
    let page = adapter.open(None, "https://store.example/a").await.unwrap();
    next_event(&mut rx).await;

    let (tx, mut events) = mpsc::channel(8);
    adapter.dispatch(&page, Instruction::StoreStep { id: "7".into() }, tx).await.unwrap();

    assert_eq!(
        next_event(&mut events).await,
        Event::PageError {
            page: Some(page),
            reason: r#"Could not find: <span class="link__content">Copy Settings</span>"#.to_string(),
        }
    );
}

#[tokio::test]
async fn unreachable_browser_fails_open() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (tx, _rx) = mpsc::channel(4);
    let adapter = ChromeAdapter::new(&format!("http://{addr}"), FakeQueueAdapter::new(), tx);
    let err = adapter.open(None, "https://store.example/").await.unwrap_err();
    assert!(matches!(err, PageError::Browser(_)), "got {err:?}");
}
