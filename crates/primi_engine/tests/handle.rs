use std::time::Duration;

use primi_engine::{ClientEvent, DrawMode, DrawRequest, EngineHandle, EngineSettings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// These tests block on the handle's event channel, so they need workers the
// mock server can keep running on.

#[tokio::test(flavor = "multi_thread")]
async fn handle_reports_dispatch_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let handle = EngineHandle::new(EngineSettings::default());
    handle.dispatch(
        server.uri(),
        DrawRequest {
            src_url: "http://img.example/a.png".to_string(),
            draw_mode: Some(DrawMode::Primitive),
        },
    );

    let event = handle
        .recv_timeout(Duration::from_secs(5))
        .expect("completion event");
    match event {
        ClientEvent::DispatchCompleted { src_url, result } => {
            assert_eq!(src_url, "http://img.example/a.png");
            assert!(result.is_ok());
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn handle_opens_the_stream_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/primi"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(": hello\n\n", "text/event-stream"))
        .mount(&server)
        .await;

    let handle = EngineHandle::new(EngineSettings::default());
    handle.subscribe(server.uri());
    handle.subscribe(server.uri());

    let mut opened = 0;
    let mut closed = 0;
    while let Some(event) = handle.recv_timeout(Duration::from_secs(2)) {
        match event {
            ClientEvent::StreamOpened => opened += 1,
            ClientEvent::StreamClosed { result } => {
                assert!(result.is_ok());
                closed += 1;
                break;
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
    assert_eq!(opened, 1);
    assert_eq!(closed, 1);

    // The second subscribe was dropped, so the channel stays quiet.
    assert!(handle.recv_timeout(Duration::from_millis(300)).is_none());
}
