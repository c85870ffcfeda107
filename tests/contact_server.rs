use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use secrecy::SecretString;
use serde_json::{json, Value};
use sitecrafter::{
    api,
    contact::{
        ContactSubmission, HttpEmailSink, Notification, NotificationSink, Relay, RelayPolicy,
        SUBMITTED_MESSAGE,
    },
    content::SiteData,
    views::contact::{
        ContactForm, FormStatus, HttpContactClient, EMPTY_FIELDS_MESSAGE, REJECTED_FALLBACK,
    },
};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
    task::JoinHandle,
};
use url::Url;

const RECIPIENT: &str = "inbox@sitecrafter.com";

#[derive(Default)]
struct CapturingSink {
    delivered: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationSink for CapturingSink {
    async fn deliver(&self, notification: &Notification) -> Result<()> {
        self.delivered.lock().await.push(notification.clone());
        Ok(())
    }
}

#[derive(Default)]
struct FailingSink {
    attempts: AtomicU64,
}

#[async_trait]
impl NotificationSink for FailingSink {
    async fn deliver(&self, _notification: &Notification) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(anyhow!("smtp connection refused"))
    }
}

struct TestServer {
    base: Url,
    relay: Arc<Relay>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<()>>,
}

impl TestServer {
    async fn start(sink: Arc<dyn NotificationSink>, policy: RelayPolicy) -> Result<Self> {
        let relay = Arc::new(Relay::new(sink, policy, RECIPIENT.to_string()));
        let app = api::app(relay.clone(), Arc::new(SiteData::embedded()?), None)?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base = Url::parse(&format!("http://{}", listener.local_addr()?))?;

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(api::serve(listener, app, async move {
            let _ = rx.await;
        }));

        Ok(Self {
            base,
            relay,
            shutdown: Some(tx),
            handle,
        })
    }

    async fn stop(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await?
    }
}

fn filled() -> ContactSubmission {
    ContactSubmission::new("Ada Lovelace", "ada@example.com", "Line one\nLine two")
}

#[tokio::test]
async fn form_submission_reaches_sink() -> Result<()> {
    let sink = Arc::new(CapturingSink::default());
    let server = TestServer::start(sink.clone(), RelayPolicy::default()).await?;

    let client = HttpContactClient::new(&server.base)?;
    let mut form = ContactForm::new(filled());

    assert_eq!(form.submit(&client).await, &FormStatus::Submitted);
    assert_eq!(form.fields, ContactSubmission::default());

    {
        let delivered = sink.delivered.lock().await;
        assert_eq!(delivered.len(), 1);
        let notification = &delivered[0];
        assert_eq!(notification.from, "ada@example.com");
        assert_eq!(notification.to, RECIPIENT);
        assert_eq!(
            notification.subject,
            "New Contact Form Submission from Ada Lovelace"
        );
        assert_eq!(notification.text, "Line one\nLine two");
        assert!(notification.html.contains("Line one<br>Line two"));
    }

    server.stop().await
}

#[tokio::test]
async fn failing_sink_still_reports_success() -> Result<()> {
    let sink = Arc::new(FailingSink::default());
    let server = TestServer::start(sink.clone(), RelayPolicy::log_only()).await?;

    let client = HttpContactClient::new(&server.base)?;
    let mut form = ContactForm::new(filled());

    assert_eq!(form.submit(&client).await, &FormStatus::Submitted);
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(server.relay.failures(), 1);

    let health: Value = reqwest::get(server.base.join("/health")?)
        .await?
        .json()
        .await?;
    assert_eq!(health.get("relay_failures"), Some(&json!(1)));
    assert_eq!(health.get("relay_policy"), Some(&json!("log-only")));

    server.stop().await
}

#[tokio::test]
async fn surfaced_failure_shows_server_error() -> Result<()> {
    let server =
        TestServer::start(Arc::new(FailingSink::default()), RelayPolicy::surface()).await?;

    let client = HttpContactClient::new(&server.base)?;
    let mut form = ContactForm::new(filled());

    assert_eq!(
        form.submit(&client).await,
        &FormStatus::Error("An error occurred while sending your message.".to_string())
    );
    assert_eq!(form.fields, filled());

    server.stop().await
}

#[tokio::test]
async fn missing_field_is_rejected_by_endpoint() -> Result<()> {
    let sink = Arc::new(CapturingSink::default());
    let server = TestServer::start(sink.clone(), RelayPolicy::default()).await?;

    let response = reqwest::Client::new()
        .post(server.base.join("/api/contact")?)
        .json(&json!({"name": "Ada", "email": "", "message": "hi"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(
        body,
        json!({"error": "Please fill in all the required fields."})
    );
    assert!(sink.delivered.lock().await.is_empty());

    server.stop().await
}

#[tokio::test]
async fn direct_post_returns_success_body() -> Result<()> {
    let server =
        TestServer::start(Arc::new(CapturingSink::default()), RelayPolicy::default()).await?;

    let response = reqwest::Client::new()
        .post(server.base.join("/api/contact")?)
        .json(&json!({"name": "Ada", "email": "ada@example.com", "message": "hi"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({"success": true, "message": SUBMITTED_MESSAGE}));

    server.stop().await
}

#[tokio::test]
async fn empty_form_never_reaches_server() -> Result<()> {
    // Nothing listens on this port; a request would be a transport error.
    let client = HttpContactClient::new(&Url::parse("http://127.0.0.1:9")?)?;
    let mut form = ContactForm::new(ContactSubmission::new("Ada", "ada@example.com", ""));

    assert_eq!(
        form.submit(&client).await,
        &FormStatus::Error(EMPTY_FIELDS_MESSAGE.to_string())
    );
    Ok(())
}

#[tokio::test]
async fn server_down_is_a_form_error() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base = Url::parse(&format!("http://{}", listener.local_addr()?))?;
    drop(listener);

    let client = HttpContactClient::new(&base)?;
    let mut form = ContactForm::new(filled());

    let status = form.submit(&client).await.clone();
    assert!(matches!(status, FormStatus::Error(ref message) if !message.is_empty()));
    assert_eq!(form.fields, filled());
    Ok(())
}

#[tokio::test]
async fn proxy_error_page_falls_back_to_generic_message() -> Result<()> {
    // A gateway in front of the server answers with HTML instead of the JSON error body.
    let gateway = Router::new().route(
        "/api/contact",
        post(|| async {
            (
                StatusCode::BAD_GATEWAY,
                [("content-type", "text/html")],
                "<html><body>502 Bad Gateway</body></html>",
            )
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base = Url::parse(&format!("http://{}", listener.local_addr()?))?;
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(api::serve(listener, gateway, async move {
        let _ = rx.await;
    }));

    let client = HttpContactClient::new(&base)?;
    let mut form = ContactForm::new(filled());

    assert_eq!(
        form.submit(&client).await,
        &FormStatus::Error(REJECTED_FALLBACK.to_string())
    );
    assert_eq!(form.fields, filled());

    let _ = tx.send(());
    handle.await?
}

#[tokio::test]
async fn http_email_sink_posts_with_bearer_token() -> Result<()> {
    let received: Arc<Mutex<Vec<(Option<String>, Value)>>> = Arc::default();

    let captured = received.clone();
    let email_api = Router::new().route(
        "/v1/send",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let captured = captured.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string);
                captured.lock().await.push((auth, body));
                StatusCode::ACCEPTED
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = Url::parse(&format!("http://{}/v1/send", listener.local_addr()?))?;
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(api::serve(listener, email_api, async move {
        let _ = rx.await;
    }));

    let sink = HttpEmailSink::new(url, Some(SecretString::from("s3cr3t".to_string())))?;
    let notification = Notification::compose(&filled(), RECIPIENT);
    sink.deliver(&notification).await?;

    {
        let received = received.lock().await;
        let (auth, body) = received.first().context("email API got no request")?;
        assert_eq!(auth.as_deref(), Some("Bearer s3cr3t"));
        assert_eq!(body.get("to"), Some(&json!(RECIPIENT)));
        assert_eq!(body.get("from"), Some(&json!("ada@example.com")));
        assert_eq!(
            body.get("subject"),
            Some(&json!("New Contact Form Submission from Ada Lovelace"))
        );
    }

    let _ = tx.send(());
    handle.await?
}

#[tokio::test]
async fn http_email_sink_fails_on_error_status() -> Result<()> {
    let email_api = Router::new().route(
        "/v1/send",
        post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = Url::parse(&format!("http://{}/v1/send", listener.local_addr()?))?;
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(api::serve(listener, email_api, async move {
        let _ = rx.await;
    }));

    let sink = HttpEmailSink::new(url, None)?;
    let result = sink
        .deliver(&Notification::compose(&filled(), RECIPIENT))
        .await;
    assert!(result.is_err());

    let _ = tx.send(());
    handle.await?
}
