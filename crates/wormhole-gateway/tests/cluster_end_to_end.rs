use async_trait::async_trait;
use reqwest::{redirect, StatusCode};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use wormhole_core::store::Result as StoreResult;
use wormhole_core::{ShortCode, StoreError, UrlStore};
use wormhole_dispatcher::{ClusterTopology, Dispatcher, HttpNodeClient, NodeAddress};
use wormhole_gateway::{App, AppState, FrontendService};
use wormhole_storage::InMemoryUrlStore;
use wormhole_worker::WorkerNode;

const BASE_URL: &str = "http://localhost:8080";

/// Shared store seen through one worker; counts that worker's writes.
struct CountingStore {
    inner: Arc<dyn UrlStore>,
    puts: AtomicUsize,
}

#[async_trait]
impl UrlStore for CountingStore {
    async fn put(&self, code: &ShortCode, url: &str) -> StoreResult<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(code, url).await
    }

    async fn get(&self, code: &ShortCode) -> StoreResult<Option<String>> {
        self.inner.get(code).await
    }
}

struct DownStore;

#[async_trait]
impl UrlStore for DownStore {
    async fn put(&self, _: &ShortCode, _: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _: &ShortCode) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

struct Cluster {
    gateway: SocketAddr,
    workers: Vec<Arc<CountingStore>>,
    http: reqwest::Client,
}

impl Cluster {
    async fn start(num_nodes: usize, store: Arc<dyn UrlStore>) -> Self {
        let mut workers = Vec::new();
        let mut nodes = Vec::new();
        for _ in 0..num_nodes {
            let counting = Arc::new(CountingStore {
                inner: store.clone(),
                puts: AtomicUsize::new(0),
            });
            let worker = WorkerNode::new(counting.clone());
            let addr = serve(wormhole_worker::http::router(worker)).await;
            nodes.push(NodeAddress::parse(&addr.to_string()).unwrap());
            workers.push(counting);
        }

        let client = HttpNodeClient::new(Default::default()).unwrap();
        let frontend = FrontendService::builder()
            .dispatcher(Dispatcher::new(
                ClusterTopology::new(nodes).unwrap(),
                Arc::new(client),
            ))
            .store(store)
            .base_url(BASE_URL)
            .build();
        let gateway = serve(App::router(AppState::new(frontend))).await;

        let http = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            gateway,
            workers,
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.gateway, path)
    }

    async fn shorten(&self, url: &str) -> (StatusCode, String) {
        let response = self
            .http
            .post(self.url("/shorten"))
            .form(&[("url", url)])
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }

    fn puts(&self) -> Vec<usize> {
        self.workers
            .iter()
            .map(|w| w.puts.load(Ordering::SeqCst))
            .collect()
    }
}

async fn serve(router: axum::Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn shorten_then_redirect() {
    let cluster = Cluster::start(3, Arc::new(InMemoryUrlStore::new())).await;

    let (status, body) = cluster.shorten("example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "http://localhost:8080/R9TVn");

    let response = cluster.http.get(cluster.url("/R9TVn")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[reqwest::header::LOCATION],
        "http://example.com"
    );
}

#[tokio::test]
async fn https_target_keeps_its_scheme() {
    let cluster = Cluster::start(2, Arc::new(InMemoryUrlStore::new())).await;

    let (status, body) = cluster.shorten("https://www.rust-lang.org").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "http://localhost:8080/zR7vo");

    let response = cluster.http.get(cluster.url("/zR7vo")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[reqwest::header::LOCATION],
        "https://www.rust-lang.org"
    );
}

#[tokio::test]
async fn requests_are_spread_round_robin() {
    let cluster = Cluster::start(3, Arc::new(InMemoryUrlStore::new())).await;

    for i in 0..6 {
        let (status, _) = cluster.shorten(&format!("https://example.com/{i}")).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(cluster.puts(), [2, 2, 2]);
}

#[tokio::test]
async fn empty_url_is_rejected_before_dispatch() {
    let cluster = Cluster::start(3, Arc::new(InMemoryUrlStore::new())).await;

    let (status, _) = cluster.shorten("").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response = cluster.http.post(cluster.url("/shorten")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(cluster.puts(), [0, 0, 0]);
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let cluster = Cluster::start(1, Arc::new(InMemoryUrlStore::new())).await;

    for path in ["/unknownCode", "/zzzzz"] {
        let response = cluster.http.get(cluster.url(path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.text().await.unwrap(), "Shortened URL not found");
    }
}

#[tokio::test]
async fn store_outage_fails_without_short_url() {
    let cluster = Cluster::start(2, Arc::new(DownStore)).await;

    let (status, body) = cluster.shorten("example.com").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("R9TVn"));

    let response = cluster.http.get(cluster.url("/R9TVn")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unreachable_node_fails_the_request_only() {
    let store: Arc<dyn UrlStore> = Arc::new(InMemoryUrlStore::new());
    let live = serve(wormhole_worker::http::router(WorkerNode::new(store.clone()))).await;

    // Bound then dropped: nothing listens there any more.
    let dead = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();

    let nodes = vec![
        NodeAddress::parse(&dead.to_string()).unwrap(),
        NodeAddress::parse(&live.to_string()).unwrap(),
    ];
    let frontend = FrontendService::builder()
        .dispatcher(Dispatcher::new(
            ClusterTopology::new(nodes).unwrap(),
            Arc::new(HttpNodeClient::new(Default::default()).unwrap()),
        ))
        .store(store)
        .base_url(BASE_URL)
        .build();
    let gateway = serve(App::router(AppState::new(frontend))).await;
    let http = reqwest::Client::new();
    let shorten = |url: &'static str| {
        http.post(format!("http://{gateway}/shorten"))
            .form(&[("url", url)])
            .send()
    };

    let first = shorten("example.com").await.unwrap();
    assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let second = shorten("example.com").await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.text().await.unwrap(), "http://localhost:8080/R9TVn");
}
