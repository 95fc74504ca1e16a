use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use walrus_client::kv::MemBackend;
use walrus_client::{BlobClient, Config, Error, HistoryStore, RefKind, ReqwestTransport};

/// Stores blobs in memory and answers like a publisher and aggregator.
#[derive(Clone, Default)]
struct FakeWalrus {
    blobs: Arc<Mutex<HashMap<String, Bytes>>>,
}

#[derive(Deserialize)]
struct StoreQuery {
    epochs: u64,
}

async fn store_blob(
    State(state): State<FakeWalrus>,
    Query(query): Query<StoreQuery>,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    if query.epochs == 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "epochs must be positive" })),
        );
    }

    let blob_id = format!("blob-{}", body.len());
    let previous = state
        .blobs
        .lock()
        .unwrap()
        .insert(blob_id.clone(), body);

    let response = match previous {
        None => serde_json::json!({
            "newlyCreated": {
                "blobObject": {
                    "id": format!("0xobj-{blob_id}"),
                    "blobId": blob_id,
                    "storage": { "endEpoch": 100 + query.epochs }
                },
                "cost": 42
            }
        }),
        Some(_) => serde_json::json!({
            "alreadyCertified": {
                "blobId": blob_id,
                "endEpoch": 100 + query.epochs,
                "event": { "txDigest": format!("0xtx-{blob_id}"), "eventSeq": "0" }
            }
        }),
    };
    (StatusCode::OK, Json(response))
}

async fn read_blob(
    State(state): State<FakeWalrus>,
    Path(blob_id): Path<String>,
) -> Result<Bytes, StatusCode> {
    state
        .blobs
        .lock()
        .unwrap()
        .get(&blob_id)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)
}

async fn start_fake_walrus() -> SocketAddr {
    let app = Router::new()
        .route("/v1/blobs", put(store_blob))
        .route("/v1/blobs/{blob_id}", get(read_blob))
        .with_state(FakeWalrus::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> BlobClient<ReqwestTransport> {
    let base = format!("http://{addr}/");
    let config = Config::default()
        .with_publisher(&base)
        .with_aggregator(&base)
        .with_explorer("https://suiscan.xyz/testnet");
    BlobClient::new(ReqwestTransport::default(), config)
}

#[tokio::test]
async fn store_then_read_back() {
    let addr = start_fake_walrus().await;
    let client = client_for(addr);
    let history = HistoryStore::new(MemBackend::new());

    let outcome = client.store(&history, "hello walrus", 5).await.unwrap();
    assert_eq!(outcome.blob_id, "blob-12");
    assert_eq!(outcome.end_epoch, 105);
    assert_eq!(outcome.ref_kind, RefKind::Object);
    assert_eq!(
        outcome.explorer_url,
        "https://suiscan.xyz/testnet/object/0xobj-blob-12"
    );
    assert_eq!(outcome.blob_url, format!("http://{addr}/v1/blobs/blob-12"));

    let contents = client.retrieve(&outcome.blob_id).await.unwrap();
    assert_eq!(contents, "hello walrus");

    let again = client.store(&history, "hello walrus", 5).await.unwrap();
    assert_eq!(again.ref_kind, RefKind::Transaction);
    assert_eq!(
        again.explorer_url,
        "https://suiscan.xyz/testnet/tx/0xtx-blob-12"
    );
    assert_eq!(history.load().len(), 1);

    let (entry, contents) = client.retrieve_from_history(&history, 0).await.unwrap();
    assert_eq!(entry.blob_id, "blob-12");
    assert_eq!(contents, "hello walrus");
}

#[tokio::test]
async fn service_errors_surface_status() {
    let addr = start_fake_walrus().await;
    let client = client_for(addr);
    let history = HistoryStore::new(MemBackend::new());

    let err = client.store(&history, "data", 0).await.unwrap_err();
    match err {
        Error::Service { status, body } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.unwrap().contains("epochs must be positive"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(history.load().is_empty());

    let err = client.retrieve("missing").await.unwrap_err();
    assert!(matches!(err, Error::Service { status, .. } if status == StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let history = HistoryStore::new(MemBackend::new());

    let err = client.store(&history, "data", 1).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(history.load().is_empty());

    let err = client.retrieve("blob-1").await.unwrap_err();
    assert_eq!(err.to_string(), "request failed");
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn cli_read_prints_blob_verbatim() {
    let addr = start_fake_walrus().await;
    let client = client_for(addr);
    let history = HistoryStore::new(MemBackend::new());
    let outcome = client.store(&history, "no trailing newline", 1).await.unwrap();

    let data_dir = tempfile::tempdir().unwrap();
    let base = format!("http://{addr}");
    let data_path = data_dir.path().to_path_buf();
    let output = tokio::task::spawn_blocking(move || {
        std::process::Command::new(env!("CARGO_BIN_EXE_walrus-client"))
            .arg("--aggregator")
            .arg(&base)
            .arg("--data-dir")
            .arg(&data_path)
            .arg("read")
            .arg(&outcome.blob_id)
            .output()
    })
    .await
    .unwrap()
    .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"no trailing newline");
}
