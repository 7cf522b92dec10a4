//! Client and server talking over a real socket.

use medialib::api::{router, AppState};
use medialib::client::{CatalogClient, ClientError};
use medialib::database::{CatalogManager, NewMedia};
use tokio::net::TcpListener;

#[tokio::test]
async fn client_round_trip_against_live_server() {
    let dir = tempfile::tempdir().expect("tempdir");
    let manager = CatalogManager::with_file(dir.path(), "media_data.json").expect("catalog");
    let app = router(AppState::new(manager));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    let client = CatalogClient::new(format!("http://{addr}")).expect("client");

    let seeded = client.list_all().await.expect("list");
    assert_eq!(seeded.len(), 2);

    let created = client
        .add(&NewMedia::new("Dune", "F. Herbert", "1965-08-01", "Book"))
        .await
        .expect("add");
    assert_eq!(created.id, "3");

    let books = client.list_by_category("Book").await.expect("books");
    assert_eq!(
        books.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        vec!["1", "3"]
    );

    let found = client.search_by_name("DUNE").await.expect("search");
    assert_eq!(found, Some(created.clone()));
    assert_eq!(client.get_by_id("3").await.expect("get"), Some(created));

    match client
        .add(&NewMedia::new("Serial", "S. Koenig", "2014", "Podcast"))
        .await
    {
        Err(ClientError::Api { status, .. }) => assert_eq!(status, 400),
        other => panic!("unexpected result: {other:?}"),
    }

    assert!(client.delete("3").await.expect("delete"));
    assert!(!client.delete("3").await.expect("delete"));
    assert!(client.get_by_id("3").await.expect("get").is_none());

    let reopened = CatalogManager::with_file(dir.path(), "media_data.json").expect("reopen");
    assert_eq!(reopened.list_all(), client.list_all().await.expect("list"));

    let _ = shutdown_tx.send(());
    server.await.expect("join").expect("serve");
}
