//! Helpers for exercising the blocking HTTP clients against a local server.

/// Serve `router` on an ephemeral port from a background runtime.
///
/// The listener is bound before returning, so requests issued right away
/// queue instead of racing the server start.
pub(crate) fn spawn_server(router: axum::Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    listener
        .set_nonblocking(true)
        .expect("set test listener nonblocking");
    let addr = listener.local_addr().expect("test listener address");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build test runtime");
        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("adopt test listener");
            axum::serve(listener, router).await.expect("serve test router");
        });
    });

    format!("http://{addr}")
}

/// A localhost URL with nothing listening on it.
pub(crate) fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind scratch listener");
    let addr = listener.local_addr().expect("scratch listener address");
    drop(listener);
    format!("http://{addr}")
}
