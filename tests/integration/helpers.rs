// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use phishguard::presentation::routes;
use phishguard::relay::ScoreRelay;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use url::Url;

/// Start the gateway against the given inference base URL and return
/// the address it is reachable at.
pub async fn start_gateway(inference_base: &str) -> String {
    let base = Url::parse(inference_base).unwrap();
    let relay = Arc::new(ScoreRelay::new(base, Duration::from_secs(2)).unwrap());
    let app = routes::routes(relay);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
