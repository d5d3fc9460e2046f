use crate::geo::Coordinate;
use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

/// Client positions are read on every check-in but change rarely (clients are
/// managed out-of-band), so keep them hot with a short TTL.
pub static CLIENT_COORD_CACHE: Lazy<Cache<u64, Coordinate>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(3600)) // 1h TTL
        .build()
});

pub async fn get(client_id: u64) -> Option<Coordinate> {
    CLIENT_COORD_CACHE.get(&client_id).await
}

pub async fn put(client_id: u64, coordinate: Coordinate) {
    CLIENT_COORD_CACHE.insert(client_id, coordinate).await;
}

/// Load every client position into the in-memory cache at startup.
pub async fn warmup_client_cache(pool: &MySqlPool) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (u64, f64, f64)>(
        r#"
        SELECT id, latitude, longitude
        FROM clients
        "#,
    )
    .fetch(pool);

    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let (id, latitude, longitude) = row?;
        put(id, Coordinate::new(latitude, longitude)).await;
        total_count += 1;
    }

    tracing::info!("Client coordinate cache warmup complete: {} clients", total_count);

    Ok(())
}
