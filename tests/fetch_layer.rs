use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use jadwalApp::clients::http::{HttpFetcher, RetryPolicy};
use jadwalApp::error::ApiError;
use jadwalApp::service::content_service::{ContentService, ContentSource};
use jadwalApp::service::myquran_service::{DoaSource, MyQuranService, PrayerSource};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

type Responder = Arc<dyn Fn(&str, usize) -> (u16, String) + Send + Sync>;

fn responder(f: impl Fn(&str, usize) -> (u16, String) + Send + Sync + 'static) -> Responder {
    Arc::new(f)
}

/// One-response-per-connection HTTP stub. `respond` gets the request path
/// and how many requests came before it.
async fn serve(respond: Responder) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let respond = respond.clone();
            let counter = counter.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&request);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let seen = counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = respond(&path, seen);
                let response = format!(
                    "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (base, hits)
}

fn fetcher(attempts: u32) -> HttpFetcher {
    HttpFetcher::new(RetryPolicy {
        attempts,
        backoff: Duration::from_millis(5),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

/// Accepts connections and never answers. Returns the base URL and how many
/// connections were accepted.
async fn serve_silence() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            held.push(socket);
        }
    });

    (base, accepted)
}

const SHOLAT: &str = r#"{"status": true, "data": {
    "id": 1219, "lokasi": "KOTA SEMARANG", "daerah": "JAWA TENGAH",
    "jadwal": {"tanggal": "Senin, 19/10/2026", "imsak": "04:20", "subuh": "04:30",
        "terbit": "05:45", "dhuha": "06:15", "dzuhur": "12:00", "ashar": "15:15",
        "maghrib": "17:45", "isya": "19:00", "date": "2026-10-19"}}}"#;

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let (base, hits) = serve(responder(|path, seen| {
        if path != "/sholat/jadwal/1219/2026/10/19" {
            (404, "{}".to_string())
        } else if seen < 2 {
            (503, "{}".to_string())
        } else {
            (200, SHOLAT.to_string())
        }
    }))
    .await;

    let myquran = MyQuranService::new(fetcher(3), &base);
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let location = myquran.sholat_today("1219", date).await.unwrap();

    assert_eq!(location.id, "1219");
    assert_eq!(location.lokasi, "KOTA SEMARANG");
    assert_eq!(location.jadwal.maghrib, "17:45");
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn retries_give_up_after_the_last_attempt() {
    let (base, hits) = serve(responder(|_, _| (500, "{}".to_string()))).await;

    let myquran = MyQuranService::new(fetcher(2), &base);
    let err = myquran.random_doa().await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(err.to_string(), "Gagal mengambil doa (status 500)");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let (base, hits) = serve(responder(|_, _| (404, r#"{"message":"not found"}"#.to_string()))).await;

    let content = ContentService::new(fetcher(3), &base);
    let err = content.article_detail("tidak-ada").await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error_with_the_raw_text() {
    let (base, _) = serve(responder(|_, _| (200, "<html>maintenance</html>".to_string()))).await;

    let content = ContentService::new(fetcher(1), &base);
    match content.rutinan_schedule().await.unwrap_err() {
        ApiError::Decode { body, .. } => assert_eq!(body, "<html>maintenance</html>"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rutinan_and_articles_decode_from_the_site_backend() {
    let (base, _) = serve(responder(|path, _| match path {
        "/api/rutinan" => (
            200,
            r#"[{"id": 3, "nama_acara": "Maulid Simthud Durar", "pengisi": "Habib Umar",
                "tempat": "Aula", "waktu": "20:00:00", "day_of_week": 3,
                "exceptions": [{"id": 1, "rutinan_id": 3, "libur_date": "2026-10-21"}]}]"#
                .to_string(),
        ),
        "/api/articles?page=2" => (
            200,
            r#"{"data": [{"id": 9, "title": "Adab Majelis", "slug": "adab-majelis"}],
                "meta": {"current_page": 2, "from": 11, "last_page": 2, "path": "",
                    "per_page": 10, "to": 11, "total": 11}}"#
                .to_string(),
        ),
        _ => (404, "{}".to_string()),
    }))
    .await;

    let content = ContentService::new(fetcher(1), &format!("{base}/api/"));

    let rutinan = content.rutinan_schedule().await.unwrap();
    assert_eq!(rutinan.len(), 1);
    assert_eq!(rutinan[0].day_of_week, Some(3));
    assert_eq!(rutinan[0].exceptions[0].libur_date, "2026-10-21");

    let page = content.articles(2).await.unwrap();
    assert_eq!(page.meta.current_page, 2);
    assert_eq!(page.data[0].slug, "adab-majelis");
    assert_eq!(page.data[0].category_name(), "Tanpa Kategori");
}

#[tokio::test]
async fn city_search_sends_an_encoded_name() {
    let (base, _) = serve(responder(|path, _| {
        if path == "/sholat/kota/cari/Kota%20Semarang" {
            (200, r#"{"status": true, "data": [{"id": "1219", "lokasi": "KOTA SEMARANG"}]}"#.to_string())
        } else {
            (404, "{}".to_string())
        }
    }))
    .await;

    let myquran = MyQuranService::new(fetcher(1), &base);
    let cities = myquran.search_city(" Kota Semarang ").await.unwrap();
    assert_eq!(cities[0].id, "1219");
}

#[tokio::test]
async fn stalled_upstream_times_out_as_a_transport_error() {
    let (base, accepted) = serve_silence().await;
    let http = HttpFetcher::new(RetryPolicy {
        attempts: 2,
        backoff: Duration::from_millis(5),
        timeout: Duration::from_millis(200),
    })
    .unwrap();
    let content = ContentService::new(http, &base);

    let outcome = tokio::time::timeout(Duration::from_secs(5), content.rutinan_schedule()).await;
    let err = outcome.expect("fetch should give up on its own").unwrap_err();

    assert!(matches!(err, ApiError::Transport { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("Gagal mengambil jadwal rutinan"));
    assert_eq!(accepted.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn slug_is_sent_as_one_encoded_segment() {
    let (base, _) = serve(responder(|path, _| {
        if path == "/api/articles/a%2Fb%3Fc" {
            (200, r#"{"data": {"id": 1, "title": "Adab", "slug": "a/b?c"}}"#.to_string())
        } else {
            (404, "{}".to_string())
        }
    }))
    .await;

    let content = ContentService::new(fetcher(1), &format!("{base}/api"));
    let article = content.article_detail("a/b?c").await.unwrap();
    assert_eq!(article.title, "Adab");
}
