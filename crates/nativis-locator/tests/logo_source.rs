//! Integration tests for `HttpLogoSource` and `load_brand_logos`.
//!
//! Each test stands up a local `wiremock` server so no real network traffic
//! is made.

use nativis_core::{Brand, BrandId};
use nativis_locator::assets::MAX_LOGO_BYTES;
use nativis_locator::{load_brand_logos, AssetError, HttpLogoSource, IconCache, LogoSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_source(server: &MockServer) -> HttpLogoSource {
    HttpLogoSource::new(&server.uri(), 5, "nativis-test/0.1").expect("failed to build test source")
}

fn brand(id: &str, logo_url: Option<&str>) -> Brand {
    Brand {
        id: BrandId::new(id),
        label: id.to_string(),
        color: "#00B14F".to_string(),
        highlight: "#00D15A".to_string(),
        logo_url: logo_url.map(str::to_string),
    }
}

fn png() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png")
}

#[tokio::test]
async fn relative_logo_path_resolves_against_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/imgs/Lush_Logo_v2.png"))
        .respond_with(png())
        .expect(1)
        .mount(&server)
        .await;

    let asset = test_source(&server)
        .fetch_logo("/imgs/Lush_Logo_v2.png")
        .await
        .expect("logo should load");

    assert_eq!(asset.url, format!("{}/imgs/Lush_Logo_v2.png", server.uri()));
    assert_eq!(asset.content_type, "image/png");
    assert_eq!(asset.bytes, vec![0x89, b'P', b'N', b'G']);
    assert_eq!(asset.data_uri(), "data:image/png;base64,iVBORw==");
}

#[tokio::test]
async fn empty_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(Vec::<u8>::new(), "image/png"))
        .mount(&server)
        .await;

    let err = test_source(&server)
        .fetch_logo("/imgs/blank.png")
        .await
        .unwrap_err();
    assert!(matches!(err, AssetError::EmptyBody { .. }), "got {err:?}");
}

#[tokio::test]
async fn oversized_logo_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0_u8; MAX_LOGO_BYTES + 1], "image/png"),
        )
        .mount(&server)
        .await;

    let err = test_source(&server)
        .fetch_logo("/imgs/huge.png")
        .await
        .unwrap_err();
    assert!(
        matches!(err, AssetError::TooLarge { size, .. } if size == MAX_LOGO_BYTES + 1),
        "got {err:?}"
    );
}

#[tokio::test]
async fn path_with_spaces_is_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/imgs/HOFMAN%20NAME.png"))
        .respond_with(png())
        .mount(&server)
        .await;

    let asset = test_source(&server)
        .fetch_logo("/imgs/HOFMAN NAME.png")
        .await
        .expect("logo should load");
    assert!(asset.url.ends_with("/imgs/HOFMAN%20NAME.png"));
}

#[tokio::test]
async fn absolute_logo_url_is_fetched_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ln9ipPv.png"))
        .respond_with(png())
        .mount(&server)
        .await;

    let source = HttpLogoSource::new("https://nativisgp.com", 5, "nativis-test/0.1").unwrap();
    let absolute = format!("{}/ln9ipPv.png", server.uri());
    let asset = source.fetch_logo(&absolute).await.expect("logo should load");
    assert_eq!(asset.url, absolute);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_source(&server)
        .fetch_logo("/imgs/missing.png")
        .await
        .unwrap_err();
    assert!(
        matches!(err, AssetError::UnexpectedStatus { status: 404, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn non_image_content_type_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let err = test_source(&server)
        .fetch_logo("/imgs/logo.png")
        .await
        .unwrap_err();
    assert!(
        matches!(&err, AssetError::NotAnImage { content_type, .. } if content_type == "text/html"),
        "got {err:?}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = HttpLogoSource::new("not a url", 5, "nativis-test/0.1").unwrap_err();
    assert!(matches!(err, AssetError::InvalidUrl { .. }));
}

#[tokio::test]
async fn failures_are_isolated_per_brand() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/imgs/good.png"))
        .respond_with(png())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/imgs/broken.png"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let brands = vec![
        brand("Good", Some("/imgs/good.png")),
        brand("Broken", Some("/imgs/broken.png")),
        brand("Bare", None),
    ];
    let results = load_brand_logos(&test_source(&server), &brands).await;

    let ids: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["Good", "Broken", "Bare"]);
    assert!(results[0].1.is_ok());
    assert!(matches!(
        results[1].1,
        Err(AssetError::UnexpectedStatus { status: 500, .. })
    ));
    assert!(matches!(&results[2].1, Err(AssetError::NoLogo(id)) if id.as_str() == "Bare"));

    let mut cache = IconCache::new(&brands);
    for (id, outcome) in results {
        cache.record_logo(&id, outcome);
    }
    let good = cache.get(&BrandId::new("Good")).unwrap();
    assert!(good.has_logo());
    assert!(good.svg.contains(r#"href="data:image/png;base64,iVBORw==""#));
    assert!(!good.svg.contains(&server.uri()));
    assert!(!cache.get(&BrandId::new("Broken")).unwrap().has_logo());
    assert!(!cache.get(&BrandId::new("Bare")).unwrap().has_logo());
}
