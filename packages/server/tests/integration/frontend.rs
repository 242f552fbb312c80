use crate::common::{INDEX_HTML, SITE_CSS, TestApp};

#[tokio::test]
async fn root_serves_index_document() {
    let app = TestApp::spawn().await;

    let res = app.get("/").await;

    assert_eq!(res.status, 200);
    assert_eq!(res.text(), INDEX_HTML);
    assert!(res.header("content-type").unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn static_assets_are_served_from_frontend_dir() {
    let app = TestApp::spawn().await;

    let res = app.get("/css/site.css").await;

    assert_eq!(res.status, 200);
    assert_eq!(res.text(), SITE_CSS);
}

#[tokio::test]
async fn unknown_static_path_is_404() {
    let app = TestApp::spawn().await;

    let res = app.get("/missing/page.js").await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().unwrap();
    for path in [
        "/fetch-blogs",
        "/submit-blog",
        "/delete-blog/{id}",
        "/file/{file_name}",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}
