use axum::http::StatusCode;
use bookshelf_server::{config::AppConfig, models::Book};
use uuid::Uuid;

use crate::{body_text, location, TestApp};

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[tokio::test]
async fn test_list_filters_case_insensitively() {
    let app = TestApp::new();
    for name in ["Jane Austen", "Charlotte Bronte", "Emily Bronte"] {
        app.create_author(name).await;
    }

    let response = app.get("/authors?name=bRoNtE").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Charlotte Bronte"));
    assert!(body.contains("Emily Bronte"));
    assert!(!body.contains("Jane Austen"));
    // Filter is echoed back into the search box
    assert!(body.contains(r#"value="bRoNtE""#));

    let body = body_text(app.get("/authors?name=").await).await;
    assert_eq!(count(&body, r#"class="author""#), 3);

    let body = body_text(app.get("/authors").await).await;
    assert_eq!(count(&body, r#"class="author""#), 3);
}

#[tokio::test]
async fn test_list_filter_keeps_surrounding_whitespace() {
    let app = TestApp::new();
    app.create_author("Austen").await;

    let body = body_text(app.get("/authors?name=+aus").await).await;
    assert_eq!(count(&body, r#"class="author""#), 0);

    let body = body_text(app.get("/authors?name=++").await).await;
    assert_eq!(count(&body, r#"class="author""#), 0);

    let body = body_text(app.get("/authors?name=aus").await).await;
    assert_eq!(count(&body, r#"class="author""#), 1);
}

#[tokio::test]
async fn test_names_are_stored_as_submitted() {
    let app = TestApp::new();
    let id = app.create_author(" Jane Austen ").await;

    let body = body_text(app.get(&format!("/authors/{}", id)).await).await;
    assert!(body.contains(r#"<h2 class="author-name"> Jane Austen </h2>"#));

    let response = app
        .form("PUT", &format!("/authors/{}", id), "name=+J.+Austen+")
        .await;
    assert_eq!(location(&response), format!("/authors/{}", id));
    let body = body_text(app.get(&format!("/authors/{}/edit", id)).await).await;
    assert!(body.contains(r#"value=" J. Austen ""#));
}

#[tokio::test]
async fn test_list_filter_is_literal() {
    let app = TestApp::new();
    app.create_author("Jane Austen").await;

    let body = body_text(app.get("/authors?name=.%2A").await).await;
    assert_eq!(count(&body, r#"class="author""#), 0);
}

#[tokio::test]
async fn test_new_form_is_blank() {
    let app = TestApp::new();

    let response = app.get("/authors/new").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(r#"name="name" value="""#));
    assert!(!body.contains("error-message"));
}

#[tokio::test]
async fn test_create_then_show() {
    let app = TestApp::new();

    let response = app.form("POST", "/authors", "name=Jane+Austen").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("/authors/"));

    let response = app.get(&target).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Jane Austen"));
    assert_eq!(count(&body, r#"class="book""#), 0);
}

#[tokio::test]
async fn test_create_without_name_rerenders_form() {
    let app = TestApp::new();

    let response = app.form("POST", "/authors", "name=").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Error creating Author"));

    let response = app.form("POST", "/authors", "").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(app.get("/authors").await).await;
    assert_eq!(count(&body, r#"class="author""#), 0);
}

#[tokio::test]
async fn test_update_then_show() {
    let app = TestApp::new();
    let id = app.create_author("Jane Austen").await;

    let response = app
        .form("PUT", &format!("/authors/{}", id), "name=J.+Austen")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/authors/{}", id));

    let body = body_text(app.get(&format!("/authors/{}", id)).await).await;
    assert!(body.contains("J. Austen"));
}

#[tokio::test]
async fn test_update_with_blank_name_rerenders_edit_form() {
    let app = TestApp::new();
    let id = app.create_author("Jane Austen").await;

    let response = app.form("PUT", &format!("/authors/{}", id), "name=").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Error updating Author"));

    let body = body_text(app.get(&format!("/authors/{}", id)).await).await;
    assert!(body.contains("Jane Austen"));
}

#[tokio::test]
async fn test_update_unknown_author_redirects_to_root() {
    let app = TestApp::new();

    let response = app
        .form("PUT", &format!("/authors/{}", Uuid::new_v4()), "name=Ghost")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let body = body_text(app.get("/authors").await).await;
    assert!(!body.contains("Ghost"));
}

#[tokio::test]
async fn test_edit_form() {
    let app = TestApp::new();
    let id = app.create_author("Jane Austen").await;

    let response = app.get(&format!("/authors/{}/edit", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(r#"value="Jane Austen""#));
    assert!(body.contains(&format!("/authors/{}?_method=PUT", id)));

    let response = app.get(&format!("/authors/{}/edit", Uuid::new_v4())).await;
    assert_eq!(location(&response), "/authors");
}

#[tokio::test]
async fn test_show_unknown_author_redirects_to_root() {
    let app = TestApp::new();

    let response = app.get(&format!("/authors/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app.get("/authors/not-an-id").await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_show_caps_books_at_six() {
    let app = TestApp::new();
    let id = app.create_author("Terry Pratchett").await;
    for n in 1..=9 {
        app.store
            .insert_book(Book::new(&format!("Discworld {}", n), id))
            .await
            .unwrap();
    }

    let body = body_text(app.get(&format!("/authors/{}", id)).await).await;
    assert_eq!(count(&body, r#"class="book""#), 6);
}

#[tokio::test]
async fn test_delete_with_books_is_refused() {
    let app = TestApp::new();
    let id = app.create_author("Jane Austen").await;
    app.store.insert_book(Book::new("Emma", id)).await.unwrap();

    let response = app.form("DELETE", &format!("/authors/{}", id), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/authors/{}", id));

    let response = app.get(&format!("/authors/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_without_books() {
    let app = TestApp::new();
    let id = app.create_author("Jane Austen").await;

    let response = app.form("DELETE", &format!("/authors/{}", id), "").await;
    assert_eq!(location(&response), "/authors");

    let response = app.get(&format!("/authors/{}", id)).await;
    assert_eq!(location(&response), "/");

    // Already gone
    let response = app.form("DELETE", &format!("/authors/{}", id), "").await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_html_forms_reach_put_and_delete() {
    let app = TestApp::new();
    let id = app.create_author("Jane Austen").await;

    let response = app
        .form("POST", &format!("/authors/{}?_method=PUT", id), "name=Jane+A.")
        .await;
    assert_eq!(location(&response), format!("/authors/{}", id));
    assert!(body_text(app.get(&format!("/authors/{}", id)).await)
        .await
        .contains("Jane A."));

    let response = app
        .form("POST", &format!("/authors/{}?_method=DELETE", id), "")
        .await;
    assert_eq!(location(&response), "/authors");
}

#[tokio::test]
async fn test_delete_scenario() {
    let app = TestApp::new();
    let a1 = app.create_author("Jane Austen").await;
    let book = app
        .store
        .insert_book(Book::new("Pride and Prejudice", a1))
        .await
        .unwrap();

    let response = app.form("DELETE", &format!("/authors/{}", a1), "").await;
    assert_eq!(location(&response), format!("/authors/{}", a1));
    assert!(body_text(app.get(&format!("/authors/{}", a1)).await)
        .await
        .contains("Pride and Prejudice"));

    app.store.remove_book(book.id).await.unwrap();

    let response = app.form("DELETE", &format!("/authors/{}", a1), "").await;
    assert_eq!(location(&response), "/authors");
    assert_eq!(location(&app.get(&format!("/authors/{}", a1)).await), "/");
}

#[tokio::test]
async fn test_catalog_limits_come_from_config() {
    let mut config = AppConfig::default();
    config.catalog.books_per_author = 2;
    config.catalog.list_limit = 1;
    let app = TestApp::with_config(config);

    let id = app.create_author("Terry Pratchett").await;
    app.create_author("Neil Gaiman").await;
    for n in 1..=3 {
        app.store
            .insert_book(Book::new(&format!("Discworld {}", n), id))
            .await
            .unwrap();
    }

    let body = body_text(app.get(&format!("/authors/{}", id)).await).await;
    assert_eq!(count(&body, r#"class="book""#), 2);

    let body = body_text(app.get("/authors").await).await;
    assert_eq!(count(&body, r#"class="author""#), 1);
}
