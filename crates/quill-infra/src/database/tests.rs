use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use quill_core::domain::{Post, PostAuthor};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PageRequest, PostChanges, PostFilter, PostRepository};

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn post_model(id: Uuid, count: i64) -> post::Model {
    post::Model {
        id,
        title: "Test Post".to_owned(),
        body: "<p>Content</p>".to_owned(),
        image: "<img src=\"http://cdn.test/default-1.jpg\">".to_owned(),
        tags: serde_json::json!(["go", "rust"]),
        published_date: Utc::now().into(),
        count,
        user_id: Uuid::new_v4(),
        username: "alice".to_owned(),
    }
}

/// Every statement the repository sent, with bound values inlined.
fn executed_sql(repo: PostgresPostRepository) -> Vec<String> {
    repo.db
        .into_transaction_log()
        .iter()
        .flat_map(|txn| txn.statements().iter().map(ToString::to_string))
        .collect()
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::now_v7();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, 4)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.count, 4);
    assert_eq!(post.tags, vec!["go".to_string(), "rust".to_string()]);
    assert_eq!(post.user.username, "alice");
}

#[tokio::test]
async fn test_save_inserts_when_nothing_was_updated() {
    let post = Post::new(
        PostAuthor {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
        },
        "Test Post".to_string(),
        "<p>Content</p>".to_string(),
        "<img src=\"x\">".to_string(),
        vec!["go".to_string()],
    );
    let inserted = post_model(post.id, 0);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .append_query_results([vec![inserted]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let saved = repo.save(post.clone()).await.unwrap();

    assert_eq!(saved.id, post.id);
    assert_eq!(saved.count, 0);
}

#[tokio::test]
async fn test_find_page_filters_orders_and_windows() {
    let older = Uuid::now_v7();
    let newer = Uuid::now_v7();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(newer, 0), post_model(older, 0)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let page = repo
        .find_page(
            &PostFilter::new(Some("go".into()), Some("alice".into())),
            PageRequest {
                offset: 40,
                limit: 20,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, newer);
    assert_eq!(page[1].id, older);

    let sql = executed_sql(repo);
    assert_eq!(sql.len(), 1);
    let select = &sql[0];
    assert!(select.contains(r#""tags" @> "#), "{select}");
    assert!(select.contains(r#""go""#), "{select}");
    assert!(select.contains(r#""posts"."username" = 'alice'"#), "{select}");
    assert!(select.contains(r#"ORDER BY "posts"."id" DESC"#), "{select}");
    assert!(select.contains("LIMIT 20 OFFSET 40"), "{select}");
}

#[tokio::test]
async fn test_count_applies_the_same_filter() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([(
            "num_items",
            Value::BigInt(Some(3)),
        )])]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let total = repo
        .count(&PostFilter::new(Some("rust".into()), None))
        .await
        .unwrap();

    assert_eq!(total, 3);
    let sql = executed_sql(repo);
    assert!(sql[0].starts_with("SELECT COUNT(*)"), "{}", sql[0]);
    assert!(sql[0].contains(r#""tags" @> "#), "{}", sql[0]);
    assert!(!sql[0].contains(r#""username" ="#), "{}", sql[0]);
}

#[tokio::test]
async fn test_update_fields_returns_none_for_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo
        .update_fields(
            Uuid::new_v4(),
            PostChanges {
                title: Some("t".into()),
                body: None,
                tags: Some(vec!["x".into()]),
                image: "<img src=\"y\">".into(),
            },
        )
        .await
        .unwrap();

    assert!(result.is_none());

    // Only the supplied fields are written; body is left as stored.
    let update = &executed_sql(repo)[0];
    assert!(update.starts_with(r#"UPDATE "posts" SET"#), "{update}");
    assert!(update.contains(r#""title" = 't'"#), "{update}");
    assert!(update.contains(r#""image" = "#), "{update}");
    assert!(update.contains(r#""tags" = "#), "{update}");
    assert!(!update.contains(r#""body" = "#), "{update}");
    assert!(update.contains("RETURNING"), "{update}");
}

#[tokio::test]
async fn test_record_view_increments_in_one_statement() {
    let post_id = Uuid::now_v7();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, 1)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = repo.record_view(post_id).await.unwrap().unwrap();

    assert_eq!(post.count, 1);

    let sql = executed_sql(repo);
    assert_eq!(sql.len(), 1);
    assert!(sql[0].contains(r#"SET "count" = "count" + 1"#), "{}", sql[0]);
    assert!(sql[0].contains(&format!(r#""posts"."id" = '{post_id}'"#)), "{}", sql[0]);
    assert!(sql[0].contains("RETURNING"), "{}", sql[0]);
}

#[tokio::test]
async fn test_delete_without_rows_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}
