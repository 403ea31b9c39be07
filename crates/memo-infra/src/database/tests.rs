#[cfg(test)]
mod tests {
    use crate::database::entity::post;
    use crate::database::postgres_repo::PostgresPostRepository;
    use memo_core::domain::{PageRequest, Post, PostFilter, PostPatch};
    use memo_core::ports::{BaseRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(title: &str) -> post::Model {
        post::Model {
            id: uuid::Uuid::now_v7(),
            title: title.to_owned(),
            body: "<p>Body</p>".to_owned(),
            tags: vec!["rust".to_owned()],
            user_id: uuid::Uuid::new_v4(),
            username: "alice".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let stored = model("Test Post");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored.clone()]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(stored.id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, stored.id);
        assert_eq!(post.user.username, "alice");
        assert_eq!(post.user.id, stored.user_id);
    }

    #[tokio::test]
    async fn test_unfiltered_page_has_no_where_clause() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model("a"), model("b")]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let posts = repo
            .find_page(&PostFilter::default(), PageRequest::new(2).unwrap())
            .await
            .unwrap();
        assert_eq!(posts.len(), 2);

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(!log.contains("WHERE"), "unexpected constraint in {log}");
        assert!(log.contains("ORDER BY"));
        assert!(log.contains("DESC"));
        assert!(log.contains("OFFSET"));
    }

    #[tokio::test]
    async fn test_filtered_page_constrains_tag_and_username() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let filter = PostFilter::new(Some("rust".to_string()), Some("alice".to_string()));
        repo.find_page(&filter, PageRequest::default())
            .await
            .unwrap();

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains("WHERE"));
        assert!(log.contains("username"));
        assert!(log.contains("ANY("));
    }

    #[tokio::test]
    async fn test_update_missing_post_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let patch = PostPatch {
            title: Some("New".to_string()),
            ..PostPatch::default()
        };
        let result = repo.update(uuid::Uuid::now_v7(), patch).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_returns_merged_post() {
        let stored = model("Old");
        let updated = post::Model {
            title: "New".to_owned(),
            ..stored.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored.clone()]])
            .append_query_results(vec![vec![updated]])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let patch = PostPatch {
            title: Some("New".to_string()),
            ..PostPatch::default()
        };
        let post = repo.update(stored.id, patch).await.unwrap().unwrap();

        assert_eq!(post.title, "New");
        assert_eq!(post.body, stored.body);
    }

    #[tokio::test]
    async fn test_delete_of_absent_row_is_not_an_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PostgresPostRepository::new(db);

        let removed = BaseRepository::<Post, uuid::Uuid>::delete(&repo, uuid::Uuid::now_v7())
            .await
            .unwrap();

        assert!(!removed);
    }
}
