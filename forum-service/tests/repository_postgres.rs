//! Repository behavior against a live PostgreSQL
//!
//! Run with `DATABASE_URL=postgres://... cargo test --features postgres-tests`.
//! Each test gets a fresh database with the embedded migrations applied.

#![cfg(feature = "postgres-tests")]

use forum_service::models::{
    CategoryFilter, CommentFilter, CreateCategory, CreateComment, CreatePost, CreatePostTag,
    CreateTag, FamousTag, Post, PostFilter, PostTagFilter, PostTagKey, TagFilter, UpdateCategory,
    UpdateComment, UpdatePost, UpdateTag,
};
use forum_service::repository::{
    FamousTagRepository, FieldPresence, PageRequest, PostsByTagRepository, Repository,
    RepositoryErrorKind, UpdateRepository,
};
use forum_service::storage::Storage;
use sqlx::PgPool;

async fn create_post(storage: &Storage, title: &str, category_id: &str) -> Post {
    storage
        .posts()
        .create(CreatePost {
            user_id: "user_1".into(),
            title: title.into(),
            body: format!("{} body", title),
            category_id: category_id.into(),
        })
        .await
        .unwrap()
}

async fn tag_post(storage: &Storage, post_id: &str, tag_id: &str) {
    storage
        .post_tags()
        .create(CreatePostTag {
            post_id: post_id.into(),
            tag_id: tag_id.into(),
        })
        .await
        .unwrap();
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn create_then_get_returns_equal_record(pool: PgPool) {
    let storage = Storage::new(pool);
    let categories = storage.categories();

    let created = categories
        .create(CreateCategory { name: "News".into() })
        .await
        .unwrap();
    assert!(created.id.starts_with("cat_"));
    assert_eq!(created.deleted_at, 0);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = categories.get_by_id(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn get_unknown_id_is_not_found(pool: PgPool) {
    let storage = Storage::new(pool);
    let err = storage
        .comments()
        .get_by_id(&"cmt_missing".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::NotFound);
    assert!(!err.is_store_error());
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn deleted_records_disappear_from_reads(pool: PgPool) {
    let storage = Storage::new(pool.clone());
    let tags = storage.tags();

    let kept = tags.create(CreateTag { name: "kept".into() }).await.unwrap();
    let removed = tags.create(CreateTag { name: "removed".into() }).await.unwrap();

    assert!(tags.delete(&removed.id).await.unwrap());

    let err = tags.get_by_id(&removed.id).await.unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::NotFound);

    let listed = tags
        .list(TagFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(listed, vec![kept]);

    // The row is still there, stamped with the deletion time
    let deleted_at: i64 = sqlx::query_scalar("SELECT deleted_at FROM tags WHERE id = $1")
        .bind(&removed.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(deleted_at > 0);
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn deleting_twice_and_deleting_nothing_succeed(pool: PgPool) {
    let storage = Storage::new(pool);
    let posts = storage.posts();
    let post = create_post(&storage, "Hello", "cat_1").await;

    assert!(posts.delete(&post.id).await.unwrap());
    assert!(posts.delete(&post.id).await.is_ok());
    assert!(!posts.delete(&"post_missing".to_string()).await.unwrap());
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn update_without_fields_is_rejected_and_changes_nothing(pool: PgPool) {
    let storage = Storage::new(pool);
    let posts = storage.posts();
    let post = create_post(&storage, "Hello", "cat_1").await;

    let err = posts
        .update(
            &post.id,
            UpdatePost {
                title: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::ValidationFailed);

    assert_eq!(posts.get_by_id(&post.id).await.unwrap(), post);
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn update_writes_only_supplied_fields(pool: PgPool) {
    let storage = Storage::new(pool);
    let posts = storage.posts();
    let post = create_post(&storage, "Hello", "cat_1").await;

    let updated = posts
        .update(
            &post.id,
            UpdatePost {
                title: Some("Hello again".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Hello again");
    assert_eq!(updated.body, post.body);
    assert_eq!(updated.category_id, post.category_id);
    assert_eq!(updated.user_id, post.user_id);
    assert_eq!(updated.created_at, post.created_at);
    assert!(updated.updated_at >= post.updated_at);
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn update_of_deleted_or_unknown_record_is_not_found(pool: PgPool) {
    let storage = Storage::new(pool);
    let comments = storage.comments();
    let comment = comments
        .create(CreateComment {
            post_id: "post_1".into(),
            user_id: "user_1".into(),
            body: "first".into(),
        })
        .await
        .unwrap();
    comments.delete(&comment.id).await.unwrap();

    let update = UpdateComment {
        body: Some("edited".into()),
    };
    let err = comments.update(&comment.id, update.clone()).await.unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::NotFound);

    let err = comments
        .update(&"cmt_missing".to_string(), update)
        .await
        .unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::NotFound);
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn explicit_presence_writes_empty_strings(pool: PgPool) {
    let storage = Storage::new(pool).with_presence(FieldPresence::Explicit);
    let categories = storage.categories();
    let category = categories
        .create(CreateCategory { name: "News".into() })
        .await
        .unwrap();

    let updated = categories
        .update(
            &category.id,
            UpdateCategory {
                name: Some(String::new()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "");
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn non_positive_pagination_uses_defaults(pool: PgPool) {
    let storage = Storage::new(pool);
    let categories = storage.categories();
    for i in 0..12 {
        categories
            .create(CreateCategory {
                name: format!("category {}", i),
            })
            .await
            .unwrap();
    }

    let list = |page, page_size| {
        let categories = categories.clone();
        async move {
            categories
                .list(CategoryFilter::default(), PageRequest::new(page, page_size))
                .await
                .unwrap()
        }
    };

    assert_eq!(list(1, 0).await.len(), 10);
    assert_eq!(list(1, -4).await.len(), 10);
    assert_eq!(list(2, 0).await.len(), 2);
    assert_eq!(list(0, 5).await.len(), 5);
    assert_eq!(list(-1, 100).await.len(), 12);
    assert_eq!(list(3, 5).await.len(), 2);
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn substring_filters_ignore_case(pool: PgPool) {
    let storage = Storage::new(pool);
    let tags = storage.tags();
    tags.create(CreateTag { name: "Rust".into() }).await.unwrap();
    tags.create(CreateTag { name: "Go".into() }).await.unwrap();

    let found = tags
        .list(
            TagFilter {
                name: Some("rust".into()),
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Rust");
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn post_filters_combine(pool: PgPool) {
    let storage = Storage::new(pool);
    let posts = storage.posts();
    let rust_news = create_post(&storage, "Rust news", "cat_news").await;
    create_post(&storage, "Rust tips", "cat_tips").await;
    create_post(&storage, "Go news", "cat_news").await;

    let found = posts
        .list(
            PostFilter {
                title: Some("RUST".into()),
                category_id: Some("cat_news".into()),
                user_id: Some(String::new()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(found, vec![rust_news]);
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn comments_filter_by_post(pool: PgPool) {
    let storage = Storage::new(pool);
    let comments = storage.comments();
    for (post_id, body) in [("post_a", "one"), ("post_a", "two"), ("post_b", "three")] {
        comments
            .create(CreateComment {
                post_id: post_id.into(),
                user_id: "user_1".into(),
                body: body.into(),
            })
            .await
            .unwrap();
    }

    let mut bodies: Vec<String> = comments
        .list(
            CommentFilter {
                post_id: Some("post_a".into()),
                user_id: None,
            },
            PageRequest::default(),
        )
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.body)
        .collect();
    bodies.sort();
    assert_eq!(bodies, vec!["one".to_string(), "two".to_string()]);
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn famous_tags_rank_by_use(pool: PgPool) {
    let storage = Storage::new(pool);
    let tags = storage.tags();
    let go = tags.create(CreateTag { name: "go".into() }).await.unwrap();
    let rust = tags.create(CreateTag { name: "rust".into() }).await.unwrap();
    let gone = tags.create(CreateTag { name: "gone".into() }).await.unwrap();
    tags.delete(&gone.id).await.unwrap();

    for title in ["a", "b", "c"] {
        let post = create_post(&storage, title, "cat_1").await;
        tag_post(&storage, &post.id, &go.id).await;
    }
    let post = create_post(&storage, "d", "cat_1").await;
    tag_post(&storage, &post.id, &rust.id).await;

    let ranked = tags
        .famous_tags(None, true, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(
        ranked,
        vec![
            FamousTag {
                name: "go".into(),
                count: 3
            },
            FamousTag {
                name: "rust".into(),
                count: 1
            },
        ]
    );

    let ascending = tags
        .famous_tags(None, false, PageRequest::default())
        .await
        .unwrap();
    let names: Vec<&str> = ascending.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["rust", "go"]);

    let filtered = tags
        .famous_tags(Some("RU".into()), true, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "rust");

    let first_page = tags
        .famous_tags(None, true, PageRequest::new(1, 1))
        .await
        .unwrap();
    assert_eq!(first_page[0].name, "go");
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn posts_by_tag_follows_associations_and_deletes(pool: PgPool) {
    let storage = Storage::new(pool);

    let news = storage
        .categories()
        .create(CreateCategory { name: "News".into() })
        .await
        .unwrap();
    let hello = create_post(&storage, "Hello", &news.id).await;
    let intro = storage
        .tags()
        .create(CreateTag {
            name: "intro".into(),
        })
        .await
        .unwrap();
    tag_post(&storage, &hello.id, &intro.id).await;

    let post_tags = storage.post_tags();
    let posts = post_tags
        .posts_by_tag(&intro.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(posts, vec![hello.clone()]);

    storage.posts().delete(&hello.id).await.unwrap();
    let posts = post_tags
        .posts_by_tag(&intro.id, PageRequest::default())
        .await
        .unwrap();
    assert!(posts.is_empty());
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn duplicate_associations_are_kept(pool: PgPool) {
    let storage = Storage::new(pool);
    let post = create_post(&storage, "Hello", "cat_1").await;
    tag_post(&storage, &post.id, "tag_1").await;
    tag_post(&storage, &post.id, "tag_1").await;

    let posts = storage
        .post_tags()
        .posts_by_tag("tag_1", PageRequest::default())
        .await
        .unwrap();
    assert_eq!(posts.len(), 2);
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn post_tag_lifecycle(pool: PgPool) {
    let storage = Storage::new(pool);
    let post_tags = storage.post_tags();
    tag_post(&storage, "post_1", "tag_1").await;
    tag_post(&storage, "post_1", "tag_2").await;
    tag_post(&storage, "post_2", "tag_1").await;

    let key = PostTagKey::new("post_1", "tag_1");
    let found = post_tags.get_by_id(&key).await.unwrap();
    assert_eq!(found.post_id, "post_1");
    assert_eq!(found.tag_id, "tag_1");

    let for_post = post_tags
        .list(
            PostTagFilter {
                post_id: Some("post_1".into()),
                tag_id: None,
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(for_post.len(), 2);

    let all = post_tags
        .list(PostTagFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    assert!(post_tags.delete(&key).await.unwrap());
    let err = post_tags.get_by_id(&key).await.unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::NotFound);

    // Deleting a pair that is not stored still succeeds
    assert!(!post_tags.delete(&key).await.unwrap());
}

#[sqlx::test(migrator = "forum_service::MIGRATOR")]
async fn tag_rename_is_visible_to_listing(pool: PgPool) {
    let storage = Storage::new(pool);
    let tags = storage.tags();
    let tag = tags.create(CreateTag { name: "rsut".into() }).await.unwrap();

    tags.update(
        &tag.id,
        UpdateTag {
            name: Some("rust".into()),
        },
    )
    .await
    .unwrap();

    let found = tags
        .list(
            TagFilter {
                name: Some("rust".into()),
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, tag.id);
}
