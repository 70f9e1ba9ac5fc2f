//! Post services running against the in-memory data sources.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use agora_core::DomainError;
use agora_core::domain::{Post, PostComment, PostLikeOwner, PostOwner};
use agora_core::ports::PostDataSource;
use agora_core::services::PostService;
use agora_infra::InMemoryPostDataSource;

fn snapshot(name: &str, surname: &str) -> PostOwner {
    PostOwner {
        id: Uuid::new_v4(),
        name: name.to_string(),
        surname: surname.to_string(),
        avatar: format!("{}.png", name.to_lowercase()),
    }
}

/// A post from yesterday with two likes and one comment.
fn liked_and_commented_post() -> Post {
    let created = Utc::now() - Duration::days(1);
    Post {
        id: Uuid::new_v4(),
        body: "Liked and commented".to_string(),
        owner: snapshot("Owner", "One"),
        comments: vec![PostComment {
            id: Uuid::new_v4(),
            body: "Great post".to_string(),
            owner: snapshot("Commenter", "Two"),
            created_at: created,
            updated_at: created,
        }],
        likes: vec![snapshot("Liker", "Three"), snapshot("Liker", "Four")],
        created_at: created,
        updated_at: created,
    }
}

async fn seeded() -> (Arc<InMemoryPostDataSource>, PostService, Vec<Post>) {
    let store = Arc::new(InMemoryPostDataSource::new());
    let posts = vec![liked_and_commented_post(), liked_and_commented_post()];
    store.seed(posts.clone()).await;
    let service = PostService::new(store.clone());
    (store, service, posts)
}

#[tokio::test]
async fn get_posts_returns_every_persisted_post() {
    let (_store, service, seeded) = seeded().await;

    let posts = service.get_posts().await.unwrap();

    assert_eq!(posts.len(), seeded.len());
    for post in &posts {
        let value = serde_json::to_value(post).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["body", "comments", "createdAt", "id", "likes", "owner", "updatedAt"]
        );

        let expected = seeded.iter().find(|p| p.id == post.id).unwrap();
        assert_eq!(post, expected);
    }
}

#[tokio::test]
async fn like_post_persists_the_new_like() {
    let (store, service, seeded) = seeded().await;
    let original = &seeded[0];
    let like_owner = PostLikeOwner {
        id: Uuid::new_v4(),
        name: "Ann".to_string(),
        surname: "Lee".to_string(),
        avatar: "a.png".to_string(),
    };

    service
        .like_post(original.id, like_owner.clone())
        .await
        .unwrap();

    let updated = store.get_post_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(updated.body, original.body);
    assert_eq!(updated.owner, original.owner);
    assert_eq!(updated.comments, original.comments);
    assert_eq!(updated.likes.len(), original.likes.len() + 1);

    let original_ids: Vec<Uuid> = original.likes.iter().map(|l| l.id).collect();
    let new_like = updated
        .likes
        .iter()
        .find(|l| !original_ids.contains(&l.id))
        .unwrap();
    assert_eq!(new_like, &like_owner);
    assert_eq!(updated.likes.last(), Some(&like_owner));

    assert_eq!(updated.created_at, original.created_at);
    assert_ne!(updated.updated_at, original.updated_at);
}

#[tokio::test]
async fn like_post_with_unknown_id_is_not_found() {
    let (store, service, seeded) = seeded().await;
    // A comment id is a valid UUID that never identifies a post.
    let post_id = seeded[0].comments[0].id;

    let err = service
        .like_post(post_id, snapshot("Ann", "Lee"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::PostNotFound { post_id: id } if id == post_id));
    assert_eq!(err.to_string(), format!("Post '{post_id}' not found"));

    let untouched = store.get_posts().await.unwrap();
    assert!(untouched.iter().all(|p| seeded.contains(p)));
}

#[tokio::test]
async fn repeated_likes_by_the_same_user_count_once() {
    let (store, service, seeded) = seeded().await;
    let original = &seeded[1];
    let like_owner = snapshot("Ann", "Lee");

    let first = service
        .like_post(original.id, like_owner.clone())
        .await
        .unwrap();
    let second = service
        .like_post(original.id, like_owner.clone())
        .await
        .unwrap();

    assert_eq!(first, second);
    let stored = store.get_post_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(stored.likes.len(), original.likes.len() + 1);
}

#[tokio::test]
async fn comment_post_appends_and_bumps_updated_at() {
    let (store, service, seeded) = seeded().await;
    let original = &seeded[0];
    let author = snapshot("Bob", "Ray");

    service
        .comment_post(original.id, author.clone(), "Agreed")
        .await
        .unwrap();

    let updated = store.get_post_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(updated.comments.len(), 2);
    assert_eq!(updated.comments[0], original.comments[0]);
    assert_eq!(updated.comments[1].owner, author);
    assert_eq!(updated.likes, original.likes);
    assert!(updated.updated_at > original.updated_at);
}
