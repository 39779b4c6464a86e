//! Integration tests for notification visibility and read state.

use edupass_core::notifications::Audience;
use edupass_db::models::notification::CreateNotification;
use edupass_db::models::user::CreateUser;
use edupass_db::repositories::{NotificationRepo, UserRepo};
use sqlx::PgPool;

async fn student(pool: &PgPool, name: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            role_id: 2,
        },
    )
    .await
    .unwrap()
    .id
}

fn note(user_id: Option<i64>, title: &str) -> CreateNotification {
    CreateNotification {
        user_id,
        title: title.to_string(),
        message: format!("{title} body"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unread_count_includes_own_and_broadcast_rows(pool: PgPool) {
    let alice = student(&pool, "alice").await;
    let bob = student(&pool, "bob").await;

    NotificationRepo::create(&pool, &note(Some(alice), "Class moved"))
        .await
        .unwrap();
    NotificationRepo::create(&pool, &note(None, "Holiday"))
        .await
        .unwrap();
    NotificationRepo::create(&pool, &note(Some(bob), "Fee reminder"))
        .await
        .unwrap();

    assert_eq!(NotificationRepo::unread_count(&pool, alice).await.unwrap(), 2);
    assert_eq!(NotificationRepo::unread_count(&pool, bob).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_newest_first_and_respects_unread_filter(pool: PgPool) {
    let alice = student(&pool, "alice").await;
    let first = NotificationRepo::create(&pool, &note(Some(alice), "first"))
        .await
        .unwrap();
    NotificationRepo::create(&pool, &note(Some(alice), "second"))
        .await
        .unwrap();

    let all = NotificationRepo::list_for_user(&pool, alice, false, 50, 0)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "second");

    NotificationRepo::mark_read(&pool, first.id, alice)
        .await
        .unwrap();
    let unread = NotificationRepo::list_for_user(&pool, alice, true, 50, 0)
        .await
        .unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].title, "second");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read_rejects_foreign_rows(pool: PgPool) {
    let alice = student(&pool, "alice").await;
    let bob = student(&pool, "bob").await;
    let row = NotificationRepo::create(&pool, &note(Some(bob), "private"))
        .await
        .unwrap();

    assert!(NotificationRepo::mark_read(&pool, row.id, alice)
        .await
        .unwrap()
        .is_none());
    assert_eq!(NotificationRepo::unread_count(&pool, bob).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_all_read_zeroes_count(pool: PgPool) {
    let alice = student(&pool, "alice").await;
    NotificationRepo::create(&pool, &note(Some(alice), "a"))
        .await
        .unwrap();
    NotificationRepo::create(&pool, &note(None, "b"))
        .await
        .unwrap();

    let outcome = NotificationRepo::mark_all_read(&pool, alice).await.unwrap();
    assert_eq!(outcome.marked, 2);
    assert!(outcome.broadcast_touched);
    assert_eq!(NotificationRepo::unread_count(&pool, alice).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_all_read_of_personal_rows_stays_personal(pool: PgPool) {
    let alice = student(&pool, "alice").await;
    NotificationRepo::create(&pool, &note(Some(alice), "a"))
        .await
        .unwrap();

    let outcome = NotificationRepo::mark_all_read(&pool, alice).await.unwrap();

    assert_eq!(outcome.marked, 1);
    assert!(!outcome.broadcast_touched);
    assert_eq!(outcome.audience(alice), Audience::User(alice));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_returns_removed_row(pool: PgPool) {
    let row = NotificationRepo::create(&pool, &note(None, "gone"))
        .await
        .unwrap();
    let removed = NotificationRepo::delete(&pool, row.id).await.unwrap();
    assert_eq!(removed.map(|n| n.id), Some(row.id));
    assert!(NotificationRepo::find_by_id(&pool, row.id)
        .await
        .unwrap()
        .is_none());
}
