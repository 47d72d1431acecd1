#![allow(dead_code)]

use eventide_store::app_config::DatabaseConfig;
use eventide_store::DbClient;

pub async fn connect() -> DbClient {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for store tests");
    let db = DbClient::new(&DatabaseConfig {
        url,
        max_connections: 10,
        acquire_timeout_seconds: 5,
    })
    .await
    .expect("Failed to connect");
    db.migrate().await.expect("Failed to migrate");
    db
}

pub async fn seed_room(db: &DbClient, capacity: i32) -> i32 {
    let hotel_id: i32 =
        sqlx::query_scalar("INSERT INTO hotels (name, image) VALUES ('Test', 'img') RETURNING id")
            .fetch_one(&db.pool)
            .await
            .unwrap();
    sqlx::query_scalar(
        "INSERT INTO rooms (name, capacity, hotel_id) VALUES ('101', $1, $2) RETURNING id",
    )
    .bind(capacity)
    .bind(hotel_id)
    .fetch_one(&db.pool)
    .await
    .unwrap()
}

/// A RESERVED ticket on a fresh enrollment. Returns the ticket id.
pub async fn seed_reserved_ticket(db: &DbClient, price: i32) -> i32 {
    let ticket_type_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO ticket_types (name, price, is_remote, includes_hotel)
        VALUES ('Presencial + Hotel', $1, FALSE, TRUE)
        RETURNING id
        "#,
    )
    .bind(price)
    .fetch_one(&db.pool)
    .await
    .unwrap();

    // Serial ids are unique across parallel tests, so derive the user from one.
    let enrollment_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO enrollments (user_id, name, cpf, birthday, phone)
        VALUES ($1, 'Test', '12345678901', NOW(), '5511999999999')
        RETURNING id
        "#,
    )
    .bind(1_000_000 + ticket_type_id)
    .fetch_one(&db.pool)
    .await
    .unwrap();

    sqlx::query_scalar(
        r#"
        INSERT INTO tickets (ticket_type_id, enrollment_id, status)
        VALUES ($1, $2, 'RESERVED')
        RETURNING id
        "#,
    )
    .bind(ticket_type_id)
    .bind(enrollment_id)
    .fetch_one(&db.pool)
    .await
    .unwrap()
}
