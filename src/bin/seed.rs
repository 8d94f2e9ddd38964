//! Development seed script: populates a fresh database with sample kennel content.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env). Creation dates are spread over the last
//! three weeks so the dashboard shows non-trivial week-over-week changes.

use sqlx::PgPool;

const ADMIN_PASSWORD: &str = "Kennel123!";
const EDITOR_PASSWORD: &str = "Editor123!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = kennel::db::create_pool(&db_url, 5).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== Kennel Seed Script ===");

    seed_users(&pool).await?;
    seed_members(&pool).await?;
    seed_puppies(&pool).await?;
    seed_posts(&pool).await?;
    seed_environments(&pool).await?;

    println!("\n=== Seed complete! ===");
    println!("Admin login: admin / {ADMIN_PASSWORD}");
    println!("Editor login: editor / {EDITOR_PASSWORD}");

    Ok(())
}

async fn table_is_empty(pool: &PgPool, table: &str) -> anyhow::Result<bool> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("[skip] {table} already has {count} rows");
    }
    Ok(count == 0)
}

async fn seed_users(pool: &PgPool) -> anyhow::Result<()> {
    let users = [
        ("admin", "admin@kennel.local", ADMIN_PASSWORD, "犬舍管理員", "Admin"),
        ("editor", "editor@kennel.local", EDITOR_PASSWORD, "內容編輯", "Editor"),
    ];

    for (username, email, password, display_name, role) in users {
        let hash = kennel::services::auth::hash_password(password)?;
        sqlx::query(
            "INSERT INTO users (username, email, password_hash, display_name, role)
             VALUES ($1, $2, $3, $4, $5::user_role)
             ON CONFLICT (username) DO UPDATE SET password_hash = EXCLUDED.password_hash",
        )
        .bind(username)
        .bind(email)
        .bind(&hash)
        .bind(display_name)
        .bind(role)
        .execute(pool)
        .await?;
    }

    println!("[done] Upserted admin and editor users");
    Ok(())
}

async fn seed_members(pool: &PgPool) -> anyhow::Result<()> {
    if !table_is_empty(pool, "members").await? {
        return Ok(());
    }

    let members = [
        ("Mochi", "Shiba Inu", "Female", "2020-04-12", 40),
        ("Kuma", "Shiba Inu", "Male", "2019-11-02", 40),
        ("Yuzu", "Shiba Inu", "Female", "2021-06-30", 10),
        ("Sora", "Akita", "Male", "2018-02-21", 3),
    ];

    for (name, breed, gender, birth_date, days_ago) in members {
        sqlx::query(
            "INSERT INTO members (name, breed, gender, birth_date, created_at, updated_at)
             VALUES ($1, $2, $3::dog_gender, $4::date,
                     NOW() - make_interval(days => $5), NOW() - make_interval(days => $5))",
        )
        .bind(name)
        .bind(breed)
        .bind(gender)
        .bind(birth_date)
        .bind(days_ago)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} members", members.len());
    Ok(())
}

async fn seed_puppies(pool: &PgPool) -> anyhow::Result<()> {
    if !table_is_empty(pool, "puppies").await? {
        return Ok(());
    }

    let puppies = [
        ("Hana", "Female", "Available", 45000, 2),
        ("Taro", "Male", "Reserved", 45000, 2),
        ("Kiki", "Female", "Available", 42000, 9),
        ("Ren", "Male", "Sold", 42000, 12),
        ("Momo", "Female", "Sold", 40000, 25),
    ];

    for (name, gender, status, price, days_ago) in puppies {
        sqlx::query(
            "INSERT INTO puppies (name, breed, gender, status, price, sire_id, dam_id, created_at, updated_at)
             VALUES ($1, 'Shiba Inu', $2::dog_gender, $3::puppy_status, $4,
                     (SELECT id FROM members WHERE name = 'Kuma'),
                     (SELECT id FROM members WHERE name = 'Mochi'),
                     NOW() - make_interval(days => $5), NOW() - make_interval(days => $5))",
        )
        .bind(name)
        .bind(gender)
        .bind(status)
        .bind(price)
        .bind(days_ago)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} puppies", puppies.len());
    Ok(())
}

async fn seed_posts(pool: &PgPool) -> anyhow::Result<()> {
    if !table_is_empty(pool, "posts").await? {
        return Ok(());
    }

    let posts = [
        ("新生命報到", "Mochi 今天順利生下兩隻寶寶。", true, 1),
        ("第一次散步", "寶寶們第一次到草地上探險。", true, 4),
        ("疫苗接種紀錄", "本週完成第一劑疫苗。", true, 8),
        ("犬舍整修", "戶外運動區重新鋪設草皮。", false, 10),
        ("冬季保暖", "天氣轉涼，犬舍加裝保暖設備。", true, 20),
    ];

    for (title, content, published, days_ago) in posts {
        sqlx::query(
            "INSERT INTO posts (title, content, published, created_by, created_at, updated_at)
             VALUES ($1, $2, $3, (SELECT id FROM users WHERE username = 'editor'),
                     NOW() - make_interval(days => $4), NOW() - make_interval(days => $4))",
        )
        .bind(title)
        .bind(content)
        .bind(published)
        .bind(days_ago)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} posts", posts.len());
    Ok(())
}

async fn seed_environments(pool: &PgPool) -> anyhow::Result<()> {
    if !table_is_empty(pool, "environments").await? {
        return Ok(());
    }

    let environments = [
        ("戶外運動區", "/uploads/sample-yard.jpg", 1),
        ("室內休息區", "/uploads/sample-indoor.jpg", 2),
        ("幼犬育嬰室", "/uploads/sample-nursery.jpg", 3),
    ];

    for (title, image_url, sort_order) in environments {
        sqlx::query("INSERT INTO environments (title, image_url, sort_order) VALUES ($1, $2, $3)")
            .bind(title)
            .bind(image_url)
            .bind(sort_order)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {} environment photos", environments.len());
    Ok(())
}
