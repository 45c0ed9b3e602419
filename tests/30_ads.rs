mod common;

use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

// Listing assertions assume no other test in this binary is inserting ads at the same time.
static ADS_LOCK: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    ADS_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn create_ad(server: &common::TestServer, client: &reqwest::Client, token: &str, body: Value) -> Result<Value> {
    let res = client
        .post(format!("{}/ads", server.base_url))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
    Ok(res.json().await?)
}

#[tokio::test]
async fn create_then_list_scenario() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let _guard = serial();
    let client = reqwest::Client::new();
    let username = common::unique_username("alice");
    let token = common::register_and_login(server, &client, &username).await?;

    let res = client
        .post(format!("{}/ads", server.base_url))
        .bearer_auth(&token)
        .json(&json!({"title": "Bike", "description": "A red bike for sale", "price": 120}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let ad: Value = res.json().await?;
    assert_eq!(ad["user"]["username"], username.as_str());

    let res = client
        .get(format!("{}/ads?limit=1", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let page: Value = res.json().await?;
    let page = page.as_array().expect("array body");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["id"], ad["id"]);
    assert_eq!(page[0]["user"]["username"], username.as_str());
    assert!(page[0].get("deleted_at").is_none());
    Ok(())
}

#[tokio::test]
async fn ownership_and_soft_delete() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let _guard = serial();
    let client = reqwest::Client::new();
    let owner = common::register_and_login(server, &client, &common::unique_username("owner")).await?;
    let other = common::register_and_login(server, &client, &common::unique_username("other")).await?;

    let ad: Value = client
        .post(format!("{}/ads", server.base_url))
        .bearer_auth(&owner)
        .json(&json!({"title": "Lamp", "description": "Desk lamp, warm light", "price": 0.01}))
        .send()
        .await?
        .json()
        .await?;
    let url = format!("{}/ads/{}", server.base_url, ad["id"]);

    let res = client.delete(&url).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client.delete(&url).bearer_auth(&other).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client.delete(&url).bearer_auth(&owner).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.delete(&url).bearer_auth(&owner).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn list_rejects_oversized_limit() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let token = common::register_and_login(server, &client, &common::unique_username("pager")).await?;

    let res = client
        .get(format!("{}/ads?limit=101", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/ads?limit=100", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn owner_updates_in_place() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let _guard = serial();
    let client = reqwest::Client::new();
    let owner_name = common::unique_username("seller");
    let owner = common::register_and_login(server, &client, &owner_name).await?;
    let other = common::register_and_login(server, &client, &common::unique_username("buyer")).await?;

    let ad = create_ad(
        server,
        &client,
        &owner,
        json!({"title": "Bike", "description": "A red bike for sale", "price": 120}),
    )
    .await?;
    let url = format!("{}/ads/{}", server.base_url, ad["id"]);
    let changes = json!({
        "title": "Blue bike",
        "description": "Repainted, still for sale",
        "image_url": "https://img.example/bike.png",
        "price": 99.5
    });

    let res = client.put(&url).bearer_auth(&other).json(&changes).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client.put(&url).bearer_auth(&owner).json(&changes).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["id"], ad["id"]);
    assert_eq!(updated["user"], ad["user"]);
    assert_eq!(updated["user"]["username"], owner_name.as_str());
    assert_eq!(updated["title"], "Blue bike");
    assert_eq!(updated["image_url"], "https://img.example/bike.png");
    assert_eq!(updated["price"], 99.5);
    assert_eq!(updated["created_at"], ad["created_at"]);

    let res = client.delete(&url).bearer_auth(&owner).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.put(&url).bearer_auth(&owner).json(&changes).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn sorted_pages_follow_each_other() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let _guard = serial();
    let client = reqwest::Client::new();
    let token = common::register_and_login(server, &client, &common::unique_username("shelf")).await?;

    for (title, price) in [("Lamp", 15.0), ("Chair", 40.0), ("Desk", 25.0), ("Rug", 30.0)] {
        let body = json!({"title": title, "description": "Barely used furniture", "price": price});
        create_ad(server, &client, &token, body).await?;
    }

    let mut pages = Vec::new();
    for page in 1..=2 {
        let res = client
            .get(format!("{}/ads?sort=price&order=asc&limit=2&page={}", server.base_url, page))
            .bearer_auth(&token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await?;
        let prices: Vec<f64> = body
            .as_array()
            .expect("array body")
            .iter()
            .map(|ad| ad["price"].as_f64().expect("numeric price"))
            .collect();
        assert_eq!(prices.len(), 2);
        pages.push(prices);
    }

    // the database may hold ads from earlier runs, so check ordering rather than exact values
    let all: Vec<f64> = pages.concat();
    assert!(all.windows(2).all(|w| w[0] <= w[1]), "not ascending: {:?}", all);
    Ok(())
}
