use std::{net::SocketAddr, sync::Arc};

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use scoreboard_back::{
    config::AppConfig,
    dao::scoreboard_store::memory::MemoryScoreboardStore,
    routes,
    state::{AppState, SharedState},
};

struct TestServer {
    base: String,
    client: Client,
}

impl TestServer {
    async fn start() -> Self {
        let state = AppState::new(AppConfig::default());
        state
            .install_store(Arc::new(MemoryScoreboardStore::new()))
            .await;
        Self::serve(state).await
    }

    async fn serve(state: SharedState) -> Self {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, routes::app(state).into_make_service())
                .await
                .unwrap();
        });
        Self {
            base: format!("http://{addr}"),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let response = self.client.delete(self.url(path)).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn create_team(&self, name: &str) -> String {
        let (status, body) = self.post("/api/teams/create", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["team"]["_id"].as_str().unwrap().to_owned()
    }

    async fn create_game(&self, name: &str, points: i64) -> String {
        let (status, body) = self
            .post(
                "/api/games/create",
                json!({ "games": [{ "name": name, "points": points }] }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["createdGames"][0]["_id"].as_str().unwrap().to_owned()
    }

    async fn create_member(&self, name: &str, team: &str) -> String {
        let (status, body) = self
            .post(
                "/api/members/create",
                json!({ "members": [{ "name": name, "team": team }] }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["created"][0]["_id"].as_str().unwrap().to_owned()
    }
}

#[tokio::test]
async fn health_and_banner() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/healthcheck").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storeReachable"], true);

    let banner = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!banner.is_empty());
}

#[tokio::test]
async fn degraded_mode_answers_503_on_data_routes() {
    let server = TestServer::serve(AppState::new(AppConfig::default())).await;

    let (status, body) = server.get("/healthcheck").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["storeReachable"], false);

    let (status, body) = server.get("/api/teams/get").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn team_lifecycle() {
    let server = TestServer::start().await;
    let red = server.create_team("  Red ").await;

    let (status, body) = server
        .post("/api/teams/create", json!({ "name": "RED" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, _) = server.post("/api/teams/create", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server
        .put(&format!("/api/teams/update/{red}"), json!({ "name": "Crimson" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"]["name"], "Crimson");

    let alice = server.create_member("Alice", &red).await;
    let (status, body) = server.get(&format!("/api/teams/get/{red}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["members"][0]["_id"], alice.as_str());

    let (status, body) = server.get(&format!("/api/teams/{red}/members")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["teamName"], "Crimson");
    assert_eq!(body["members"].as_array().unwrap().len(), 1);

    let (status, _) = server.delete(&format!("/api/teams/delete/{red}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = server.get(&format!("/api/teams/get/{red}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_requests_answer_400_with_an_error_body() {
    let server = TestServer::start().await;
    let red = server.create_team("Red").await;

    let (status, body) = server.get("/api/teams/get/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let (status, body) = server.post("/api/scores", json!({ "team": red })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("game"), "{body}");

    let (status, body) = server
        .post(
            "/api/members/create",
            json!({ "members": [{ "name": "Alice", "team": "nope" }] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let (status, body) = server.get("/api/leaderboard/teams?limit=many").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let response = server
        .client
        .post(server.url("/api/teams/create"))
        .body("{\"name\": \"Blue\"")
        .header("content-type", "application/json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
async fn member_batch_and_listing() {
    let server = TestServer::start().await;
    let red = server.create_team("Red").await;
    let blue = server.create_team("Blue").await;

    let (status, body) = server
        .post(
            "/api/members/create",
            json!({ "members": [
                { "name": "Alice", "team": red },
                { "name": "Bob", "role": "coach", "team": blue },
                { "name": "alice", "team": blue },
            ] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["created"].as_array().unwrap().len(), 2);
    assert_eq!(body["skipped"], 1);
    assert_eq!(body["created"][0]["role"], "player");

    let (status, body) = server
        .post(
            "/api/members/create",
            json!({ "members": [{ "name": "ALICE", "team": red }] }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, body) = server.get(&format!("/api/members/get?team={blue}")).await;
    assert_eq!(status, StatusCode::OK);
    let members = body.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["name"], "Bob");
    assert_eq!(members[0]["team"]["name"], "Blue");

    let bob = members[0]["_id"].as_str().unwrap().to_owned();
    let (status, body) = server
        .put(&format!("/api/members/update/{bob}"), json!({ "team": red }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"]["_id"], red.as_str());

    let (status, body) = server.delete(&format!("/api/members/delete/{bob}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn game_batch_and_update() {
    let server = TestServer::start().await;

    let (status, body) = server
        .post(
            "/api/games/create",
            json!({ "games": [
                { "name": "Chess", "shortName": "CHS", "points": 10 },
                { "name": "  " },
                { "name": "Darts" },
            ] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["createdGames"].as_array().unwrap().len(), 2);

    let (status, _) = server
        .post("/api/games/create", json!({ "games": [{ "name": "chess" }] }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = server.post("/api/games/create", json!({ "games": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, games) = server.get("/api/games/get").await;
    let darts = games
        .as_array()
        .unwrap()
        .iter()
        .find(|game| game["name"] == "Darts")
        .unwrap()["_id"]
        .as_str()
        .unwrap()
        .to_owned();

    let (status, body) = server
        .put(&format!("/api/games/update/{darts}"), json!({ "points": 3 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game"]["points"], 3);
    assert_eq!(body["game"]["name"], "Darts");

    let (status, _) = server
        .put(&format!("/api/games/update/{darts}"), json!({ "name": "CHESS" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = server.delete(&format!("/api/games/delete/{darts}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn scores_feed_the_leaderboards() {
    let server = TestServer::start().await;
    let red = server.create_team("Red").await;
    let blue = server.create_team("Blue").await;
    let chess = server.create_game("Chess", 10).await;
    let alice = server.create_member("Alice", &red).await;

    // Two team-level submissions for Red accumulate; the second uses the game default.
    let (status, body) = server
        .post(
            "/api/scores",
            json!({ "game": chess, "team": red, "points": 5 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let (_, body) = server
        .post("/api/scores", json!({ "game": chess, "team": red }))
        .await;
    assert_eq!(body["scores"][0]["points"], 15);

    server
        .post(
            "/api/scores",
            json!({ "game": chess, "team": blue, "points": 20 }),
        )
        .await;
    let (status, _) = server
        .post(
            "/api/scores",
            json!({ "game": chess, "team": red, "memberIds": [alice], "points": 7 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, teams) = server.get("/api/leaderboard/teams").await;
    assert_eq!(status, StatusCode::OK);
    let teams = teams.as_array().unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0]["teamName"], "Blue");
    assert_eq!(teams[0]["totalPoints"], 20);
    assert_eq!(teams[1]["teamName"], "Red");
    assert_eq!(teams[1]["totalPoints"], 15);

    let (_, limited) = server.get("/api/leaderboard/teams?limit=1").await;
    assert_eq!(limited.as_array().unwrap().len(), 1);

    let (_, members) = server.get("/api/leaderboard/members").await;
    assert_eq!(members[0]["memberName"], "Alice");
    assert_eq!(members[0]["teamName"], "Red");
    assert_eq!(members[0]["totalPoints"], 7);

    let (status, details) = server
        .get(&format!("/api/leaderboard/team/{red}/details"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details[0]["gameName"], "Chess");
    assert_eq!(details[0]["points"], 15);

    let (_, details) = server
        .get(&format!("/api/leaderboard/member/{alice}/details"))
        .await;
    assert_eq!(details[0]["points"], 7);

    let (_, scores) = server.get("/api/scores").await;
    assert_eq!(scores.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn score_errors() {
    let server = TestServer::start().await;
    let red = server.create_team("Red").await;
    let blue = server.create_team("Blue").await;
    let chess = server.create_game("Chess", 1).await;
    let alice = server.create_member("Alice", &red).await;
    let eve = server.create_member("Eve", &blue).await;
    let ghost = uuid::Uuid::new_v4().to_string();

    let (status, body) = server
        .post("/api/scores", json!({ "game": ghost, "team": red }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = server
        .post(
            "/api/scores",
            json!({ "game": chess, "team": red, "memberIds": [eve] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Alice is applied before the unknown member stops the request.
    let (status, _) = server
        .post(
            "/api/scores",
            json!({ "game": chess, "team": red, "memberIds": [alice, ghost], "points": 4 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, members) = server.get("/api/leaderboard/members").await;
    assert_eq!(members[0]["totalPoints"], 4);

    let (_, scores) = server.get("/api/scores").await;
    let id = scores[0]["_id"].as_str().unwrap().to_owned();
    let (status, _) = server.delete(&format!("/api/scores/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = server.delete(&format!("/api/scores/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server
        .get(&format!("/api/leaderboard/team/{ghost}/details"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
