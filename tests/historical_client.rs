use chrono::Duration;
use f1_stats::clients::HistoricalClient;
use f1_stats::models::cache::cache_key;
use f1_stats::models::race::ResultFilter;
use serde_json::json;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HistoricalClient {
    HistoricalClient::new(reqwest::Client::new(), server.uri(), Duration::minutes(30))
}

#[tokio::test]
async fn test_seasons_are_listed_newest_first() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/seasons.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MRData": {"SeasonTable": {"Seasons": [
                {"season": "2022"}, {"season": "2023"}, {"season": "2024"}
            ]}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let historical = client(&server);

    assert_eq!(historical.seasons().await, vec!["2024", "2023", "2022"]);
    assert_eq!(historical.seasons().await.len(), 3);
}

#[tokio::test]
async fn test_standings_without_lists_are_empty() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/1949/driverstandings/"))
        .and(matchers::query_param("limit", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MRData": {"StandingsTable": {"season": "1949", "StandingsLists": []}}
        })))
        .mount(&server)
        .await;

    assert!(client(&server).driver_standings("1949", None).await.is_empty());
}

#[tokio::test]
async fn test_constructor_standings_parse_numeric_strings() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/2024/constructorstandings/"))
        .and(matchers::query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MRData": {"StandingsTable": {"StandingsLists": [{
                "season": "2024",
                "ConstructorStandings": [
                    {"position": "1", "points": "666", "wins": "6",
                     "Constructor": {"constructorId": "mclaren", "name": "McLaren", "nationality": "British"}},
                    {"position": "2", "points": "652.5", "wins": "5",
                     "Constructor": {"constructorId": "ferrari", "name": "Ferrari"}}
                ]
            }]}}
        })))
        .mount(&server)
        .await;

    let rows = client(&server).constructor_standings("2024", Some(2)).await;

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].position, Some(1));
    assert_eq!(rows[0].constructor.name, "McLaren");
    assert_eq!(rows[1].points, 652.5);
    assert_eq!(rows[1].wins, 5);
}

#[tokio::test]
async fn test_filtered_stats_fold_lead_results() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/2023/last/drivers/alonso/results.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MRData": {"RaceTable": {"Races": [
                {"season": "2023", "round": "22", "raceName": "Abu Dhabi Grand Prix",
                 "Circuit": {"circuitId": "yas_marina", "circuitName": "Yas Marina Circuit"},
                 "Results": [{"position": "7", "points": "6", "grid": "11", "status": "Finished"}]}
            ]}}
        })))
        .mount(&server)
        .await;

    let filter = ResultFilter {
        season: Some("2023".to_string()),
        driver_id: Some("alonso".to_string()),
        ..ResultFilter::default()
    };
    let stats = client(&server).filtered_stats(&filter).await.unwrap();

    assert_eq!(stats.total_races, 1);
    assert_eq!(stats.wins, 0);
    assert_eq!(stats.points_finishes, 1);
    assert_eq!(stats.best_finish, Some(7));
    assert_eq!(stats.races[0].circuit, "Yas Marina Circuit");
    assert_eq!(stats.races[0].result.grid, Some(11));
}

#[tokio::test]
async fn test_missing_table_degrades_to_none() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"MRData": {}})))
        .mount(&server)
        .await;
    let historical = client(&server);

    assert!(historical.last_race_results("2024").await.is_none());
    assert!(historical.teams_for_season("2024").await.is_empty());
    assert!(historical.cache().is_empty());
}

#[tokio::test]
async fn test_season_drivers_are_normalized() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/2024/drivers.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MRData": {"DriverTable": {"season": "2024", "Drivers": [
                {"driverId": "albon", "permanentNumber": "23", "code": "ALB",
                 "givenName": "Alexander", "familyName": "Albon", "nationality": "Thai"},
                {"driverId": "bearman", "givenName": "Oliver", "familyName": "Bearman"}
            ]}}
        })))
        .mount(&server)
        .await;

    let drivers = client(&server).drivers_for_season("2024").await;

    assert_eq!(drivers.len(), 2);
    assert_eq!(drivers[0].id, "albon");
    assert_eq!(drivers[0].number.as_deref(), Some("23"));
    assert_eq!(drivers[0].last_name, "Albon");
    assert_eq!(drivers[1].code, None);
}

fn driver_standings_body() -> serde_json::Value {
    json!({
        "MRData": {"StandingsTable": {"StandingsLists": [{
            "season": "2024",
            "DriverStandings": [
                {"position": "1", "points": "437", "wins": "9",
                 "Driver": {"driverId": "max_verstappen", "permanentNumber": "3", "code": "VER",
                            "givenName": "Max", "familyName": "Verstappen", "nationality": "Dutch"},
                 "Constructors": [
                    {"constructorId": "red_bull", "name": "Red Bull"},
                    {"constructorId": "rb", "name": "RB F1 Team"}
                 ]},
                {"points": "12.5",
                 "Driver": {"driverId": "bearman", "givenName": "Oliver", "familyName": "Bearman"}}
            ]
        }]}}
    })
}

#[tokio::test]
async fn test_driver_standing_rows_parse_numbers_and_take_the_first_team() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/2024/driverstandings/"))
        .and(matchers::query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(driver_standings_body()))
        .mount(&server)
        .await;

    let rows = client(&server).driver_standings("2024", None).await;

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].position, Some(1));
    assert_eq!(rows[0].points, 437.0);
    assert_eq!(rows[0].wins, 9);
    assert_eq!(rows[0].driver.team.as_deref(), Some("Red Bull"));
    assert_eq!(rows[0].driver.first_name, "Max");
    assert_eq!(rows[1].position, None);
    assert_eq!(rows[1].points, 12.5);
    assert_eq!(rows[1].wins, 0);
    assert_eq!(rows[1].driver.team, None);
}

#[tokio::test]
async fn test_current_standings_use_the_current_season_path() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/current/driverstandings/"))
        .and(matchers::query_param("limit", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(driver_standings_body()))
        .expect(1)
        .mount(&server)
        .await;
    let historical = client(&server);

    let rows = historical.current_driver_standings().await;
    assert_eq!(rows[0].driver.id, "max_verstappen");

    // Same season and limit, so the second call is served from the cache.
    assert_eq!(historical.driver_standings("current", Some(30)).await, rows);
}

#[tokio::test]
async fn test_numeric_params_share_a_cache_entry() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/2024/constructorstandings/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MRData": {"StandingsTable": {"StandingsLists": [{
                "season": "2024",
                "ConstructorStandings": [
                    {"position": "1", "points": "666", "wins": "6",
                     "Constructor": {"constructorId": "mclaren", "name": "McLaren"}}
                ]
            }]}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let historical = client(&server);

    historical.constructor_standings("2024", Some(44)).await;

    let as_float = cache_key("constructorStandings", &[("season", "2024.0"), ("limit", "44")]);
    assert!(historical.cache().get(&as_float).is_some());
    assert_eq!(historical.constructor_standings("2024", Some(44)).await.len(), 1);
}

async fn mount_career(server: &MockServer, driver_id: &str, races: serde_json::Value) {
    Mock::given(matchers::method("GET"))
        .and(matchers::path(format!("/drivers/{driver_id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MRData": {"DriverTable": {"Drivers": [
                {"driverId": driver_id, "code": "HAM", "permanentNumber": "44",
                 "givenName": "Lewis", "familyName": "Hamilton",
                 "nationality": "British", "dateOfBirth": "1985-01-07"}
            ]}}
        })))
        .mount(server)
        .await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path(format!("/drivers/{driver_id}/results.json")))
        .and(matchers::query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MRData": {"RaceTable": {"Races": races}}
        })))
        .mount(server)
        .await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path(format!("/drivers/{driver_id}/driverStandings/1/seasons.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MRData": {"StandingsTable": {"StandingsLists": [
                {"season": "2008"}, {"season": "2014"}
            ]}}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_career_stats_fold_every_race() {
    let server = MockServer::start().await;
    mount_career(
        &server,
        "hamilton",
        json!([
            {"season": "2007", "round": "1", "raceName": "Australian Grand Prix",
             "Results": [{"position": "3", "grid": "4", "points": "6", "FastestLap": {"rank": "2"}}]},
            {"season": "2008", "round": "2", "raceName": "Malaysian Grand Prix",
             "Results": [{"position": "1", "grid": "1", "points": "10", "FastestLap": {"rank": "1"}}]},
            {"season": "2024", "round": "3", "raceName": "Bahrain Grand Prix",
             "Results": [{"position": "12", "grid": "1", "points": "0"}]}
        ]),
    )
    .await;

    let stats = client(&server).driver_career_stats("hamilton").await.unwrap();

    assert_eq!(stats.driver.first_name, "Lewis");
    assert_eq!(stats.driver.date_of_birth.as_deref(), Some("1985-01-07"));
    assert_eq!(stats.championships, vec![2008, 2014]);
    assert_eq!(stats.total_races, 3);
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.podiums, 2);
    assert_eq!(stats.pole_positions, 2);
    assert_eq!(stats.fastest_laps, 1);
    assert_eq!(stats.points_finishes, 2);
    assert_eq!(stats.first_race, "2007");
    assert_eq!(stats.last_race, "2024");
}

#[tokio::test]
async fn test_career_without_races_reports_unknown_bounds() {
    let server = MockServer::start().await;
    mount_career(&server, "rookie", json!([])).await;

    let stats = client(&server).driver_career_stats("rookie").await.unwrap();

    assert_eq!(stats.total_races, 0);
    assert_eq!(stats.wins, 0);
    assert_eq!(stats.first_race, "Unknown");
    assert_eq!(stats.last_race, "Unknown");
}

#[tokio::test]
async fn test_last_race_classification() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/2024/last/results.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MRData": {"RaceTable": {"Races": [
                {"season": "2024", "round": "24", "raceName": "Abu Dhabi Grand Prix",
                 "Circuit": {"circuitName": "Yas Marina Circuit"},
                 "Results": [
                    {"position": "1", "points": "25", "grid": "1", "status": "Finished",
                     "Driver": {"driverId": "norris", "givenName": "Lando", "familyName": "Norris"},
                     "Constructor": {"constructorId": "mclaren", "name": "McLaren"}}
                 ]}
            ]}}
        })))
        .mount(&server)
        .await;

    let race = client(&server).last_race_results("2024").await.unwrap();

    assert_eq!(race.round, "24");
    assert_eq!(race.circuit, "Yas Marina Circuit");
    assert_eq!(race.results[0].driver_name.as_deref(), Some("Lando Norris"));
    assert_eq!(race.results[0].constructor.as_deref(), Some("McLaren"));
    assert_eq!(race.results[0].points, 25.0);
}
