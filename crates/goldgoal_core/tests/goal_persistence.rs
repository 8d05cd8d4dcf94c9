use chrono::TimeDelta;
use goldgoal_core::{
    FixedClock, Goal, GoalRepository, JsonFileGoalRepository, Period, RepoError, StoreConfig,
};
use std::fs;
use std::path::Path;
use uuid::Uuid;

fn repo_in(dir: &Path) -> JsonFileGoalRepository {
    JsonFileGoalRepository::new(StoreConfig::new(dir)).unwrap()
}

fn sample_goals() -> Vec<Goal> {
    let clock = FixedClock::from_rfc3339("2026-10-17T06:15:30.123456789+02:00").unwrap();

    let mut water = Goal::new("Water", Period::Day, 2000.0, 250.0, "ml");
    water.quick_add(&clock);
    clock.advance(TimeDelta::milliseconds(1500));
    water.manual_add("0.1", &clock).unwrap();
    water.finish_goal(&clock);

    let mut reading = Goal::new("Reading", Period::Week, 120.5, 15.25, "minutes");
    reading.manual_add("-3.75", &clock).unwrap();

    let saving = Goal::new("Saving", Period::Month, 300.0, 25.0, "eur");

    vec![water, reading, saving]
}

#[test]
fn save_then_load_round_trips_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo_in(dir.path());
    let goals = sample_goals();

    repo.save(&goals).unwrap();
    let loaded = repo.load().unwrap();

    assert_eq!(loaded, goals);
    assert_eq!(loaded[0].logs()[1].date_time(), goals[0].logs()[1].date_time());
    assert_eq!(loaded[0].logs()[1].id(), goals[0].logs()[1].id());
}

#[test]
fn persisted_file_uses_schema_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo_in(dir.path());
    let goals = sample_goals();
    repo.save(&goals).unwrap();

    assert_eq!(repo.path(), dir.path().join("Goals.json"));
    let json: serde_json::Value = serde_json::from_slice(&fs::read(repo.path()).unwrap()).unwrap();
    let first = &json[0];
    assert_eq!(first["id"], goals[0].id().to_string());
    assert_eq!(first["name"], "Water");
    assert_eq!(first["period"], 0);
    assert_eq!(first["goalAmount"], 2000.0);
    assert_eq!(first["currentAmount"], goals[0].current_amount());
    assert_eq!(first["quickAdd"], 250.0);
    assert_eq!(first["unit"], "ml");
    assert_eq!(json[1]["period"], 1);
    assert_eq!(json[2]["period"], 2);

    let log = &first["logs"][0];
    assert_eq!(log["amountChanged"], 250.0);
    assert_eq!(log["id"], goals[0].logs()[0].id().to_string());
    assert_eq!(log["dateTime"], "2026-10-17T04:15:30.123456789Z");
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = repo_in(dir.path()).load().unwrap_err();
    assert!(matches!(err, RepoError::ResourceMissing(path) if path.ends_with("Goals.json")));
}

#[test]
fn load_rejects_malformed_content() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo_in(dir.path());

    for content in [
        "not json",
        "{\"goals\": []}",
        r#"[{"id":"11111111-2222-4333-8444-555555555555","name":"x"}]"#,
        r#"[{"id":"11111111-2222-4333-8444-555555555555","name":"x","period":"day",
             "goalAmount":1,"currentAmount":0,"quickAdd":1,"unit":"u","logs":[]}]"#,
        r#"[{"id":"11111111-2222-4333-8444-555555555555","name":"x","period":9,
             "goalAmount":1,"currentAmount":0,"quickAdd":1,"unit":"u","logs":[]}]"#,
        r#"[{"id":"11111111-2222-4333-8444-555555555555","name":"x","period":0,
             "goalAmount":1,"currentAmount":0,"quickAdd":1,"unit":"u",
             "logs":[{"id":"11111111-2222-4333-8444-555555555556","amountChanged":1}]}]"#,
    ] {
        fs::write(repo.path(), content).unwrap();
        let err = repo.load().unwrap_err();
        assert!(
            matches!(err, RepoError::Decode { .. }),
            "content should fail decoding: {content}"
        );
    }
}

#[test]
fn load_ignores_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo_in(dir.path());
    fs::write(
        repo.path(),
        r#"[{
            "id": "11111111-2222-4333-8444-555555555555",
            "name": "Water",
            "period": 0,
            "goalAmount": 2000,
            "currentAmount": 250,
            "quickAdd": 250,
            "unit": "ml",
            "color": "gold",
            "logs": [{
                "id": "11111111-2222-4333-8444-555555555556",
                "amountChanged": 250,
                "dateTime": "2026-10-17T08:00:00Z",
                "note": "morning"
            }]
        }]"#,
    )
    .unwrap();

    let goals = repo.load().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(
        goals[0].id(),
        Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap()
    );
    assert_eq!(goals[0].current_amount(), 250.0);
    assert_eq!(goals[0].logs().len(), 1);
}

#[test]
fn save_overwrites_previous_content_completely() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo_in(dir.path());
    repo.save(&sample_goals()).unwrap();

    let single = vec![Goal::new("Only", Period::Day, 1.0, 1.0, "x")];
    repo.save(&single).unwrap();
    assert_eq!(repo.load().unwrap(), single);

    repo.save(&[]).unwrap();
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn save_creates_missing_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo_in(&dir.path().join("nested").join("data"));
    repo.save(&sample_goals()).unwrap();
    assert_eq!(repo.load().unwrap().len(), 3);
}

#[test]
fn failed_save_reports_storage_write_and_leaves_no_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    // A directory squatting on the target name makes the final rename fail.
    fs::create_dir(dir.path().join("Goals.json")).unwrap();
    fs::write(dir.path().join("Goals.json").join("keep.txt"), "keep").unwrap();
    let repo = repo_in(dir.path());

    let err = repo.save(&sample_goals()).unwrap_err();
    assert!(matches!(err, RepoError::StorageWrite { .. }));

    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("Goals.json").join("keep.txt")).unwrap(),
        "keep"
    );
}

#[test]
fn unwritable_location_reports_storage_write() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "file, not a directory").unwrap();
    let repo = repo_in(&blocker.join("data"));

    let err = repo.save(&sample_goals()).unwrap_err();
    assert!(matches!(err, RepoError::StorageWrite { .. }));
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "file, not a directory");
}

#[test]
fn non_finite_amounts_are_refused_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo_in(dir.path());
    let original = sample_goals();
    repo.save(&original).unwrap();

    let broken = vec![Goal::new("Broken", Period::Day, f64::INFINITY, 1.0, "x")];
    let err = repo.save(&broken).unwrap_err();
    assert!(matches!(err, RepoError::Encode(_)));
    assert_eq!(repo.load().unwrap(), original);
}

#[test]
fn relative_data_dir_is_rejected_at_construction() {
    let err = JsonFileGoalRepository::new(StoreConfig::new("relative/dir")).unwrap_err();
    assert!(err.to_string().contains("absolute"));
}
