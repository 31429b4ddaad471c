use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {
        "id": 1,
        "name": "Green Meadows Hostel",
        "description": "Quiet block near the library",
        "gender": "female",
        "branch": "north_campus",
        "year_of_study": "2nd_year",
        "warden_name": "Anita Rao",
        "warden_contact": "555-0101",
        "warden_email": "anita@example.edu",
        "min_price": 12000,
        "max_price": 18000,
        "mess_fees": 4000,
        "laundry_fees": 800,
        "geocode": "12.97,77.59",
        "rooms": [
            {"washroom_type": "attached", "occupancy": 2, "ac_type": "ac", "price": 18000},
            {"washroom_type": "common", "occupancy": 3, "ac_type": "non_ac", "price": 12000}
        ]
    },
    {
        "id": 2,
        "name": "Green Meadows Hostel Annex",
        "gender": "female",
        "branch": "north_campus",
        "year_of_study": "3rd_year",
        "min_price": 30000,
        "max_price": 34000,
        "rooms": [
            {"washroom_type": "common", "occupancy": 1, "ac_type": "non_ac", "price": 30000}
        ]
    },
    {
        "id": "c3",
        "name": "Oak Lodge",
        "gender": "male",
        "branch": "south_campus",
        "year_of_study": "1st_year",
        "min_price": 9000,
        "max_price": 11000
    }
]"#;

fn setup_catalog() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("hostels.json"), CATALOG).unwrap();
    temp
}

fn run(temp: &TempDir, args: &[&str]) -> (bool, Value) {
    let output = Command::cargo_bin("hostel-search")
        .expect("binary")
        .current_dir(temp.path())
        .env_remove("HOSTEL_STORE_URL")
        .env_remove("HOSTEL_STORE_FILE")
        .env_remove("HOSTEL_ENV")
        .arg("search")
        .args(args)
        .output()
        .expect("command run");

    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    (output.status.success(), body)
}

#[test]
fn exact_name_ranks_first() {
    let temp = setup_catalog();
    let (ok, body) = run(
        &temp,
        &["--store-file", "hostels.json", "Green Meadows Hostel"],
    );
    assert!(ok);

    let hostels = body["hostels"].as_array().expect("hostels array");
    assert_eq!(hostels.len(), 2);
    assert_eq!(hostels[0]["id"], json!("1"));
    assert_eq!(hostels[0]["relevanceScore"], json!(100));
    assert_eq!(hostels[1]["relevanceScore"], json!(80));
    assert_eq!(hostels[0]["warden"]["contact"], json!("555-0101"));
    assert_eq!(hostels[0]["amenities"]["occupancies"], json!([2, 3]));
    assert_eq!(body["metadata"]["search_term"], json!("green meadows hostel"));
}

#[test]
fn girls_and_female_match_the_same_hostels() {
    let temp = setup_catalog();
    let (_, girls) = run(&temp, &["--store-file", "hostels.json", "girls"]);
    let (_, female) = run(&temp, &["--store-file", "hostels.json", "female"]);

    let ids = |body: &Value| -> Vec<Value> {
        body["hostels"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| h["id"].clone())
            .collect()
    };
    assert_eq!(ids(&girls), vec![json!("1"), json!("2")]);
    assert_eq!(ids(&female), ids(&girls));
    assert_eq!(girls["hostels"][0]["relevanceScore"], json!(60));
    assert_eq!(female["hostels"][0]["relevanceScore"], json!(130));
}

#[test]
fn limit_truncates_but_reports_total() {
    let temp = setup_catalog();
    let (ok, body) = run(&temp, &["--store-file", "hostels.json", "-n", "1", "campus"]);
    assert!(ok);
    assert_eq!(body["metadata"]["total_matches"], json!(3));
    assert_eq!(body["metadata"]["returned_results"], json!(1));
}

#[test]
fn blank_query_returns_suggestions_without_reading_store() {
    let temp = TempDir::new().unwrap();
    // The store file does not exist; a blank query must not notice.
    let (ok, body) = run(&temp, &["--store-file", "absent.json", "   "]);
    assert!(ok);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["hostels"], json!([]));
    assert!(!body["suggestions"].as_array().unwrap().is_empty());
}

#[test]
fn store_failure_exits_non_zero_with_failure_reply() {
    let temp = TempDir::new().unwrap();
    let (ok, body) = run(&temp, &["--store-file", "absent.json", "girls"]);
    assert!(!ok);
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].is_string());
    assert!(body.get("error").is_none());

    let (_, body) = run(&temp, &["--dev", "--store-file", "absent.json", "girls"]);
    assert!(body["error"].is_string());
}

#[test]
fn config_file_is_picked_up_from_working_directory() {
    let temp = setup_catalog();
    fs::write(
        temp.path().join("hostel-search.toml"),
        "[store]\nkind = \"file\"\npath = \"hostels.json\"\n\n[search]\ndefault_limit = 1\n",
    )
    .unwrap();

    let (ok, body) = run(&temp, &["campus"]);
    assert!(ok);
    assert_eq!(body["metadata"]["returned_results"], json!(1));
}
