//! Integration tests for the lss CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to get an lss command isolated from the user's config and env
fn lss(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lss").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .env_remove("LSS_SITE_URL")
        .env_remove("LSS_SETTINGS")
        .env_remove("LSS_RESERVATIONS")
        .env_remove("LSS_LOG");
    cmd
}

/// Helper to create a test project in a temp directory
fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    lss(tmp.path()).arg("init").assert().success();
    tmp
}

fn write_settings(tmp: &TempDir, content: &str) {
    fs::write(tmp.path().join("lss-settings.yaml"), content).unwrap();
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).unwrap()
}

/// Helper to add a complete restaurant location
fn add_restaurant(tmp: &TempDir, id: &str, name: &str) {
    lss(tmp.path())
        .args([
            "location", "add", "--no-edit",
            "--id", id,
            "--name", name,
            "--type", "Restaurant",
            "--street", "1 Main St",
            "--city", "Springfield",
            "--region", "IL",
            "--postal-code", "62701",
            "--country", "US",
            "--latitude", "39.78",
            "--longitude", "-89.65",
            "--hours", "Mo=11:00-14:00,17:00-22:00",
            "--hours", "Tu=11:00-14:00",
            "--hours", "Su=closed",
            "--cuisine", "Thai, Lao",
            "--reservations", "yes",
        ])
        .assert()
        .success();
}

const CORNER_SHOP: &str = r#"
local_seo_schema_locations:
  loc_shop:
    name: Corner Shop
    type: Store
    address_street: 1 Main St
    address_locality: Springfield
    address_region: IL
    address_postalcode: "62701"
    address_country: US
    opening_hours:
      Mo: 09:00-17:00
      Tu: 09:00-17:00
      Sa: closed
"#;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    lss(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("location"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    lss(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lss"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    lss(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lss"));
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_creates_project() {
    let tmp = setup_test_project();
    assert!(tmp.path().join(".lss/config.yaml").exists());
    assert!(tmp.path().join("lss-settings.yaml").exists());
}

#[test]
fn test_init_twice_warns() {
    let tmp = setup_test_project();
    lss(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

// ============================================================================
// Render Tests
// ============================================================================

#[test]
fn test_render_empty_project_prints_nothing() {
    let tmp = setup_test_project();
    lss(tmp.path())
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_render_without_settings_file_prints_nothing() {
    let tmp = TempDir::new().unwrap();
    lss(tmp.path())
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_render_exact_output() {
    let tmp = setup_test_project();
    write_settings(&tmp, CORNER_SHOP);

    let stdout = stdout_of(lss(tmp.path()).args(["render", "--site-url", "https://example.com"]));
    insta::assert_snapshot!(stdout.trim_end(), @r#"
    <script type="application/ld+json">{
        "@context": "https://schema.org",
        "@type": "Store",
        "name": "Corner Shop",
        "address": {
            "@type": "PostalAddress",
            "streetAddress": "1 Main St",
            "addressLocality": "Springfield",
            "addressRegion": "IL",
            "postalCode": "62701",
            "addressCountry": "US"
        },
        "url": "https://example.com",
        "openingHoursSpecification": [
            {
                "@type": "OpeningHoursSpecification",
                "dayOfWeek": [
                    "https://schema.org/Monday",
                    "https://schema.org/Tuesday"
                ],
                "opens": "09:00",
                "closes": "17:00"
            },
            {
                "@type": "OpeningHoursSpecification",
                "dayOfWeek": [
                    "https://schema.org/Saturday"
                ],
                "opens": "00:00",
                "closes": "00:00"
            }
        ]
    }</script>
    "#);
}

#[test]
fn test_render_food_location() {
    let tmp = setup_test_project();
    add_restaurant(&tmp, "loc_noodles", "Noodle Bar");

    lss(tmp.path())
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<script type=\"application/ld+json\">"))
        .stdout(predicate::str::contains("\"@type\": \"Restaurant\""))
        .stdout(predicate::str::contains("\"latitude\": 39.78"))
        .stdout(predicate::str::contains("\"acceptsReservations\": true"))
        .stdout(predicate::str::contains("\"Thai\""))
        .stdout(predicate::str::contains("\"opens\": \"17:00\""))
        .stdout(predicate::str::contains("\\/").not());
}

#[test]
fn test_render_legacy_reservations() {
    let tmp = setup_test_project();
    add_restaurant(&tmp, "loc_noodles", "Noodle Bar");

    lss(tmp.path())
        .args(["render", "--legacy-reservations"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"acceptsReservations\": \"True\""));
}

#[test]
fn test_render_reservation_style_from_env() {
    let tmp = setup_test_project();
    add_restaurant(&tmp, "loc_noodles", "Noodle Bar");

    lss(tmp.path())
        .env("LSS_RESERVATIONS", "legacy")
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"acceptsReservations\": \"True\""));
}

#[test]
fn test_render_site_url_from_project_config() {
    let tmp = setup_test_project();
    write_settings(&tmp, CORNER_SHOP);
    fs::write(
        tmp.path().join(".lss/config.yaml"),
        "site_url: https://shop.example\n",
    )
    .unwrap();

    lss(tmp.path())
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"url\": \"https://shop.example\""));
}

#[test]
fn test_render_unicode_unescaped() {
    let tmp = setup_test_project();
    write_settings(&tmp, &CORNER_SHOP.replace("Corner Shop", "Café Zoë"));

    lss(tmp.path())
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Café Zoë\""));
}

#[test]
fn test_render_skips_ineligible_locations() {
    let tmp = setup_test_project();
    write_settings(
        &tmp,
        &format!("{}  loc_partial:\n    name: No Address\n", CORNER_SHOP),
    );

    let stdout = stdout_of(lss(tmp.path()).arg("render"));
    assert_eq!(stdout.matches("<script").count(), 1);
    assert!(!stdout.contains("No Address"));
}

#[test]
fn test_render_json_array() {
    let tmp = setup_test_project();
    write_settings(&tmp, CORNER_SHOP);

    let stdout = stdout_of(lss(tmp.path()).args(["render", "--json"]));
    let docs: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(docs.as_array().map(Vec::len), Some(1));
    assert_eq!(docs[0]["name"], "Corner Shop");
}

#[test]
fn test_render_digest_is_stable() {
    let tmp = setup_test_project();
    write_settings(&tmp, CORNER_SHOP);

    let first = stdout_of(lss(tmp.path()).args(["render", "--digest"]));
    let second = stdout_of(lss(tmp.path()).args(["render", "--digest"]));
    assert_eq!(first, second);
    assert_eq!(first.trim().len(), 64);
    assert!(first.trim().chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_render_json_settings_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("site.json"),
        r#"{"local_seo_schema_locations": {"loc_1": {
            "name": "JSON Shop", "address_street": "2 Side St",
            "address_locality": "Salem", "address_region": "OR",
            "address_postalcode": "97301", "address_country": "US",
            "url": "https://json.example/shop"}}}"#,
    )
    .unwrap();

    lss(tmp.path())
        .args(["render", "--settings", "site.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"url\": \"https://json.example/shop\""))
        .stdout(predicate::str::contains("\"@type\": \"LocalBusiness\""));
}

#[test]
fn test_render_syntax_error_fails() {
    let tmp = setup_test_project();
    write_settings(&tmp, "local_seo_schema_locations: [unclosed\n");

    lss(tmp.path())
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("syntax error"));
}

// ============================================================================
// Validate Tests
// ============================================================================

#[test]
fn test_validate_clean_settings() {
    let tmp = setup_test_project();
    write_settings(&tmp, CORNER_SHOP);

    lss(tmp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("passed validation"));
}

#[test]
fn test_validate_reports_unknown_field() {
    let tmp = setup_test_project();
    write_settings(&tmp, &format!("{}    fax: 555-1234\n", CORNER_SHOP));

    lss(tmp.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("settings schema - 1 error(s)"));
}

#[test]
fn test_validate_warns_on_skipped_location_and_bad_hours() {
    let tmp = setup_test_project();
    write_settings(
        &tmp,
        &format!(
            "{}      We: 9am-5pm\n  loc_partial:\n    name: No Address\n",
            CORNER_SHOP
        ),
    );

    lss(tmp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped, missing: address_street"))
        .stdout(predicate::str::contains("Wednesday hours '9am-5pm' ignored"));

    lss(tmp.path())
        .args(["validate", "--strict"])
        .assert()
        .failure();
}

#[test]
fn test_validate_flags_out_of_range_output() {
    let tmp = setup_test_project();
    write_settings(&tmp, &format!("{}    latitude: 139.5\n    longitude: 10\n", CORNER_SHOP));

    lss(tmp.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("/geo/latitude"));
}

// ============================================================================
// Location Tests
// ============================================================================

#[test]
fn test_location_add_list_show_remove() {
    let tmp = setup_test_project();
    add_restaurant(&tmp, "loc_noodles", "Noodle Bar");
    add_restaurant(&tmp, "loc_dumplings", "Dumpling House");

    let ids = stdout_of(lss(tmp.path()).args(["location", "list", "--ids"]));
    assert_eq!(ids, "loc_noodles\nloc_dumplings\n");

    lss(tmp.path())
        .args(["location", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Noodle Bar"))
        .stdout(predicate::str::contains("3/7"))
        .stdout(predicate::str::contains("2 location(s) found"));

    lss(tmp.path())
        .args(["location", "show", "loc_dumplings"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"name\": \"Dumpling House\""));

    lss(tmp.path())
        .args(["location", "remove", "loc_noodles", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed location loc_noodles"));

    let ids = stdout_of(lss(tmp.path()).args(["location", "list", "--ids"]));
    assert_eq!(ids, "loc_dumplings\n");
}

#[test]
fn test_location_add_generates_id() {
    let tmp = setup_test_project();
    let stdout = stdout_of(lss(tmp.path()).args([
        "-q", "location", "add", "--no-edit", "--name", "Generated",
    ]));
    let id = stdout.trim();
    assert!(id.starts_with("loc_"), "unexpected id {}", id);
    assert_eq!(id.len(), 30);
}

#[test]
fn test_location_add_sanitizes_input() {
    let tmp = setup_test_project();
    lss(tmp.path())
        .args([
            "location", "add", "--no-edit",
            "--id", "Main Street!",
            "--name", "<b>Bold</b> Shop",
            "--url", "javascript:alert(1)",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("mainstreet"))
        .stdout(predicate::str::contains("not rendered until these are set"));

    let raw = fs::read_to_string(tmp.path().join("lss-settings.yaml")).unwrap();
    assert!(raw.contains("mainstreet"));
    assert!(raw.contains("name: Bold Shop"));
    assert!(!raw.contains("javascript"));
}

#[test]
fn test_location_add_duplicate_id_fails() {
    let tmp = setup_test_project();
    add_restaurant(&tmp, "loc_noodles", "Noodle Bar");

    lss(tmp.path())
        .args(["location", "add", "--no-edit", "--id", "loc_noodles", "--name", "Again"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_location_add_rejects_bad_day() {
    let tmp = setup_test_project();
    lss(tmp.path())
        .args(["location", "add", "--no-edit", "--name", "Shop", "--hours", "Monday=09:00-17:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown day"));
}

#[test]
fn test_location_show_unknown_fails() {
    let tmp = setup_test_project();
    lss(tmp.path())
        .args(["location", "show", "loc_missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No location found"));
}

#[test]
fn test_location_show_ineligible_fails() {
    let tmp = setup_test_project();
    write_settings(&tmp, "local_seo_schema_locations:\n  loc_partial:\n    name: Partial\n");

    lss(tmp.path())
        .args(["location", "show", "loc_partial"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required fields"));

    lss(tmp.path())
        .args(["location", "show", "loc_partial", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name: Partial"));
}

#[test]
fn test_location_list_empty() {
    let tmp = setup_test_project();
    lss(tmp.path())
        .args(["location", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No locations found"));
}

// ============================================================================
// Types Tests
// ============================================================================

#[test]
fn test_types_lists_catalog() {
    let tmp = TempDir::new().unwrap();
    lss(tmp.path())
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("Automotive"))
        .stdout(predicate::str::contains("AutoRepair"))
        .stdout(predicate::str::contains("Restaurant"));
}

#[test]
fn test_types_food_only() {
    let tmp = TempDir::new().unwrap();
    let stdout = stdout_of(lss(tmp.path()).args(["-q", "types", "--food"]));
    let types: Vec<&str> = stdout.lines().collect();
    assert_eq!(types.len(), 10);
    assert!(types.contains(&"Winery"));
    assert!(!types.contains(&"AutoRepair"));
}
