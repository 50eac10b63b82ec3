//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn truthcheck() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("truthcheck").unwrap()
}

/// Isolate the binary from any real config or cached answer on the machine.
fn isolated(dir: &TempDir) -> Command {
    let mut cmd = truthcheck();
    cmd.current_dir(dir.path()).env("HOME", dir.path());
    cmd
}

#[test]
fn help_output() {
    truthcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("true-or-fake news quiz"));
}

#[test]
fn version_output() {
    truthcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("truthcheck"));
}

#[test]
fn invalid_since_is_rejected_before_any_request() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["export-answers", "--since", "not-a-timestamp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --since"));
}

#[test]
fn upload_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["upload-questions", "--file", "no_such.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn upload_malformed_csv_fails_before_any_request() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.csv");
    std::fs::write(&file, "x,group,fake,\"Claim text\"\n").unwrap();

    isolated(&dir)
        .args(["upload-questions", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to upload"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn export_answers_end_to_end() {
    let server = MockServer::start().await;
    let body = "2024-05-01T10:00:00Z,s1,US,left,30,\"\",\"1\"\n";
    Mock::given(method("GET"))
        .and(path("/admin/answers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["export-answers", "--server"])
        .arg(server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 1 answers"));

    let saved = std::fs::read_to_string(dir.path().join("answers.csv")).unwrap();
    assert_eq!(
        saved,
        format!("created,seed,country,side,age,answeredFake,answeredReal\n{body}")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn export_questions_end_to_end() {
    let server = MockServer::start().await;
    let html = r#"<table><tbody>
        <tr><td>1</td><td>c1</td><td>f1</td><td>Is sky blue?</td></tr>
        <tr><td>2</td><td>c2</td><td>real</td><td>Grass is green.</td></tr>
    </tbody></table>"#;
    Mock::given(method("GET"))
        .and(path("/admin/management"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["export-questions", "--server"])
        .arg(server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 2 questions"));

    let saved = std::fs::read_to_string(dir.path().join("questions.csv")).unwrap();
    assert_eq!(
        saved,
        "ID,claims,fake,question\n1,c1,f1,\"Is sky blue?\"\n2,c2,real,\"Grass is green.\"\n"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn take_end_to_end() {
    let server = MockServer::start().await;
    let quiz_html = r#"<div id="quiz" data-seed="8844" data-count="1">
        <div id="page0" data-id="17">The moon is made of cheese.</div>
    </div>"#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(quiz_html))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("seed=8844"))
        .and(body_string_contains("fake=17"))
        .and(body_string_contains("country=United+States"))
        .and(body_string_contains("age=30"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["take", "--server"])
        .arg(server.uri())
        .write_stdin("\nfake\nyes\nleft\n30\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Results submitted."));

    // The submitted answer is cached for the next visit's pre-fill.
    let cached = dir.path().join(".config/truthcheck/answer.json");
    let cached = std::fs::read_to_string(cached).unwrap();
    assert!(cached.contains("\"seed\":\"8844\""));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upload_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/questions"))
        .and(body_string_contains("name=\"file\""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/management"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<table><tbody><tr><td>1</td><td>c1</td><td>fake</td><td>Claim</td></tr></tbody></table>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("questions.csv");
    std::fs::write(
        &file,
        "ID,claims,fake,question\n1,c1,fake,\"Claim one\"\n2,c2,real,\"Claim two\"\n",
    )
    .unwrap();

    isolated(&dir)
        .args(["upload-questions", "--server"])
        .arg(server.uri())
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Uploaded 2 questions."));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upload_rejection_shows_the_banner() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/questions"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("questions.csv");
    std::fs::write(&file, "1,c1,fake,\"Claim one\"\n").unwrap();

    isolated(&dir)
        .args(["upload-questions", "--server"])
        .arg(server.uri())
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to upload questions. Please reload or try again later.",
        ));
}
