use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn csv2json() -> Command {
    Command::cargo_bin("csv2json").unwrap()
}

#[test]
fn stdin_to_stdout_with_headers() {
    csv2json()
        .write_stdin("a,b\n1,2\n3,4\n")
        .assert()
        .success()
        .stdout("[{\"a\":\"1\",\"b\":\"2\"},{\"a\":\"3\",\"b\":\"4\"}]\n");
}

#[test]
fn stdin_to_stdout_without_headers() {
    csv2json()
        .args(["-no-headers", "-src", "-"])
        .write_stdin("a,b\n1,2\n")
        .assert()
        .success()
        .stdout("[[\"a\",\"b\"],[\"1\",\"2\"]]\n");
}

#[test]
fn ragged_rows_and_comments() {
    csv2json()
        .write_stdin("#note\na,b,c\n1,2\n")
        .assert()
        .success()
        .stdout("[{\"a\":\"1\",\"b\":\"2\"}]\n");
}

#[test]
fn empty_input_is_an_empty_array() {
    csv2json().write_stdin("").assert().success().stdout("[]\n");
}

#[test]
fn file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("people.csv");
    let dest = dir.path().join("people.json");
    fs::write(&src, "name,age\nann,31\n").unwrap();

    csv2json()
        .arg(format!("-src={}", src.display()))
        .arg("-dest")
        .arg(&dest)
        .assert()
        .success()
        .stdout("");
    assert_eq!(
        fs::read_to_string(&dest).unwrap(),
        "[{\"name\":\"ann\",\"age\":\"31\"}]\n"
    );
}

#[test]
fn missing_source_exits_with_setup_failure() {
    let dir = tempfile::tempdir().unwrap();
    csv2json()
        .arg("-src")
        .arg(dir.path().join("absent.csv"))
        .assert()
        .code(3)
        .stdout("")
        .stderr(predicate::str::starts_with("Initial error"));
}

#[test]
fn bad_destination_exits_with_setup_failure() {
    let dir = tempfile::tempdir().unwrap();
    csv2json()
        .arg("-dest")
        .arg(dir.path().join("no").join("such").join("out.json"))
        .write_stdin("a\n1\n")
        .assert()
        .code(3)
        .stderr(predicate::str::starts_with("Initial error"));
}

#[test]
fn malformed_quoting_exits_with_runtime_failure() {
    for input in ["a,b\n1,x\"y\n", "a,b\n\"1\"x,2\n", "a,b\n\"1,2\n"] {
        for flags in [&[][..], &["-no-headers"][..]] {
            csv2json()
                .args(flags)
                .write_stdin(input)
                .assert()
                .code(1)
                .stdout("")
                .stderr(predicate::str::starts_with("Run time error"));
        }
    }
}

#[test]
fn invalid_utf8_is_replaced() {
    csv2json()
        .arg("-no-headers=true")
        .write_stdin(b"a,\xff\n".to_vec())
        .assert()
        .success()
        .stdout("[[\"a\",\"\u{fffd}\"]]\n");
}

#[test]
fn boolean_flag_accepts_false() {
    csv2json()
        .arg("-no-headers=false")
        .write_stdin("a,b\n1,2\n")
        .assert()
        .success()
        .stdout("[{\"a\":\"1\",\"b\":\"2\"}]\n");
}

#[test]
fn pretty_print_flag() {
    csv2json()
        .arg("--pretty-print")
        .write_stdin("a\n1\n")
        .assert()
        .success()
        .stdout("[\n  {\n    \"a\": \"1\"\n  }\n]\n");
}
