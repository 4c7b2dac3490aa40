use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GENESIS: &str = "\
Gen.1.1
בְּרֵאשִׁ֖ית\tbréshit\tראשית\treshit\tNoun feminine singular\tIn the beginning
בָּרָא\tbara\tברא\tbara\tVerb qal perfect\the created
[1]

Gen.1.2
וְהָאָ֗רֶץ\tvehaarets\tארץ\terets\tNoun Hiphil\tand the earth
ו\tve\tSuffix conj
";

fn write_utf16(path: &Path, text: &str) {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fs::write(path, bytes).unwrap();
}

fn corpus(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, text) in files {
        write_utf16(&dir.path().join(name), text);
    }
    dir
}

#[test]
fn first_run_writes_category_skeleton() {
    let dir = corpus(&[("rip_01.txt", GENESIS)]);

    let mut cmd = cargo_bin_cmd!("morphtab");
    cmd.arg(dir.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No config file found").and(predicate::str::contains(
            "writing config file",
        )));

    let config = fs::read_to_string(dir.path().join("config.txt")).unwrap();
    assert!(config.starts_with("verse: Particle, Verb, Noun"));
    assert!(config.ends_with("other: conj, Hiphil\n"));
    assert!(!dir.path().join("output.csv").exists());
}

#[test]
fn second_run_writes_one_row_per_word() {
    let dir = corpus(&[("rip_01.txt", GENESIS)]);
    cargo_bin_cmd!("morphtab").arg(dir.path()).assert().success();

    cargo_bin_cmd!("morphtab")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("4 row(s) written"));

    let table = fs::read_to_string(dir.path().join("output.csv")).unwrap();
    let mut lines = table.lines();
    assert_eq!(
        lines.next().unwrap(),
        "verse_id,form,transliterated_form,lemma,transliterated_lemma,fts,translation,\
         verse,pos,number,gender,tense,person,binyan,other"
    );
    assert_eq!(lines.clone().count(), 4);
    assert!(lines.any(|l| l == "Gen.1.2,ו,ve,,,\"[Suffix, conj]\",,Suffix,,,,,,,conj"));
}

#[test]
fn curated_categories_become_columns() {
    let dir = corpus(&[("rip_01.txt", GENESIS)]);
    fs::write(
        dir.path().join("config.txt"),
        "class: Noun, Verb\nbinyan: qal, Hiphil\n",
    )
    .unwrap();

    cargo_bin_cmd!("morphtab").arg(dir.path()).assert().success();

    let table = fs::read_to_string(dir.path().join("output.csv")).unwrap();
    let rows: Vec<_> = table.lines().collect();
    assert!(rows[0].ends_with(",translation,class,binyan"));
    assert!(rows[2].ends_with(",he created,Verb,qal"));
    assert!(rows[3].ends_with(",and the earth,Noun,Hiphil"));
}

#[test]
fn input_files_are_read_in_name_order() {
    let dir = corpus(&[
        ("rip_02.txt", "Gen.1.2\nb\tb\tX\n"),
        ("rip_01.txt", "Gen.1.1\na\ta\tX\n"),
        ("notes.txt", "Ignored\tcompletely\n"),
    ]);
    fs::write(dir.path().join("config.txt"), "other: X\n").unwrap();

    cargo_bin_cmd!("morphtab").arg(dir.path()).assert().success();

    let table = fs::read_to_string(dir.path().join("output.csv")).unwrap();
    let ids: Vec<_> = table
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(ids, ["Gen.1.1", "Gen.1.2"]);
}

#[test]
fn dropped_lines_are_reported_but_succeed() {
    let dir = corpus(&[("rip_01.txt", "Gen.1.1\nonly\ttwo\na\tb\tX\n")]);

    cargo_bin_cmd!("morphtab")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Gen.1.1: Invalid line only\ttwo")
                .and(predicate::str::contains("(it has 2 parts)"))
                .and(predicate::str::contains("1 line(s) dropped")),
        );
}

#[test]
fn strict_mode_fails_on_dropped_lines() {
    let dir = corpus(&[("rip_01.txt", "Gen.1.1\nonly\ttwo\n")]);

    cargo_bin_cmd!("morphtab")
        .arg(dir.path())
        .arg("--strict")
        .assert()
        .code(2);
}

#[test]
fn tab_in_verse_header_aborts() {
    let dir = corpus(&[("rip_01.txt", "Gen.1.1\tstray\na\tb\tX\n")]);

    cargo_bin_cmd!("morphtab")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("verse header contains a tab"));
    assert!(!dir.path().join("config.txt").exists());
}

#[test]
fn malformed_category_file_aborts_by_default() {
    let dir = corpus(&[("rip_01.txt", GENESIS)]);
    fs::write(dir.path().join("config.txt"), "pos: noun\nbroken line\n").unwrap();

    cargo_bin_cmd!("morphtab")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected '<category>: <values>'"));
    assert_eq!(
        fs::read_to_string(dir.path().join("config.txt")).unwrap(),
        "pos: noun\nbroken line\n"
    );
}

#[test]
fn malformed_category_file_can_be_regenerated() {
    let dir = corpus(&[("rip_01.txt", GENESIS)]);
    fs::write(dir.path().join("config.txt"), "broken line\n").unwrap();
    let settings = dir.path().join("lenient.toml");
    fs::write(&settings, "[categories]\nregenerate_on_malformed = true\n").unwrap();

    cargo_bin_cmd!("morphtab")
        .arg(dir.path())
        .arg("--settings")
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error reading config file"));
    let config = fs::read_to_string(dir.path().join("config.txt")).unwrap();
    assert!(config.starts_with("verse:"));
}

#[test]
fn directory_settings_rename_output() {
    let dir = corpus(&[("rip_01.txt", GENESIS)]);
    fs::write(dir.path().join("config.txt"), "pos: noun\n").unwrap();
    fs::write(
        dir.path().join("morphtab.toml"),
        "[output]\nfile_name = \"words.csv\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("morphtab").arg(dir.path()).assert().success();
    assert!(dir.path().join("words.csv").exists());
    assert!(!dir.path().join("output.csv").exists());
}

#[test]
fn missing_source_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("morphtab")
        .arg(dir.path().join("absent"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read source directory"));
}
