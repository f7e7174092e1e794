#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `shortcuts.vdf` documents laid out the way Steam
//! writes them: numeric container keys, mixed-case field names and a
//! populated `tags` collection.

use nonsteam_formats::BinaryFormat;
use nonsteam_formats::shortcuts::{ShortcutFields, ShortcutStore, ShortcutsError, UpsertOutcome};
use nonsteam_formats::vdf::{VdfDocument, VdfError, VdfObject, VdfValue};
use pretty_assertions::assert_eq;

fn string(out: &mut Vec<u8>, key: &str, value: &str) {
    out.push(0x01);
    out.extend_from_slice(key.as_bytes());
    out.push(0);
    out.extend_from_slice(value.as_bytes());
    out.push(0);
}

fn int(out: &mut Vec<u8>, key: &str, value: i32) {
    out.push(0x02);
    out.extend_from_slice(key.as_bytes());
    out.push(0);
    out.extend_from_slice(&value.to_le_bytes());
}

fn open(out: &mut Vec<u8>, key: &str) {
    out.push(0x00);
    out.extend_from_slice(key.as_bytes());
    out.push(0);
}

fn close(out: &mut Vec<u8>) {
    out.push(0x08);
}

/// Two shortcuts, as found in a user's `config/shortcuts.vdf`
fn steam_file() -> Vec<u8> {
    let mut out = Vec::new();
    open(&mut out, "shortcuts");

    open(&mut out, "0");
    int(&mut out, "appid", -1_234_567);
    string(&mut out, "AppName", "Super Metroid");
    string(&mut out, "Exe", "\"/usr/bin/retroarch\"");
    string(&mut out, "StartDir", "\"/usr/bin\"");
    string(&mut out, "icon", "");
    string(&mut out, "LaunchOptions", "-L snes9x metroid.sfc");
    int(&mut out, "IsHidden", 0);
    int(&mut out, "LastPlayTime", 1_690_000_000);
    open(&mut out, "tags");
    string(&mut out, "0", "favorite");
    string(&mut out, "1", "Retro");
    close(&mut out);
    close(&mut out);

    open(&mut out, "1");
    string(&mut out, "AppName", "Foo");
    string(&mut out, "Exe", "\"C:\\Games\\Foo\\foo.exe\"");
    string(&mut out, "StartDir", "\"C:\\Games\\Foo\\\"");
    string(&mut out, "icon", "");
    string(&mut out, "LaunchOptions", "");
    int(&mut out, "IsHidden", 1);
    open(&mut out, "tags");
    close(&mut out);
    close(&mut out);

    close(&mut out);
    close(&mut out);
    out
}

#[test]
fn parse_steam_written_file() {
    let store = ShortcutStore::parse(&steam_file()).expect("parse");

    assert_eq!(store.names().collect::<Vec<_>>(), vec!["Super Metroid", "Foo"]);

    let metroid = store.get("Super Metroid").unwrap();
    assert_eq!(metroid.exe(), Some("\"/usr/bin/retroarch\""));
    assert_eq!(metroid.launch_options(), Some("-L snes9x metroid.sfc"));
    assert_eq!(metroid.last_play_time(), Some(1_690_000_000));
    assert_eq!(metroid.get("appid"), Some(&VdfValue::Int32(-1_234_567)));
    assert_eq!(metroid.tags().unwrap().get_str("1"), Some("Retro"));
    assert!(!metroid.is_hidden());

    assert!(store.get("Foo").unwrap().is_hidden());
}

#[test]
fn launch_urls_for_parsed_shortcuts() {
    let store = ShortcutStore::parse(&steam_file()).unwrap();

    assert_eq!(
        store.get("Super Metroid").unwrap().launch_url().unwrap(),
        "steam://rungameid/11776042306887483392"
    );
    assert_eq!(
        store.get("Foo").unwrap().launch_url().unwrap(),
        "steam://rungameid/17616083409988222976"
    );
}

#[test]
fn upsert_existing_preserves_user_state() {
    let mut store = ShortcutStore::parse(&steam_file()).unwrap();
    let fields = ShortcutFields::new(
        "Super Metroid",
        "\"/usr/local/bin/retroarch\"",
        "\"/usr/local/bin\"",
        "-L snes9x metroid.sfc",
        "",
    );

    let (outcome, updated) = store.upsert("Super Metroid", fields);
    assert_eq!(outcome, UpsertOutcome::Updated);
    assert_eq!(updated.exe(), Some("\"/usr/local/bin/retroarch\""));
    assert_eq!(updated.last_play_time(), Some(1_690_000_000));
    assert_eq!(updated.tags().unwrap().len(), 2);
    assert!(updated.get("allowoverlay").is_none());

    let reparsed = ShortcutStore::parse(&store.build().unwrap()).unwrap();
    assert_eq!(reparsed, store);
}

#[test]
fn upsert_new_then_save() {
    let mut store = ShortcutStore::parse(&steam_file()).unwrap();
    let (outcome, _) = store.upsert(
        "Bar",
        ShortcutFields::new("Bar", "\"/opt/bar/bar\"", "\"/opt/bar\"", "", ""),
    );
    assert_eq!(outcome, UpsertOutcome::Created);

    let document = VdfDocument::parse(&store.build().unwrap()).unwrap();
    let container = document.get("shortcuts").and_then(VdfValue::as_object).unwrap();
    assert_eq!(
        container.keys().collect::<Vec<_>>(),
        vec!["0", "1", "2"]
    );
    let bar = container.get_object("2").unwrap();
    assert_eq!(bar.get_str("appname"), Some("Bar"));
    assert_eq!(bar.get_i32("allowdesktopconfig"), Some(1));
    assert_eq!(bar.get_object("tags"), Some(&VdfObject::new()));
}

#[test]
fn names_differing_only_in_case_kept_apart() {
    let mut store = ShortcutStore::parse(&steam_file()).unwrap();
    store.upsert("FOO", ShortcutFields::new("FOO", "\"/opt/foo2/foo\"", "", "", ""));
    assert_eq!(store.len(), 3);

    let reparsed = ShortcutStore::parse(&store.build().unwrap()).unwrap();
    assert_eq!(reparsed.names().collect::<Vec<_>>(), vec!["Super Metroid", "Foo", "FOO"]);
    assert!(reparsed.get("Foo").unwrap().is_hidden());
    assert!(!reparsed.get("FOO").unwrap().is_hidden());
    assert_ne!(
        reparsed.get("Foo").unwrap().launch_url().unwrap(),
        reparsed.get("FOO").unwrap().launch_url().unwrap()
    );
}

#[test]
fn rebuilt_store_round_trips_byte_exact() {
    let store = ShortcutStore::parse(&steam_file()).unwrap();
    let data = store.build().unwrap();

    ShortcutStore::verify_round_trip(&data).unwrap();
}

#[test]
fn every_truncation_is_malformed() {
    let data = steam_file();
    for len in 0..data.len() {
        match ShortcutStore::parse(&data[..len]) {
            Err(err) => assert!(err.is_malformed(), "prefix {len}: {err}"),
            Ok(_) => panic!("prefix of {len} bytes parsed"),
        }
    }
}

#[test]
fn trailing_garbage_rejected() {
    let mut data = steam_file();
    data.push(0x08);
    let err = ShortcutStore::parse(&data).unwrap_err();
    assert!(matches!(
        err,
        ShortcutsError::Vdf(VdfError::TrailingData { .. })
    ));
}

#[test]
fn duplicate_names_across_container_keys() {
    let mut data = Vec::new();
    open(&mut data, "shortcuts");
    for key in ["0", "1"] {
        open(&mut data, key);
        string(&mut data, "appname", "Twin");
        string(&mut data, "exe", "\"twin\"");
        close(&mut data);
    }
    close(&mut data);
    close(&mut data);

    let err = ShortcutStore::parse(&data).unwrap_err();
    assert!(matches!(err, ShortcutsError::DuplicateAppName(ref name) if name == "Twin"));
}
