//! Importer tests against the text export fixtures.

use cp_formats::load_text;
use cp_ir::{summarize, Channel, MacroKind, Note, Track};
use std::fs;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures/ftm")
}

fn load_fixture(name: &str) -> Track {
    let path = fixtures_dir().join(name);
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    let loaded = load_text(&text, 1);
    assert!(loaded.is_clean(), "{}: {:?}", name, loaded.errors);
    loaded.value
}

fn assert_track_invariants(track: &Track) {
    assert_eq!(track.tempo, 150);
    for (i, pattern) in track.patterns.iter().enumerate() {
        assert_eq!(pattern.rows, track.pattern_length, "Pattern {} rows", i);
    }
    for frame in &track.order {
        for channel in Channel::ALL {
            let slot = frame[channel.index()] as usize;
            assert!(slot < track.patterns.len().max(1), "Frame slot {} missing", slot);
        }
    }
}

#[test]
fn all_fixtures_import_cleanly() {
    for name in ["music_00.txt", "music_01.txt", "sfx_01.txt", "sfx_02.txt"] {
        let track = load_fixture(name);
        assert_track_invariants(&track);
    }
}

#[test]
fn song_fixture_contents() {
    let track = load_fixture("music_00.txt");
    assert_eq!(track.title, "Cave Theme");
    assert_eq!(track.speed, 6);
    assert_eq!(track.pattern_length, 16);
    assert_eq!(track.order, vec![[0, 0, 0, 0, 0], [1, 0, 1, 0, 0]]);
    assert_eq!(track.macros(MacroKind::Volume).len(), 2);
    assert_eq!(track.instruments.len(), 2);
    assert_eq!(track.instruments[1].name, "flat");
    assert_eq!(track.cell(Channel::Noise, 0, 4).note, Note::Noise(4));
    assert_eq!(track.cell(Channel::Noise, 0, 4).volume, Some(8));

    let summary = summarize(&track);
    assert_eq!(summary.notes[Channel::Pulse1.index()], 4);
    assert!(summary.has_halt);
    assert!(summary.effects.contains(&'B'));
}

#[test]
fn title_keeps_punctuation() {
    let track = load_fixture("music_01.txt");
    assert_eq!(track.title, "boss fight!");
    assert_eq!(track.speed, 4);
}

#[test]
fn sfx_fixtures_run_at_speed_one() {
    for name in ["sfx_01.txt", "sfx_02.txt"] {
        assert_eq!(load_fixture(name).speed, 1, "{}", name);
    }
}
