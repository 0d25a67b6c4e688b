//! Packing tests against the text export fixtures.

use cp_formats::load_text;
use cp_ir::{tables, Track};
use cp_pack::tokens::{B_XX, HALT, INST, SFX_DUTY0, SFX_VOL0, VOL0};
use cp_pack::{pack_sfx, pack_song, PackError, Pool, SfxMode};
use pretty_assertions::assert_eq;
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

#[test]
fn first_song_patterns() {
    let mut pool = Pool::new();
    let out = pack_song(&mut pool, &load_fixture("music_00.txt"));
    assert!(out.is_clean(), "{:?}", out.errors);

    let song = out.value;
    assert_eq!(song.title, "Cave Theme");
    assert_eq!(song.order, vec![[0, 2, 3, 4], [1, 2, 3, 4]]);
    assert_eq!(song.new_patterns, vec![0, 1, 2, 3, 4]);

    let bytes: Vec<&[u8]> = pool.patterns().iter().map(|p| p.bytes.as_slice()).collect();
    assert_eq!(
        bytes[0],
        &[VOL0 + 15, INST, 0, 0xA5, 2, 0xA9, 2, 0xAC, 2, HALT, 3][..]
    );
    assert_eq!(bytes[1], &[VOL0 + 15, INST, 0, 0xAE, 13, B_XX, 0, HALT][..]);
    assert_eq!(bytes[2], &[16][..]);
    // Triangle slots 0 and 1 encode identically and share an index.
    assert_eq!(bytes[3], &[INST, 1, 0x99, 2, HALT, 2, 0x99, 2, HALT, 3][..]);
    assert_eq!(
        bytes[4],
        &[VOL0 + 15, INST, 1, 0x85, 2, VOL0 + 8, 0x85, 2, VOL0 + 15, 0x85, 2, VOL0 + 8, 0x85, 3][..]
    );
}

#[test]
fn macros_and_instruments_are_pooled() {
    let mut pool = Pool::new();
    pack_song(&mut pool, &load_fixture("music_00.txt"));

    // Volume 1 is the full-volume seed; the others are new.
    let macros: Vec<String> = pool.macros().iter().map(|m| m.origin.to_string()).collect();
    assert_eq!(
        macros,
        vec![
            "no-op default",
            "volume default",
            "Cave Theme volume 0",
            "Cave Theme pitch 0",
            "Cave Theme duty 0",
        ]
    );
    let instruments: Vec<[u8; 5]> = pool.instruments().iter().map(|i| i.macros).collect();
    assert_eq!(instruments, vec![[2, 0, 3, 0, 4], [1, 0, 0, 0, 0]]);
}

#[test]
fn second_song_shares_pool_entries() {
    let mut pool = Pool::new();
    pack_song(&mut pool, &load_fixture("music_00.txt"));
    let out = pack_song(&mut pool, &load_fixture("music_01.txt"));
    assert!(out.is_clean(), "{:?}", out.errors);

    // The silent pattern from the first song is reused on triangle and noise.
    assert_eq!(out.value.order, vec![[5, 6, 2, 2]]);
    assert_eq!(out.value.new_patterns, vec![5, 6]);
    assert_eq!(pool.macros().len(), 6);
    assert_eq!(pool.instruments()[2].macros, [2, 0, 3, 0, 0]);
    assert_eq!(pool.instruments()[3].macros, [1, 5, 0, 0, 0]);
}

#[test]
fn square_and_noise_effects() {
    let jump = pack_sfx(&load_fixture("sfx_01.txt"));
    assert!(jump.is_clean(), "{:?}", jump.errors);
    assert_eq!(jump.value.mode, SfxMode::Square);
    assert_eq!(
        jump.value.bytes,
        vec![SFX_DUTY0 + 2, SFX_VOL0 + 15, 0xB1, SFX_VOL0 + 12, 0xB5, SFX_VOL0 + 8, 0xB8, HALT]
    );

    let hit = pack_sfx(&load_fixture("sfx_02.txt"));
    assert!(hit.is_clean(), "{:?}", hit.errors);
    assert_eq!(hit.value.mode, SfxMode::Noise);
    assert_eq!(
        hit.value.bytes,
        vec![SFX_DUTY0 + 1, SFX_VOL0 + 15, 0x8D, SFX_VOL0 + 9, 0x89, HALT]
    );
}

#[test]
fn song_as_sfx_reports_speed() {
    let out = pack_sfx(&load_fixture("music_00.txt"));
    assert_eq!(out.errors.first(), Some(&PackError::SfxSpeed { speed: 6 }));
    assert_eq!(out.value.bytes.last(), Some(&HALT));
}

#[test]
fn no_emitted_skip_reaches_128() {
    let mut track = load_fixture("music_00.txt");
    track.pattern_length = 256;
    // Stretch every pattern so long silent runs appear.
    for pattern in &mut track.patterns {
        let mut longer = cp_ir::Pattern::new(256);
        longer.data[..pattern.data.len()].clone_from_slice(&pattern.data);
        *pattern = longer;
    }

    let mut pool = Pool::new();
    let out = pack_song(&mut pool, &track);
    assert!(out
        .errors
        .iter()
        .any(|e| matches!(e, PackError::TooManySkipsAtEnd { .. })));
    // Every pattern ends in a long silent run, written clamped.
    for pattern in pool.patterns() {
        assert_eq!(pattern.bytes.last(), Some(&0x7F));
    }
}

#[test]
fn tables_match_driver_reference_points() {
    let tuning = tables::tuning_table();
    assert_eq!(tuning[tables::A440_INDEX], 253);
    assert_eq!(tables::multiply(15, 15), 15);
}
