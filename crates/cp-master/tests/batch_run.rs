//! End-to-end batch runs over the text export fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use cp_master::{write_artifacts, Batch, Config, FamiTracker, ENUMS_ASM, MUSIC_ASM, STATS_FILE};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures/ftm")
}

/// Lay out dummy modules and their pre-made text exports.
fn project() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("music");
    let output = dir.path().join("output");
    fs::create_dir_all(&input).unwrap();
    fs::create_dir_all(&output).unwrap();
    for stem in ["music_00", "music_01", "sfx_01", "sfx_02"] {
        fs::write(input.join(format!("{}.ftm", stem)), b"FamiTracker Module").unwrap();
        fs::copy(
            fixtures_dir().join(format!("{}.txt", stem)),
            output.join(format!("{}.txt", stem)),
        )
        .unwrap();
    }

    let mut config = Config::default();
    config.input.dir = input;
    config.output.dir = output;
    config.export.skip = true;
    (dir, config)
}

fn run(config: &Config) -> cp_master::PackedSet {
    let mut batch = Batch::new();
    batch
        .run(config, &FamiTracker::new("never-called"))
        .unwrap();
    batch.finish()
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn songs_then_effects() {
    let (_dir, config) = project();
    let set = run(&config);

    let idents: Vec<&str> = set.songs.iter().map(|s| s.ident.as_str()).collect();
    assert_eq!(idents, vec!["CAVE_THEME", "BOSS_FIGHT_"]);
    assert_eq!(set.sfx_idents, vec!["NONE", "JUMP", "HIT"]);
    assert_eq!(set.tables.patterns.len(), 7);
    assert_eq!(set.tables.macros.len(), 6);
}

#[test]
fn artifacts_are_written() {
    let (_dir, config) = project();
    let set = run(&config);
    let out = &config.output.dir;
    let written = write_artifacts(&set, out, &config.output.segment).unwrap();
    assert_eq!(written.len(), 3);

    let asm = read(out, MUSIC_ASM);
    assert!(asm.starts_with("; automatically generated by chippack\n"));
    assert!(asm.contains("MUSIC_COUNT = 2\nSFX_COUNT = 3\nMACRO_COUNT = 6\n"));
    assert!(asm.contains("LOOP = -128\nHALT = $80\n"));
    assert!(asm.contains("SDT3 = $F3\n"));
    assert!(asm.contains(".segment \"DATA\"\n"));
    assert!(asm.contains("data_macro_02: ; Cave Theme volume 0\n.byte 12, 10, 8, 6, LOOP, 3\n"));
    assert!(asm.contains(".byte $02, $00, $03, $04 ; 00 Cave Theme: pluck\n"));
    assert!(asm.contains("data_music_speed:\n.byte 6, 4\n"));
    assert!(asm.contains(
        "data_order_00: ; CAVE_THEME\n.byte $00, $02, $03, $04 ; 00\n.byte $01, $02, $03, $04 ; 01\n"
    ));
    assert!(asm.contains(
        "data_pattern_00: ; Cave Theme pulse 1 00\n.byte VOLF, INST, $00, $A5, $02, $A9, $02, $AC, $02, HALT, $03\n"
    ));
    assert!(asm.contains("data_pattern_01: ; Cave Theme pulse 1 01\n.byte VOLF, INST, $00, $AE, $0D, B_XX, $00, HALT\n"));
    assert!(asm.contains("data_sfx_00: ; NONE\n.byte SHLT\n"));
    assert!(asm.contains("data_sfx_01: ; JUMP\n.byte SDT2, SVLF, $B1, SVLC, $B5, SVL8, $B8, SHLT\n"));
    assert!(asm.contains("data_sfx_high:\n.byte >data_sfx_00\n.byte >data_sfx_01\n.byte >data_sfx_02\n"));
    assert!(asm.contains("data_music_multiply:\n.byte $0, $0, $0"));
    assert!(asm.ends_with("; end of file\n"));
    assert!(!asm.contains(",\n"), "trailing comma in music data");

    let enums = read(out, ENUMS_ASM);
    assert!(enums.contains(".enum\nMUSIC_CAVE_THEME = 0\nMUSIC_BOSS_FIGHT_ = 1\n.endenum\n"));
    assert!(enums.contains(".enum\nSOUND_NONE = 0\nSOUND_JUMP = 1\nSOUND_HIT = 2\n.endenum\n"));
    assert!(enums.contains("SOUND_MODE__0 = 0\nSOUND_MODE__1 = 0\nSOUND_MODE__2 = 1\n"));

    let stats = read(out, STATS_FILE);
    assert!(stats.starts_with("Macro count: 6\nInstrument count: 4\n"));
    assert!(stats.contains("SFX  0:              4 bytes (NONE)\n"));
    assert!(stats.contains("\n\nReported errors:\nTitle warnings for: "));
    assert!(stats.contains("title \"boss fight!\" renamed to BOSS_FIGHT_"));
}

#[test]
fn output_is_reproducible() {
    let (_dir, config) = project();
    let first = config.output.dir.join("first");
    let second = config.output.dir.join("second");
    write_artifacts(&run(&config), &first, "DATA").unwrap();
    write_artifacts(&run(&config), &second, "DATA").unwrap();

    for name in [MUSIC_ASM, ENUMS_ASM, STATS_FILE] {
        assert_eq!(read(&first, name), read(&second, name), "{}", name);
    }
}

#[test]
fn unreadable_export_is_logged_and_skipped() {
    let (_dir, config) = project();
    let missing = config.output.dir.join("music_00.txt");
    fs::remove_file(&missing).unwrap();
    let set = run(&config);

    let idents: Vec<&str> = set.songs.iter().map(|s| s.ident.as_str()).collect();
    assert_eq!(idents, vec!["BOSS_FIGHT_"]);
    assert_eq!(set.sfx_idents, vec!["NONE", "JUMP", "HIT"]);

    let section = &set.log.sections()[0];
    assert_eq!(section.heading, "Load errors for");
    assert_eq!(section.source, missing.display().to_string());
    assert!(section.lines[0].starts_with("failed to read text export: "));

    let out = &config.output.dir;
    let written = write_artifacts(&set, out, &config.output.segment).unwrap();
    assert_eq!(written.len(), 3);
    assert!(read(out, MUSIC_ASM).contains("MUSIC_COUNT = 1\nSFX_COUNT = 3\n"));
    assert!(read(out, STATS_FILE).contains(&format!("Load errors for: {}\n", missing.display())));
}

#[test]
fn unwritable_output_dir_is_a_hard_error() {
    let (dir, mut config) = project();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();
    config.output.dir = blocker.join("output");
    let mut batch = Batch::new();
    let result = batch.run(&config, &FamiTracker::new("never-called"));
    assert!(matches!(result, Err(cp_master::BatchError::Write { .. })));
}
