use acfgen_acf::{splice_blocks, write_new_acf, AcfError, AcfPatcher, PatchState};

const TARGET: &str = "\
I
1100 version
ACF

PROPERTIES_BEGIN
P acf/_name Demo
P _body/0/_part_x 0.000000000
P _body/0/_s_dim 4
P acf/_descrip keep me
P _wing/0/_Croot 1.000000000
PROPERTIES_END
";

const BODY: &str = "P _body/0/_part_x 1.500000000\nP _body/0/_s_dim 2\n";
const WING: &str = "P _wing/0/_Croot 3.280839895\n";

#[test]
fn splice_replaces_generated_lines_in_place() {
    let spliced = splice_blocks(TARGET, BODY, WING).unwrap();

    assert_eq!(3, spliced.removed_lines);
    assert_eq!(3, spliced.inserted_lines);
    assert!(spliced.text.contains("P acf/_name Demo"));
    assert!(spliced.text.contains("P acf/_descrip keep me"));
    assert!(spliced.text.contains("P _body/0/_s_dim 2"));
    assert!(!spliced.text.contains("P _body/0/_s_dim 4"));

    // New lines land where the old body block started.
    let name = spliced.text.find("P acf/_name Demo").unwrap();
    let body = spliced.text.find("P _body/0/_part_x").unwrap();
    let kept = spliced.text.find("P acf/_descrip keep me").unwrap();
    assert!(name < body);
    assert!(body < kept);
}

#[test]
fn splice_is_idempotent() {
    let once = splice_blocks(TARGET, BODY, WING).unwrap();
    let twice = splice_blocks(&once.text, BODY, WING).unwrap();
    assert_eq!(once.text, twice.text);
}

#[test]
fn splice_without_existing_blocks_inserts_after_begin() {
    let target = "PROPERTIES_BEGIN\nP acf/_name Bare\nPROPERTIES_END\n";
    let spliced = splice_blocks(target, BODY, WING).unwrap();
    assert_eq!(0, spliced.removed_lines);
    let begin = spliced.text.find("PROPERTIES_BEGIN").unwrap();
    let body = spliced.text.find("P _body/0/_part_x").unwrap();
    let name = spliced.text.find("P acf/_name Bare").unwrap();
    assert!(begin < body);
    assert!(body < name);
}

#[test]
fn missing_markers_are_rejected() {
    assert!(matches!(
        splice_blocks("no markers here\n", BODY, WING),
        Err(AcfError::MissingPropertiesBlock)
    ));
    assert!(matches!(
        splice_blocks("PROPERTIES_END\nPROPERTIES_BEGIN\n", BODY, WING),
        Err(AcfError::MissingPropertiesBlock)
    ));
}

#[test]
fn write_requires_backup_first() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("demo.acf");
    std::fs::write(&target, TARGET).unwrap();

    let mut patcher = AcfPatcher::new(&target);
    assert_eq!(PatchState::Unwritten, patcher.state());
    assert!(matches!(
        patcher.write(BODY, WING),
        Err(AcfError::BackupRequired)
    ));
}

#[test]
fn backup_then_write_then_refuse_second_write() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("demo.acf");
    std::fs::write(&target, TARGET).unwrap();

    let mut patcher = AcfPatcher::new(&target);
    let backup = patcher.back_up().unwrap().to_path_buf();
    assert_eq!(PatchState::BackedUp, patcher.state());
    assert_eq!(TARGET, std::fs::read_to_string(&backup).unwrap());

    let spliced = patcher.write(BODY, WING).unwrap();
    assert_eq!(PatchState::Written, patcher.state());
    assert_eq!(spliced.text, std::fs::read_to_string(&target).unwrap());

    assert!(matches!(
        patcher.write(BODY, WING),
        Err(AcfError::AlreadyWritten)
    ));

    // Two-stage write leaves no temp file behind.
    assert!(!dir.path().join("demo.acf.tmp").exists());
}

#[test]
fn new_acf_carries_name_and_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.acf");

    write_new_acf(&path, "CIS_Demo", BODY, WING).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("P acf/_name CIS_Demo"));
    assert!(text.contains("P _body/0/_s_dim 2"));
    assert!(text.contains("P _wing/0/_Croot 3.280839895"));

    assert!(matches!(
        write_new_acf(&path, "CIS_Demo", BODY, WING),
        Err(AcfError::TargetExists(_))
    ));
}
