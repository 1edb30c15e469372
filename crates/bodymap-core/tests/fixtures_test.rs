use bodymap_core::{
    BodyPart, ConditionIndex, Interaction, InteractionOutcome, format_label, tables,
};
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn fixtures_root() -> PathBuf {
    workspace_root().join("fixtures")
}

fn list_fixture_files(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut out: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .collect();
    out.sort();
    out
}

#[test]
fn every_condition_fixture_parses() {
    let files = list_fixture_files(&fixtures_root().join("conditions"), "json");
    assert!(!files.is_empty(), "no condition fixtures found");
    for path in files {
        let text = std::fs::read_to_string(&path).unwrap();
        let index = ConditionIndex::from_json_str(&text)
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        assert!(!index.is_empty(), "{}", path.display());
    }
}

#[test]
fn every_illustrated_part_has_a_fixture_asset() {
    let dir = fixtures_root().join("body-parts");
    assert!(dir.join(tables::SILHOUETTE_FILE).is_file());
    for part in BodyPart::ALL {
        if let Some(file) = tables::asset_file(part) {
            assert!(dir.join(file).is_file(), "missing asset for {part}: {file}");
        }
    }
}

#[test]
fn first_condition_wins_for_duplicate_parts() {
    let text = std::fs::read_to_string(fixtures_root().join("conditions").join("mixed.json"))
        .unwrap();
    let index = ConditionIndex::from_json_str(&text).unwrap();
    assert_eq!(
        index
            .first_for(BodyPart::Kidneys)
            .map(|c| c.description.as_str()),
        Some("Kidney stones")
    );
    let affected: Vec<BodyPart> = index.affected().collect();
    assert_eq!(
        affected,
        vec![BodyPart::Kidneys, BodyPart::Liver, BodyPart::LeftLeg]
    );
}

#[test]
fn heart_walkthrough_against_interaction_state() {
    let index = ConditionIndex::from_json_str(
        &std::fs::read_to_string(fixtures_root().join("conditions").join("heart.json")).unwrap(),
    )
    .unwrap();
    let mut interaction = Interaction::new(false);

    assert_eq!(
        interaction.pointer_enter(BodyPart::Heart),
        InteractionOutcome::HoverChanged
    );
    assert_eq!(
        interaction.hovered().map(|p| format_label(p.as_str())),
        Some("Heart".to_string())
    );

    interaction.click(BodyPart::Heart);
    let selected = interaction.selected().unwrap();
    assert_eq!(
        index.first_for(selected).map(|c| c.description.as_str()),
        Some("Arrhythmia")
    );

    interaction.click(BodyPart::Heart);
    interaction.pointer_leave();
    assert!(interaction.state().is_idle());
}
