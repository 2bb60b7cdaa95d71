#[cfg(test)]
mod tests {
    use crate::errors::DatagenError;
    use crate::generate::{build, load_dex, run, Config};
    use crate::source::Domain;
    use crate::tests::common::{full_fetch, gen1_dex, gen2_dex, MemoryFetch};
    use pretty_assertions::assert_eq;
    use schema::{Dex, Generation};
    use serde_json::Value;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const ARTIFACTS: &[&str] = &[
        "gen1/moves.rs",
        "gen1/species.rs",
        "gen1/types.rs",
        "gen2/items.rs",
        "gen2/moves.rs",
        "gen2/dispatch.rs",
        "gen2/species.rs",
        "gen2/types.rs",
        "ids.json",
        "data.json",
    ];

    fn write_dex(dir: &Path, dex: &Dex) {
        fs::create_dir_all(dir).unwrap();
        let text = ron::ser::to_string_pretty(dex, ron::ser::PrettyConfig::default()).unwrap();
        fs::write(dir.join(format!("{}.ron", dex.generation)), text).unwrap();
    }

    fn write_raw(root: &Path, fetch: &MemoryFetch) {
        use crate::source::Fetch;
        for generation in Generation::ALL {
            for domain in [
                Domain::Moves,
                Domain::Species,
                Domain::Types,
                Domain::Items,
                Domain::Effects,
            ] {
                if let Ok(text) = fetch.fetch(generation, domain) {
                    let dir = root.join(generation.to_string());
                    fs::create_dir_all(&dir).unwrap();
                    fs::write(dir.join(format!("{}.asm", domain.file_stem())), text).unwrap();
                }
            }
        }
    }

    fn setup() -> (TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            raw: dir.path().join("raw"),
            dex: dir.path().join("dex"),
            cache: dir.path().join("cache"),
            out: dir.path().join("out"),
            force: false,
            stubs: None,
        };
        write_dex(&config.dex, &gen1_dex());
        write_dex(&config.dex, &gen2_dex());
        (dir, config)
    }

    fn paths(output: &crate::generate::Output) -> Vec<PathBuf> {
        output.artifacts.iter().map(|a| a.path.clone()).collect()
    }

    #[test]
    fn test_dex_documents_load() {
        // Arrange
        let (_dir, config) = setup();

        // Act
        let dex = load_dex(&config.dex, Generation::Gen2).unwrap();

        // Assert
        assert_eq!(dex, gen2_dex());
    }

    #[test]
    fn test_missing_dex_document() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_dex(dir.path(), Generation::Gen1);
        assert!(matches!(result, Err(DatagenError::MissingSource(_))));
    }

    #[test]
    fn test_build_produces_every_artifact() {
        // Arrange
        let (_dir, config) = setup();
        let fetch = full_fetch();

        // Act
        let output = build(&config, &fetch).unwrap();

        // Assert
        let expected: Vec<PathBuf> = ARTIFACTS.iter().map(PathBuf::from).collect();
        assert_eq!(paths(&output), expected);
        assert_eq!(output.stubs, None);
        assert!(output
            .artifacts
            .iter()
            .filter(|a| a.path.extension().is_some_and(|ext| ext == "rs"))
            .all(|a| a.contents.starts_with(crate::emit::HEADER)));
    }

    #[test]
    fn test_second_build_is_served_from_cache() {
        // Arrange
        let (_dir, config) = setup();
        let fetch = full_fetch();
        let first = build(&config, &fetch).unwrap();
        let calls = fetch.calls();

        // Act
        let second = build(&config, &fetch).unwrap();

        // Assert
        assert_eq!(calls, 7);
        assert_eq!(fetch.calls(), calls);
        assert_eq!(first, second);
    }

    #[test]
    fn test_forced_build_refetches() {
        // Arrange
        let (_dir, mut config) = setup();
        let fetch = full_fetch();
        build(&config, &fetch).unwrap();
        config.force = true;

        // Act
        build(&config, &fetch).unwrap();

        // Assert
        assert_eq!(fetch.calls(), 14);
    }

    #[test]
    fn test_summaries() {
        // Arrange
        let (_dir, config) = setup();
        let output = build(&config, &full_fetch()).unwrap();
        let json = |name: &str| -> Value {
            let artifact = output
                .artifacts
                .iter()
                .find(|a| a.path == Path::new(name))
                .unwrap();
            serde_json::from_str(&artifact.contents).unwrap()
        };

        // Act
        let ids = json("ids.json");
        let data = json("data.json");

        // Assert
        assert_eq!(ids[0]["types"].as_array().unwrap().len(), 15);
        assert!(ids[0].get("items").is_none());
        assert_eq!(ids[1]["types"][9], "???");
        assert_eq!(ids[1]["items"][0], "softsand");
        assert_eq!(ids[1]["items"].as_array().unwrap().len(), 41);

        let gen1_bulbasaur = &data[0]["species"]["Bulbasaur"];
        assert_eq!(gen1_bulbasaur["stats"]["spc"], 65);
        assert!(gen1_bulbasaur["stats"].get("spd").is_none());
        assert!(gen1_bulbasaur.get("gender").is_none());
        assert_eq!(gen1_bulbasaur["types"], serde_json::json!(["Grass", "Poison"]));
        assert_eq!(data[0]["moves"]["Karate Chop"], 35);

        let gen2_bulbasaur = &data[1]["species"]["Bulbasaur"];
        assert_eq!(gen2_bulbasaur["stats"]["spa"], 65);
        assert_eq!(gen2_bulbasaur["stats"]["spd"], 60);
        assert_eq!(gen2_bulbasaur["gender"], 0x1F);
        assert_eq!(data[1]["items"][3], "Pink Bow");
    }

    #[test]
    fn test_stubs_for_requested_generation() {
        // Arrange
        let (_dir, mut config) = setup();
        config.stubs = Some(2);

        // Act
        let output = build(&config, &full_fetch()).unwrap();

        // Assert
        let stubs = output.stubs.unwrap();
        assert!(stubs.starts_with("// Item::BrightPowder\n"));
        assert!(stubs.contains("// Item::{PinkBow,PolkadotBow}\n"));
        assert!(stubs.contains("// Move::DreamEater\n"));
        assert!(stubs.contains("fn test_dream_eater_effect() {"));
    }

    #[test]
    fn test_unsupported_stub_generation() {
        // Arrange
        let (_dir, mut config) = setup();
        config.stubs = Some(3);
        let fetch = full_fetch();

        // Act
        let result = build(&config, &fetch);

        // Assert
        assert!(matches!(result, Err(DatagenError::UnsupportedGeneration(3))));
        assert_eq!(fetch.calls(), 0);
    }

    #[test]
    fn test_run_writes_artifacts_from_raw_listings() {
        // Arrange
        let (_dir, config) = setup();
        write_raw(&config.raw, &full_fetch());

        // Act
        let stubs = run(&config).unwrap();

        // Assert
        assert_eq!(stubs, None);
        for artifact in ARTIFACTS {
            assert!(config.out.join(artifact).is_file(), "{artifact} was not written");
        }
        let cached = fs::read_to_string(config.cache.join("gen2").join("items.txt")).unwrap();
        assert!(cached.starts_with("PokeBall None\n"));
    }

    #[test]
    fn test_integrity_failure_writes_nothing() {
        // Arrange
        let (_dir, config) = setup();
        let mut dex = gen2_dex();
        dex.moves.get_mut("absorb").unwrap().num = 9;
        write_dex(&config.dex, &dex);
        write_raw(&config.raw, &full_fetch());

        // Act
        let result = run(&config);

        // Assert
        let err = result.unwrap_err();
        assert!(err.is_integrity());
        assert!(matches!(err, DatagenError::IndexMismatch { expected: 3, found: 9, .. }));
        assert!(!config.out.exists());
    }

    #[test]
    fn test_missing_listing_aborts_run() {
        // Arrange
        let (_dir, config) = setup();
        let partial = MemoryFetch::new().with(
            Generation::Gen1,
            Domain::Moves,
            crate::tests::common::gen1_moves_listing(),
        );

        // Act
        let result = build(&config, &partial);

        // Assert
        match result {
            Err(err @ DatagenError::MissingSource(_)) => assert!(!err.is_integrity()),
            other => panic!("expected MissingSource, got {other:?}"),
        }
    }
}
