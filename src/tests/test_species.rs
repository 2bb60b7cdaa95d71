#[cfg(test)]
mod tests {
    use crate::errors::{DatagenError, DatagenResult};
    use crate::registry::{Registry, GEN1, GEN2};
    use crate::source::parse_lines;
    use crate::species::{self, gender_byte, match_species_line, SpeciesEntry, SpeciesTable};
    use crate::tests::common::{
        dex_species, gen1_dex, gen1_species_listing, gen2_dex, gen2_species_listing,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Dex, Gender, TypeName};

    fn entries(registry: &Registry, dex: &Dex, text: &str) -> Vec<SpeciesEntry> {
        parse_lines(text, |line, _, accepted| {
            match_species_line(registry, dex, line, accepted)
        })
        .collect::<DatagenResult<_>>()
        .unwrap()
    }

    fn table(registry: &Registry, dex: &Dex, text: &str) -> SpeciesTable {
        species::build(registry, dex, &entries(registry, dex, text)).unwrap()
    }

    #[test]
    fn test_dex_constants() {
        // Arrange
        let dex = gen1_dex();

        // Act
        let entries = entries(&GEN1, &dex, &gen1_species_listing());

        // Assert
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Bulbasaur", "Charmander", "Pidgey", "Geodude", "MrMime"]
        );
    }

    #[test]
    fn test_eggs_and_unown_forms_are_excluded() {
        // Arrange
        let dex = gen2_dex();

        // Act
        let entries = entries(&GEN2, &dex, &gen2_species_listing());

        // Assert
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bulbasaur", "Magnemite", "NidoranF"]);
    }

    #[test]
    fn test_species_out_of_order_is_rejected() {
        // Arrange
        let dex = gen1_dex();
        let text = "\tconst DEX_CHARMANDER ; 2\n\tconst DEX_BULBASAUR ; 1\n";

        // Act
        let result: DatagenResult<Vec<SpeciesEntry>> = parse_lines(text, |line, _, accepted| {
            match_species_line(&GEN1, &dex, line, accepted)
        })
        .collect();

        // Assert
        assert!(matches!(
            result,
            Err(DatagenError::IndexMismatch {
                expected: 1,
                found: 2,
                ..
            })
        ));
    }

    #[rstest]
    #[case(Gender::Genderless, 0xFF, "N")]
    #[case(Gender::Ratio { female: 0.0 }, 0x00, "0.00% F")]
    #[case(Gender::Ratio { female: 0.125 }, 0x1F, "12.5% F")]
    #[case(Gender::Ratio { female: 0.25 }, 0x3F, "25.0% F")]
    #[case(Gender::Ratio { female: 0.5 }, 0x7F, "50.0% F")]
    #[case(Gender::Ratio { female: 0.75 }, 0xBF, "75.0% F")]
    #[case(Gender::Ratio { female: 1.0 }, 0xFE, "100% F")]
    fn test_gender_bytes(#[case] gender: Gender, #[case] byte: u8, #[case] comment: &str) {
        // Arrange
        let species = dex_species(1, "Test", &[TypeName::Normal], gender);

        // Act
        let encoded = gender_byte(&species).unwrap();

        // Assert
        assert_eq!(encoded, (byte, comment));
    }

    #[test]
    fn test_unsupported_gender_ratio() {
        let species = dex_species(1, "Oddity", &[TypeName::Normal], Gender::Ratio { female: 0.3 });
        assert!(matches!(
            gender_byte(&species),
            Err(DatagenError::InvalidGenderRatio(ref name)) if name == "Oddity"
        ));
    }

    #[test]
    fn test_gen1_table() {
        // Arrange
        let dex = gen1_dex();

        // Act
        let table = table(&GEN1, &dex, &gen1_species_listing());

        // Assert
        assert_eq!(table.records.len(), 5);
        let charmander = &table.records[1];
        assert_eq!(charmander.types, [TypeName::Fire, TypeName::Fire]);
        assert_eq!(charmander.dex_types, vec![TypeName::Fire]);
        assert_eq!(charmander.gender, None);
        assert_eq!(charmander.crit_chance(), 22);
        assert_eq!(table.records[4].display_name, "Mr. Mime");
        assert_eq!(table.records[4].id, "mrmime");
    }

    #[test]
    fn test_gen2_table_carries_gender() {
        // Arrange
        let dex = gen2_dex();

        // Act
        let table = table(&GEN2, &dex, &gen2_species_listing());

        // Assert
        let genders: Vec<Option<u8>> = table
            .records
            .iter()
            .map(|r| r.gender.map(|(byte, _)| byte))
            .collect();
        assert_eq!(genders, vec![Some(0x1F), Some(0xFF), Some(0xFE)]);
    }

    #[test]
    fn test_render_gen1_species() {
        // Arrange
        let table = table(&GEN1, &gen1_dex(), &gen1_species_listing());

        // Act
        let source = table.render().unwrap();

        // Assert
        assert!(source.contains("stats: Stats { hp: 45, atk: 49, def: 49, spe: 45, spc: 65 },"));
        assert!(source.contains("types: Types { type1: Type::Grass, type2: Type::Poison },"));
        assert!(source.contains("static CHANCES: [u8; 5] = ["));
        assert!(!source.contains("ratio"));
    }

    #[test]
    fn test_render_gen2_species() {
        // Arrange
        let table = table(&GEN2, &gen2_dex(), &gen2_species_listing());

        // Act
        let source = table.render().unwrap();

        // Assert
        assert!(source.contains("spa: 65, spd: 60"));
        assert!(source.contains("ratio: 0x1F, // 12.5% F"));
        assert!(source.contains("ratio: 0xFF, // N"));
        assert!(!source.contains("CHANCES"));
        assert!(source.contains("pub static SPECIES: phf::Map<&'static str, Species> = "));
    }
}
