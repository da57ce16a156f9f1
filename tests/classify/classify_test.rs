#[cfg(test)]
mod tests {
    use sextant::classify::{classify, classify_fields, humanize, infer_from_name, ClassificationSource};
    use sextant::config::ClassifierSettings;
    use sextant::fingerprint::{Fingerprint, TextFingerprint};
    use sextant::metadata::Catalog;
    use sextant::model::{BaseType, Field, SpecialType};
    use std::collections::BTreeMap;

    const CATALOG: &str = include_str!("../fixtures/sample_catalog.json");

    #[test]
    fn test_name_rules() {
        assert_eq!(infer_from_name("id", BaseType::Integer), Some(SpecialType::PrimaryKey));
        assert_eq!(infer_from_name("latitude", BaseType::Float), Some(SpecialType::Latitude));
        assert_eq!(infer_from_name("lng", BaseType::Float), Some(SpecialType::Longitude));
        assert_eq!(infer_from_name("city", BaseType::Text), Some(SpecialType::City));
        // Rules only apply to compatible base types.
        assert_eq!(infer_from_name("latitude", BaseType::Text), None);
    }

    #[test]
    fn test_manual_override_is_never_replaced() {
        let field = Field::new(1, 1, "latitude", BaseType::Float)
            .with_fingerprint(Fingerprint::number(Some(1.0), Some(2.0)).with_distinct_count(2), 2);
        let c = classify(&field, Some(SpecialType::Score), &ClassifierSettings::default()).unwrap();
        assert_eq!(c.special_type, Some(SpecialType::Score));
        assert_eq!(c.source, ClassificationSource::Manual);
    }

    #[test]
    fn test_thresholds_come_from_settings() {
        let field = Field::new(1, 1, "AMOUNT", BaseType::Float)
            .with_fingerprint(Fingerprint::number(Some(1.0), Some(90.0)).with_distinct_count(40), 2);

        let default = classify(&field, None, &ClassifierSettings::default()).unwrap();
        assert_eq!(default.special_type, None);
        assert_eq!(default.source, ClassificationSource::Unclassified);

        let generous = ClassifierSettings {
            category_cardinality_threshold: 50,
            ..Default::default()
        };
        let c = classify(&field, None, &generous).unwrap();
        assert_eq!(c.special_type, Some(SpecialType::Category));
    }

    #[test]
    fn test_url_beats_email() {
        let text = TextFingerprint {
            percent_url: Some(0.97),
            percent_email: Some(0.97),
            ..Default::default()
        };
        let field = Field::new(1, 1, "CONTACT", BaseType::Text)
            .with_fingerprint(Fingerprint::text(text).with_distinct_count(500), 2);
        let c = classify(&field, None, &ClassifierSettings::default()).unwrap();
        assert_eq!(c.special_type, Some(SpecialType::Url));
    }

    #[test]
    fn test_catalog_fields_keep_existing_types() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let result =
            classify_fields(&catalog.fields, &BTreeMap::new(), &ClassifierSettings::default())
                .unwrap();

        assert_eq!(result.len(), catalog.fields.len());
        assert_eq!(result[&12].special_type, Some(SpecialType::ForeignKey));
        assert_eq!(result[&12].source, ClassificationSource::Existing);
        // PRICE has four distinct values and no stored type.
        assert_eq!(result[&15].special_type, Some(SpecialType::Category));
        assert_eq!(result[&15].source, ClassificationSource::Cardinality);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(humanize("CATEGORY_ID"), "Category");
        assert_eq!(humanize("avg_rating"), "Avg Rating");
        assert_eq!(humanize("LAST_VISIT"), "Last Visit");
    }
}
