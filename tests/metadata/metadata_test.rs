#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use sextant::dimension::HasFieldValues;
    use sextant::fingerprint::{Fingerprint, TextFingerprint};
    use sextant::metadata::{
        assemble, metadata_digest, Catalog, MetadataError, MetadataRequest, ReadAccess,
        TableMetadata,
    };
    use sextant::model::{FieldRef, TableId};
    use std::collections::BTreeSet;

    const CATALOG: &str = include_str!("../fixtures/sample_catalog.json");

    fn catalog() -> Catalog {
        Catalog::from_json(CATALOG).unwrap()
    }

    fn metadata_for(table_id: TableId, access: &ReadAccess, sensitive: bool) -> TableMetadata {
        let catalog = catalog();
        let snapshot = catalog.snapshot(table_id, access).unwrap();
        let request = MetadataRequest::new(table_id).with_sensitive_fields(sensitive);
        assemble(&request, &snapshot).unwrap()
    }

    fn field_names(metadata: &TableMetadata) -> Vec<&str> {
        metadata.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_fields_ordered_by_position_without_hidden_ones() {
        let metadata = metadata_for(TableId::Physical(5), &ReadAccess::All, false);
        assert_eq!(
            field_names(&metadata),
            [
                "ID",
                "NAME",
                "CATEGORY_ID",
                "LATITUDE",
                "LONGITUDE",
                "PRICE",
                "LAST_VISIT",
                "STATUS"
            ]
        );

        let metadata = metadata_for(TableId::Physical(5), &ReadAccess::All, true);
        assert!(field_names(&metadata).contains(&"OWNER_EMAIL"));
        assert!(!field_names(&metadata).contains(&"LEGACY_CODE"));
    }

    #[test]
    fn test_table_attributes() {
        let metadata = metadata_for(TableId::Physical(5), &ReadAccess::All, false);
        assert_eq!(metadata.id, TableId::Physical(5));
        assert_eq!(metadata.db_id, 1);
        assert_eq!(metadata.schema.as_deref(), Some("PUBLIC"));
        assert_eq!(metadata.display_name, "Venues");
        assert!(metadata.active);
        assert_eq!(metadata.rows, Some(100));
    }

    #[test]
    fn test_binning_per_field() {
        let metadata = metadata_for(TableId::Physical(5), &ReadAccess::All, false);
        let options = |name: &str| {
            let field = metadata.field(name).unwrap();
            (
                field.dimension_options.clone(),
                field.default_dimension_option.clone(),
            )
        };

        assert_eq!(
            options("PRICE"),
            (
                vec!["15".into(), "16".into(), "17".into(), "18".into()],
                Some("15".into())
            )
        );
        assert_eq!(options("LATITUDE").1.as_deref(), Some("19"));
        assert_eq!(options("LONGITUDE").0.len(), 5);
        assert_eq!(options("LAST_VISIT").1.as_deref(), Some("4"));
        assert_eq!(options("LAST_VISIT").0.len(), 15);
        // Keys and text fields are never binned.
        assert!(options("ID").0.is_empty());
        assert!(options("CATEGORY_ID").0.is_empty());
        assert!(options("NAME").0.is_empty());
    }

    #[test]
    fn test_driver_without_binning_support() {
        let metadata = metadata_for(TableId::Physical(8), &ReadAccess::All, false);
        let duration = metadata.field("duration").unwrap();
        assert!(duration.dimension_options.is_empty());
        assert_eq!(duration.default_dimension_option, None);
        assert_eq!(metadata.entity_type.as_deref(), Some("entity/EventTable"));
    }

    #[test]
    fn test_internal_remap_values() {
        let metadata = metadata_for(TableId::Physical(5), &ReadAccess::All, false);
        let status = metadata.field("STATUS").unwrap();

        assert_eq!(status.has_field_values, HasFieldValues::List);
        assert_snapshot!(
            serde_json::to_string(&status.values).unwrap(),
            @r#"[[0,"Closed"],[1,"Open"],[2,"Pending review"]]"#
        );
        assert_snapshot!(
            serde_json::to_string(&status.dimensions).unwrap(),
            @r#"{"id":1,"name":"Status","type":"internal","field_id":19,"human_readable_field_id":null}"#
        );
    }

    #[test]
    fn test_fk_target_follows_read_access() {
        let metadata = metadata_for(TableId::Physical(5), &ReadAccess::All, false);
        let category = metadata.field("CATEGORY_ID").unwrap();
        let target = category.target.as_ref().unwrap();
        assert_eq!(target.id, 20);
        assert_eq!(target.table_id, TableId::Physical(6));

        let venues_only = ReadAccess::Tables(BTreeSet::from([5]));
        let metadata = metadata_for(TableId::Physical(5), &venues_only, false);
        let category = metadata.field("CATEGORY_ID").unwrap();
        assert_eq!(category.target, None);
        assert_eq!(category.fk_target_field_id, Some(20));

        let json = serde_json::to_value(category).unwrap();
        assert!(json["target"].is_null());
    }

    #[test]
    fn test_virtual_table() {
        let metadata = metadata_for(TableId::Card(3), &ReadAccess::All, false);

        assert_eq!(metadata.id, TableId::Card(3));
        assert_eq!(metadata.schema.as_deref(), Some("Everything else"));
        assert_eq!(field_names(&metadata), ["PRICE", "count", "avg_rating"]);

        let price = metadata.field("PRICE").unwrap();
        assert_eq!(price.special_type, None);
        assert!(price.values.is_empty());
        assert_eq!(price.dimensions, None);
        assert!(matches!(price.id, FieldRef::Literal { .. }));

        let rating = metadata.field("avg_rating").unwrap();
        assert_eq!(
            serde_json::to_string(&rating.id).unwrap(),
            r#"["field-literal","avg_rating","type/*"]"#
        );
        assert!(rating.dimension_options.is_empty());

        let count = metadata.field("count").unwrap();
        assert_snapshot!(
            serde_json::to_string(count).unwrap(),
            @r#"{"id":["field-literal","count","type/BigInteger"],"table_id":"card__3","name":"count","display_name":"Count","description":null,"base_type":"type/BigInteger","special_type":null,"visibility_type":"normal","fk_target_field_id":null,"target":null,"position":1,"preview_display":true,"fingerprint":{"global":{"distinct-count":4,"nil%":0.0},"type":{"type/Number":{"min":6.0,"max":51.0,"avg":25.0,"sd":19.6}}},"has_field_values":"none","values":[],"dimensions":null,"dimension_options":["15","16","17","18"],"default_dimension_option":"15"}"#
        );
    }

    #[test]
    fn test_virtual_column_with_mismatched_fingerprint_fails() {
        let mut catalog = catalog();
        let card = catalog.cards.iter_mut().find(|c| c.id == 3).unwrap();
        card.result_metadata[0].fingerprint = Some(Fingerprint::text(TextFingerprint::default()));

        let snapshot = catalog.snapshot(TableId::Card(3), &ReadAccess::All).unwrap();
        let err = assemble(&MetadataRequest::new(TableId::Card(3)), &snapshot).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::ColumnFingerprintMismatch { ref column, .. } if column == "PRICE"
        ));
        assert!(err.is_invalid_field_state());
    }

    #[test]
    fn test_untyped_virtual_column_keeps_any_fingerprint() {
        let mut catalog = catalog();
        let card = catalog.cards.iter_mut().find(|c| c.id == 3).unwrap();
        card.result_metadata[2].fingerprint = Some(Fingerprint::number(Some(1.0), Some(5.0)));

        let snapshot = catalog.snapshot(TableId::Card(3), &ReadAccess::All).unwrap();
        let metadata = assemble(&MetadataRequest::new(TableId::Card(3)), &snapshot).unwrap();
        let rating = metadata.field("avg_rating").unwrap();
        assert!(rating.fingerprint.is_some());
        // type/* is neither numeric nor temporal, so nothing is binned.
        assert!(rating.dimension_options.is_empty());
    }

    #[test]
    fn test_virtual_table_in_collection() {
        let metadata = metadata_for(TableId::Card(4), &ReadAccess::All, false);
        assert_eq!(metadata.schema.as_deref(), Some("Marketing"));

        let visit = metadata.field("LAST_VISIT").unwrap();
        assert_eq!(visit.display_name, "Last Visit");
        assert_eq!(visit.default_dimension_option.as_deref(), Some("4"));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let first = metadata_for(TableId::Physical(5), &ReadAccess::All, true);
        let second = metadata_for(TableId::Physical(5), &ReadAccess::All, true);

        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        assert_eq!(
            metadata_digest(&first).unwrap(),
            metadata_digest(&second).unwrap()
        );

        let without_sensitive = metadata_for(TableId::Physical(5), &ReadAccess::All, false);
        assert_ne!(
            metadata_digest(&first).unwrap(),
            metadata_digest(&without_sensitive).unwrap()
        );
    }

    #[test]
    fn test_shuffled_input_gives_identical_output() {
        let mut shuffled = catalog();
        shuffled.fields.reverse();
        shuffled.tables.reverse();

        let request = MetadataRequest::new(TableId::Physical(5));
        let original = catalog();
        let a = assemble(
            &request,
            &original
                .snapshot(TableId::Physical(5), &ReadAccess::All)
                .unwrap(),
        )
        .unwrap();
        let b = assemble(
            &request,
            &shuffled
                .snapshot(TableId::Physical(5), &ReadAccess::All)
                .unwrap(),
        )
        .unwrap();

        assert_eq!(metadata_digest(&a).unwrap(), metadata_digest(&b).unwrap());
    }

    #[test]
    fn test_dimension_options_table_in_payload() {
        let metadata = metadata_for(TableId::Physical(5), &ReadAccess::All, false);
        let json = serde_json::to_value(&metadata).unwrap();
        let table = json["dimension_options"].as_object().unwrap();

        assert_eq!(table.len(), 24);
        assert_eq!(table["4"]["name"], "Day");
        assert_eq!(table["15"]["mbql"][2], "default");
        assert_eq!(table["16"]["mbql"][2], "num-bins");
        assert_eq!(table["20"]["mbql"][2], "bin-width");
    }

    #[test]
    fn test_unknown_tables() {
        let catalog = catalog();
        assert_eq!(
            catalog.snapshot(TableId::Physical(99), &ReadAccess::All),
            Err(MetadataError::TableNotFound(TableId::Physical(99)))
        );
        assert_eq!(
            catalog.snapshot(TableId::Card(99), &ReadAccess::All),
            Err(MetadataError::TableNotFound(TableId::Card(99)))
        );
        assert!("card__x".parse::<TableId>().is_err());
    }
}
