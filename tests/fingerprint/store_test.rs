#[cfg(test)]
mod tests {
    use sextant::fingerprint::{
        fields_to_refingerprint, fingerprint_of, hydrate, Fingerprint, FingerprintStore,
        FingerprintVersions, InMemoryFingerprintStore, SqliteFingerprintStore,
        CURRENT_FINGERPRINT_VERSION,
    };
    use sextant::metadata::Catalog;
    use sextant::model::{BaseType, Field, RawValue, TypeClass};
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;

    const CATALOG: &str = include_str!("../fixtures/sample_catalog.json");

    fn temp_store_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("sextant-test-{}-{}", name, std::process::id()))
            .join("fingerprints.db")
    }

    #[test]
    fn test_sqlite_store_persists_across_opens() {
        let path = temp_store_path("persist");
        let fp = Fingerprint::number(Some(1.0), Some(4.0)).with_distinct_count(4);

        {
            let store = SqliteFingerprintStore::open(&path).unwrap();
            store.put(15, &fp, CURRENT_FINGERPRINT_VERSION).unwrap();
        }

        let store = SqliteFingerprintStore::open(&path).unwrap();
        let stored = store.get(15).unwrap().unwrap();
        assert_eq!(stored.fingerprint, fp);
        assert_eq!(stored.version, CURRENT_FINGERPRINT_VERSION);

        drop(store);
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_import_then_hydrate_round_trip() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let store = SqliteFingerprintStore::open_in_memory().unwrap();

        for field in &catalog.fields {
            if let Some(fp) = &field.fingerprint {
                store.put(field.id, fp, field.fingerprint_version).unwrap();
            }
        }

        let mut bare: Vec<Field> = catalog
            .fields
            .iter()
            .cloned()
            .map(|mut f| {
                f.fingerprint = None;
                f.fingerprint_version = 0;
                f
            })
            .collect();
        let hydrated = hydrate(&mut bare, &store).unwrap();

        assert_eq!(hydrated, store.len().unwrap());
        assert_eq!(bare, catalog.fields);
        assert_eq!(store.older_than(2).unwrap(), vec![18]);
    }

    #[test]
    fn test_in_memory_store_shared_between_threads() {
        let store = Arc::new(InMemoryFingerprintStore::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let fp = Fingerprint::number(Some(i as f64), Some(10.0));
                    store.put(i, &fp, 2).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len().unwrap(), 4);
        assert_eq!(
            store.get(3).unwrap().unwrap().fingerprint.number_bounds(),
            Some((3.0, 10.0))
        );
    }

    #[test]
    fn test_stale_fields_in_catalog() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let stale: Vec<_> = fields_to_refingerprint(&catalog.fields, &FingerprintVersions::default())
            .into_iter()
            .map(|f| f.id)
            .collect();
        // Never fingerprinted; LAST_VISIT's v1 DateTime fingerprint is still current.
        assert_eq!(stale, vec![16, 17, 20, 21]);
    }

    #[test]
    fn test_custom_version_history() {
        let versions = FingerprintVersions::new(vec![
            (3, vec![TypeClass::DateTime]),
            (1, TypeClass::ALL.to_vec()),
        ]);
        assert_eq!(versions.current(), 3);
        assert!(versions.is_stale(2, TypeClass::DateTime));
        assert!(!versions.is_stale(2, TypeClass::Number));
    }

    #[test]
    fn test_fingerprint_contract() {
        let never_synced = Field::new(1, 1, "PRICE", BaseType::Integer);
        assert_eq!(fingerprint_of(&never_synced).unwrap(), None);

        let synced = never_synced.clone().with_fingerprint(
            Fingerprint::number(None, None).with_distinct_values(vec![RawValue::Integer(1)]),
            2,
        );
        let fp = fingerprint_of(&synced).unwrap().unwrap();
        assert_eq!(fp.number_bounds(), None);
        assert_eq!(fp.global.distinct_count, Some(1));

        let boolean_as_number = Field::new(2, 1, "ACTIVE", BaseType::Boolean)
            .with_fingerprint(Fingerprint::number(Some(0.0), Some(1.0)), 2);
        assert!(fingerprint_of(&boolean_as_number)
            .unwrap_err()
            .is_invalid_field_state());
    }
}
