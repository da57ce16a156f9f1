#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use sextant::binning::{
        option_at, options_table, select_options, BinningInput, OptionFamily, DIMENSION_OPTIONS,
    };
    use sextant::fingerprint::Fingerprint;
    use sextant::model::{BaseType, SpecialType};

    fn numeric(
        base_type: BaseType,
        special_type: Option<SpecialType>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Vec<String> {
        let fp = Fingerprint::number(min, max);
        select_options(
            BinningInput {
                base_type,
                special_type,
                fingerprint: Some(&fp),
            },
            true,
        )
        .dimension_options
    }

    fn strategies(indexes: &[String]) -> Vec<&'static str> {
        indexes
            .iter()
            .filter_map(|i| option_at(i))
            .filter_map(|o| o.strategy_id())
            .collect()
    }

    #[test]
    fn test_option_table_contents() {
        let lines: Vec<String> = DIMENSION_OPTIONS
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{} {}", i, serde_json::to_string(option).unwrap()))
            .collect();

        assert_snapshot!(lines.join("\n"), @r#"
0 {"name":"Minute","mbql":["datetime-field",null,"minute"],"type":"type/DateTime"}
1 {"name":"Minute of Hour","mbql":["datetime-field",null,"minute-of-hour"],"type":"type/DateTime"}
2 {"name":"Hour","mbql":["datetime-field",null,"hour"],"type":"type/DateTime"}
3 {"name":"Hour of Day","mbql":["datetime-field",null,"hour-of-day"],"type":"type/DateTime"}
4 {"name":"Day","mbql":["datetime-field",null,"day"],"type":"type/DateTime"}
5 {"name":"Day of Week","mbql":["datetime-field",null,"day-of-week"],"type":"type/DateTime"}
6 {"name":"Day of Month","mbql":["datetime-field",null,"day-of-month"],"type":"type/DateTime"}
7 {"name":"Day of Year","mbql":["datetime-field",null,"day-of-year"],"type":"type/DateTime"}
8 {"name":"Week","mbql":["datetime-field",null,"week"],"type":"type/DateTime"}
9 {"name":"Week of Year","mbql":["datetime-field",null,"week-of-year"],"type":"type/DateTime"}
10 {"name":"Month","mbql":["datetime-field",null,"month"],"type":"type/DateTime"}
11 {"name":"Month of Year","mbql":["datetime-field",null,"month-of-year"],"type":"type/DateTime"}
12 {"name":"Quarter","mbql":["datetime-field",null,"quarter"],"type":"type/DateTime"}
13 {"name":"Quarter of Year","mbql":["datetime-field",null,"quarter-of-year"],"type":"type/DateTime"}
14 {"name":"Year","mbql":["datetime-field",null,"year"],"type":"type/DateTime"}
15 {"name":"Auto bin","mbql":["binning-strategy",null,"default",null],"type":"type/Number"}
16 {"name":"10 bins","mbql":["binning-strategy",null,"num-bins",10],"type":"type/Number"}
17 {"name":"50 bins","mbql":["binning-strategy",null,"num-bins",50],"type":"type/Number"}
18 {"name":"100 bins","mbql":["binning-strategy",null,"num-bins",100],"type":"type/Number"}
19 {"name":"Auto bin","mbql":["binning-strategy",null,"default",null],"type":"type/Coordinate"}
20 {"name":"Bin every 0.1 degrees","mbql":["binning-strategy",null,"bin-width",0.1],"type":"type/Coordinate"}
21 {"name":"Bin every 1 degree","mbql":["binning-strategy",null,"bin-width",1.0],"type":"type/Coordinate"}
22 {"name":"Bin every 10 degrees","mbql":["binning-strategy",null,"bin-width",10.0],"type":"type/Coordinate"}
23 {"name":"Bin every 20 degrees","mbql":["binning-strategy",null,"bin-width",20.0],"type":"type/Coordinate"}
"#);
    }

    #[test]
    fn test_price_scenario() {
        let with_bounds = numeric(BaseType::Integer, None, Some(1.0), Some(4.0));
        let found = strategies(&with_bounds);
        assert!(found.contains(&"num-bins"));
        assert!(found.contains(&"default"));

        let without_bounds = numeric(BaseType::Integer, None, None, None);
        assert!(without_bounds.is_empty());
    }

    #[test]
    fn test_latitude_scenario() {
        let options = numeric(
            BaseType::Float,
            Some(SpecialType::Latitude),
            Some(10.06),
            Some(40.78),
        );
        let found = strategies(&options);
        assert!(found.contains(&"bin-width"));
        assert!(found.contains(&"default"));
        assert!(!found.contains(&"num-bins"));
    }

    #[test]
    fn test_coordinates_never_get_num_bins() {
        let bounds = [
            (Some(-90.0), Some(90.0)),
            (Some(0.0), Some(0.0)),
            (None, Some(1.0)),
            (Some(-180.0), None),
        ];
        for special in [SpecialType::Latitude, SpecialType::Longitude] {
            for base in [BaseType::Float, BaseType::Decimal, BaseType::Integer] {
                for (min, max) in bounds {
                    let options = numeric(base, Some(special), min, max);
                    let found = strategies(&options);
                    assert!(
                        found.iter().all(|s| *s == "bin-width" || *s == "default"),
                        "{:?} {:?} got {:?}",
                        special,
                        base,
                        found
                    );
                }
            }
        }
    }

    #[test]
    fn test_null_bounds_always_suppress() {
        for base in [
            BaseType::Integer,
            BaseType::BigInteger,
            BaseType::Float,
            BaseType::Decimal,
        ] {
            for special in [None, Some(SpecialType::Price), Some(SpecialType::Latitude)] {
                assert!(numeric(base, special, None, Some(10.0)).is_empty());
                assert!(numeric(base, special, Some(0.0), None).is_empty());
            }
        }
    }

    #[test]
    fn test_indexes_emitted_in_numeric_order() {
        let cases = [
            Fingerprint::date_time(Some("2015-01-01"), Some("2019-01-01")),
            Fingerprint::number(Some(1.0), Some(4.0)),
        ];
        for (base, fp) in [BaseType::DateTime, BaseType::Integer].into_iter().zip(&cases) {
            let options = select_options(
                BinningInput {
                    base_type: base,
                    special_type: None,
                    fingerprint: Some(fp),
                },
                true,
            )
            .dimension_options;
            assert!(!options.is_empty());

            let numeric: Vec<usize> = options.iter().map(|i| i.parse().unwrap()).collect();
            let mut numeric_sorted = numeric.clone();
            numeric_sorted.sort();
            assert_eq!(numeric, numeric_sorted);
        }
    }

    #[test]
    fn test_full_table_keys_in_numeric_order() {
        let json = serde_json::to_string(&options_table()).unwrap();
        let positions: Vec<usize> = (0..DIMENSION_OPTIONS.len())
            .map(|i| json.find(&format!("\"{}\":{{", i)).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_families() {
        let count = |family: OptionFamily| {
            DIMENSION_OPTIONS
                .iter()
                .filter(|o| o.family == family)
                .count()
        };
        assert_eq!(count(OptionFamily::DateTime), 15);
        assert_eq!(count(OptionFamily::Number), 4);
        assert_eq!(count(OptionFamily::Coordinate), 5);
    }
}
