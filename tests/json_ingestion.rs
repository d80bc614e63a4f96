use bethyw::ingestion::json::ingest_json_from_str;
use bethyw::ingestion::{ColumnMapping, SourceColumn, SourceDataType, populate};
use bethyw::processing::{AreaFilter, Filters, MeasureFilter, YearFilter};
use bethyw::types::{Area, Areas, MergeMode};
use bethyw::IngestionError;

fn multi_measure_cols() -> ColumnMapping {
    ColumnMapping::new()
        .with(SourceColumn::AuthCode, "code")
        .with(SourceColumn::AuthNameEng, "eng")
        .with(SourceColumn::MeasureCode, "mcode")
        .with(SourceColumn::MeasureName, "mname")
        .with(SourceColumn::Year, "year")
        .with(SourceColumn::Value, "value")
}

fn single_measure_cols() -> ColumnMapping {
    ColumnMapping::new()
        .with(SourceColumn::AuthCode, "code")
        .with(SourceColumn::AuthNameEng, "eng")
        .with(SourceColumn::SingleMeasureCode, "rail")
        .with(SourceColumn::SingleMeasureName, "Rail passenger journeys")
        .with(SourceColumn::Year, "year")
        .with(SourceColumn::Value, "value")
}

fn load(areas: &mut Areas, input: &str, cols: &ColumnMapping, filters: &Filters) {
    populate(areas, input.as_bytes(), SourceDataType::WelshStatsJson, cols, filters).unwrap();
}

#[test]
fn record_extends_existing_area_without_touching_names() {
    let mut areas = Areas::new();
    let mut w1 = Area::new("W1");
    w1.set_name("eng", "Original").unwrap();
    w1.set_name("cym", "Gwreiddiol").unwrap();
    areas.set_area("W1", w1);

    let input = r#"{"value": [{"code": "W1", "eng": "Test", "year": "2000", "value": "5.5",
                               "mcode": "pop", "mname": "Population"}]}"#;
    load(&mut areas, input, &multi_measure_cols(), &Filters::none());

    let area = areas.area("W1").unwrap();
    assert_eq!(area.measure("pop").unwrap().value(2000).unwrap(), 5.5);
    assert_eq!(area.name("eng").unwrap(), "Original");
    assert_eq!(area.name("cym").unwrap(), "Gwreiddiol");
}

#[test]
fn record_creates_missing_area_with_english_name() {
    let mut areas = Areas::new();
    let input = r#"{"value": [{"code": "W1", "eng": "Test", "year": "2000", "value": 7,
                               "mcode": "Pop", "mname": "Population"}]}"#;
    load(&mut areas, input, &multi_measure_cols(), &Filters::none());

    let area = areas.area("W1").unwrap();
    assert_eq!(area.name("eng").unwrap(), "Test");
    assert!(area.name("cym").is_err());
    let pop = area.measure("POP").unwrap();
    assert_eq!(pop.codename(), "pop");
    assert_eq!(pop.value(2000).unwrap(), 7.0);
}

#[test]
fn deltas_extend_or_create() {
    let input = r#"{"value": [{"code": "W1", "eng": "Test", "year": 2000, "value": 1.0,
                               "mcode": "a", "mname": "A"}]}"#;
    let set = ingest_json_from_str(input, &multi_measure_cols(), &Filters::none()).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.deltas[0].mode, MergeMode::ExtendOrCreate);
}

#[test]
fn single_measure_mapping_is_used_without_measure_fields() {
    let mut areas = Areas::new();
    let input = r#"{"value": [
        {"code": "W1", "eng": "Test", "year": "2015", "value": "1500"},
        {"code": "W1", "eng": "Test", "year": "2016", "value": 1600}
    ]}"#;
    load(&mut areas, input, &single_measure_cols(), &Filters::none());

    let rail = areas.area("W1").unwrap().measure("rail").unwrap();
    assert_eq!(rail.label(), "Rail passenger journeys");
    assert_eq!(rail.len(), 2);
    assert_eq!(rail.difference(), 100.0);
}

#[test]
fn records_are_filtered_independently() {
    let input = r#"{"value": [
        {"code": "W1", "eng": "Swansea", "year": "2000", "value": 1, "mcode": "pop", "mname": "P"},
        {"code": "W1", "eng": "Swansea", "year": "2001", "value": 2, "mcode": "pop", "mname": "P"},
        {"code": "W1", "eng": "Swansea", "year": "2000", "value": 3, "mcode": "dens", "mname": "D"},
        {"code": "W2", "eng": "Cardiff", "year": "2000", "value": 4, "mcode": "pop", "mname": "P"},
        {"code": "W2", "eng": "Cardiff", "year": "2000", "value": 5, "mcode": "POP", "mname": "P"}
    ]}"#;
    let filters = Filters::none()
        .with_areas(AreaFilter::new(["swansea"]))
        .with_measures(MeasureFilter::new(["Pop"]))
        .with_years(YearFilter::new(2000, 2000));

    let mut areas = Areas::new();
    load(&mut areas, input, &multi_measure_cols(), &filters);

    assert_eq!(areas.len(), 1);
    let w1 = areas.area("W1").unwrap();
    assert_eq!(w1.len(), 1);
    let pop = w1.measure("pop").unwrap();
    assert_eq!(pop.value(2000).unwrap(), 1.0);
    assert!(pop.value(2001).is_err());
}

#[test]
fn missing_value_array_is_malformed() {
    for input in [r#"{"data": []}"#, r#"[1, 2, 3]"#, r#"{"value": {}}"#] {
        let err = ingest_json_from_str(input, &multi_measure_cols(), &Filters::none()).unwrap_err();
        assert!(matches!(err, IngestionError::MalformedFile { .. }), "{input}: {err}");
    }
}

#[test]
fn record_missing_field_is_malformed() {
    let input = r#"{"value": [{"code": "W1", "eng": "Test", "value": 1, "mcode": "a", "mname": "A"}]}"#;
    let err = ingest_json_from_str(input, &multi_measure_cols(), &Filters::none()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("record 1 missing required field 'year'"), "{msg}");
}

#[test]
fn non_numeric_value_is_parse_error() {
    let input = r#"{"value": [{"code": "W1", "eng": "Test", "year": "2000", "value": "..",
                               "mcode": "a", "mname": "A"}]}"#;
    let err = ingest_json_from_str(input, &multi_measure_cols(), &Filters::none()).unwrap_err();
    assert!(matches!(err, IngestionError::ParseError { row: 1, .. }));
}

#[test]
fn invalid_json_is_json_error() {
    let err = ingest_json_from_str("{not json", &multi_measure_cols(), &Filters::none()).unwrap_err();
    assert!(matches!(err, IngestionError::Json(_)));
    assert!(err.to_string().starts_with("json error"));
}

#[test]
fn mapping_without_any_measure_source_is_not_enough_columns() {
    let cols = ColumnMapping::new()
        .with(SourceColumn::AuthCode, "code")
        .with(SourceColumn::AuthNameEng, "eng")
        .with(SourceColumn::MeasureCode, "mcode")
        .with(SourceColumn::Year, "year")
        .with(SourceColumn::Value, "value");
    let err = ingest_json_from_str(r#"{"value": []}"#, &cols, &Filters::none()).unwrap_err();
    assert!(matches!(
        err,
        IngestionError::NotEnoughColumns {
            column: SourceColumn::SingleMeasureCode,
            available: 5
        }
    ));
}

#[test]
fn fixture_file_creates_and_extends() {
    let cols = ColumnMapping::new()
        .with(SourceColumn::AuthCode, "Localauthority_Code")
        .with(SourceColumn::AuthNameEng, "Localauthority_ItemName_ENG")
        .with(SourceColumn::MeasureCode, "Measure_Code")
        .with(SourceColumn::MeasureName, "Measure_ItemName_ENG")
        .with(SourceColumn::Year, "Year_Code")
        .with(SourceColumn::Value, "Data");
    let file = std::fs::File::open("tests/fixtures/popu1009.json").unwrap();

    let mut areas = Areas::new();
    let stats = populate(&mut areas, file, SourceDataType::WelshStatsJson, &cols, &Filters::none())
        .unwrap();

    assert_eq!(stats.records, 5);
    assert_eq!(stats.applied, 5);
    let codes: Vec<&str> = areas.iter().map(|a| a.code()).collect();
    assert_eq!(codes, ["W06000011", "W06000015", "W06000022"]);

    let dens = areas.area("W06000011").unwrap().measure("dens").unwrap();
    assert_eq!(dens.value(1992).unwrap(), 2.6);
}
