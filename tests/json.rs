#![cfg(feature = "serde")]

use esql::prelude::*;
use serde_json::json;

#[test]
fn test_stats_from_json() {
    let specs = StatsSpecs::try_from(&json!([
        {
            "column": "avg50s",
            "avg": "salary::LONG",
            "where": "birth_date < \"1960-01-01\""
        },
        {
            "column": "avg60s",
            "avg": "salary::LONG",
            "where": "birth_date >= \"1960-01-01\""
        }
    ]))
    .unwrap();

    let esql = esql::from("employees").stats(specs).unwrap().by("gender").unwrap();
    assert_eq!(
        esql.query().unwrap(),
        "FROM employees | STATS avg50s = AVG(salary)::LONG WHERE birth_date < \"1960-01-01\", \
         avg60s = AVG(salary)::LONG WHERE birth_date >= \"1960-01-01\" BY gender"
    );
}

#[test]
fn test_stats_keys_keep_insertion_order() {
    let specs = StatsSpecs::try_from(&json!({
        "median_absolute_deviation": "salary",
        "median": "salary"
    }))
    .unwrap();
    assert_eq!(specs.to_string(), "MEDIAN_ABSOLUTE_DEVIATION(salary), MEDIAN(salary)");
}

#[test]
fn test_deep_nesting_from_json() {
    let specs = StatsSpecs::try_from(&json!({
        "column": "events_received",
        "max": { "absent_over_time": "events_received" }
    }))
    .unwrap();

    let err = esql::from("k8s").stats(specs.clone()).unwrap_err();
    assert!(matches!(err, EsqlError::TimeSeriesAggregation { .. }));

    let esql = esql::ts("k8s").stats(specs).unwrap();
    assert_eq!(
        esql.query().unwrap(),
        "TS k8s | STATS events_received = MAX(ABSENT_OVER_TIME(events_received))"
    );
}

#[test]
fn test_invalid_stats_json() {
    assert_eq!(
        StatsSpecs::try_from(&json!({ "column": "x" })),
        Err(EsqlError::NoAggregation)
    );
    assert!(matches!(
        StatsSpecs::try_from(&json!({ "avg": ["salary"] })),
        Err(EsqlError::InvalidAggregationExpression(_))
    ));
}

#[test]
fn test_row_and_ts_fields_from_json() {
    let row = Expressions::from_json(Command::Row, &json!({ "a": 1, "b": "two", "c": "null" })).unwrap();
    assert_eq!(esql::row(row).query().unwrap(), "ROW a = 1, b = two, c = null");

    let fields = Fields::from_json(Command::Ts, &json!(["_index", "_id"])).unwrap();
    assert_eq!(
        esql::ts_with_metadata("sample", fields).query().unwrap(),
        "TS sample METADATA _index, _id"
    );

    assert_eq!(
        Fields::from_json(Command::Ts, &json!({ "a": "_index " })),
        Err(EsqlError::InvalidFieldsArgument { command: Command::Ts })
    );
}

#[test]
fn test_vocabulary_serde() {
    assert_eq!(serde_json::to_value(AggFunction::CountDistinct).unwrap(), json!("count_distinct"));
    let kind: ChangePointType = serde_json::from_value(json!("step_change")).unwrap();
    assert_eq!(kind, ChangePointType::StepChange);
}
