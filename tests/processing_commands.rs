use esql::prelude::*;

fn sample() -> Esql {
    esql::from("sample_data")
}

#[test]
fn test_where_accumulates_with_and() {
    let esql = sample().r#where("a").r#where("b").r#where("c");
    assert_eq!(esql.query().unwrap(), "FROM sample_data | WHERE a AND b AND c");
}

#[test]
fn test_sort_modifiers() {
    let esql = sample()
        .sort("@timestamp")
        .descending()
        .unwrap()
        .nulls_first()
        .unwrap();
    assert_eq!(esql.query().unwrap(), "FROM sample_data | SORT @timestamp DESC NULLS FIRST");

    let mut esql = sample();
    esql.sort_mut("a").asc_mut().unwrap().nulls_last_mut().unwrap();
    assert_eq!(esql.query().unwrap(), "FROM sample_data | SORT a ASC NULLS LAST");
}

#[test]
fn test_sort_modifier_without_sort() {
    assert_eq!(sample().descending().unwrap_err(), EsqlError::NoSortField);
    assert_eq!(sample().nulls_last().unwrap_err().to_string(), "No sort field specified");
}

#[test]
fn test_sort_limit_where_scenario() {
    let esql = sample()
        .sort("@timestamp")
        .ascending()
        .unwrap()
        .limit(2)
        .r#where("value > 10");
    assert_eq!(
        esql.query().unwrap(),
        "FROM sample_data | SORT @timestamp ASC | LIMIT 2 | WHERE value > 10"
    );
}

#[test]
fn test_overwrite_keeps_first_position() {
    let esql = sample().limit(2).r#where("a").limit(10);
    assert_eq!(esql.query().unwrap(), "FROM sample_data | LIMIT 10 | WHERE a");
}

#[test]
fn test_eval() {
    let esql = sample().eval([("height_feet", "height * 3.281"), ("height_cm", "height * 100")]);
    assert_eq!(
        esql.query().unwrap(),
        "FROM sample_data | EVAL height_feet = height * 3.281, height_cm = height * 100"
    );

    let esql = sample().eval(("duration_ms", "event_duration/1000000.0"));
    assert_eq!(
        esql.query().unwrap(),
        "FROM sample_data | EVAL duration_ms = event_duration/1000000.0"
    );
}

#[test]
fn test_keep_and_drop() {
    assert_eq!(
        sample().keep(["column1", "column2"]).query().unwrap(),
        "FROM sample_data | KEEP column1, column2"
    );
    assert_eq!(
        sample().keep("column1, column2, column3").query().unwrap(),
        "FROM sample_data | KEEP column1, column2, column3"
    );
    assert_eq!(
        sample().keep("`1.field`").query().unwrap(),
        "FROM sample_data | KEEP `1.field`"
    );
    assert_eq!(
        sample().drop(["column1", "column2"]).query().unwrap(),
        "FROM sample_data | DROP column1, column2"
    );
    assert_eq!(
        sample().drop("`1.field`").query().unwrap(),
        "FROM sample_data | DROP `1.field`"
    );
}

#[test]
fn test_rename() {
    assert_eq!(
        sample().rename(("first_name", "fn")).query().unwrap(),
        "FROM sample_data | RENAME first_name AS fn"
    );
    assert_eq!(
        sample()
            .rename([("first_name", "fn"), ("last_name", "ln")])
            .query()
            .unwrap(),
        "FROM sample_data | RENAME first_name AS fn, last_name AS ln"
    );
}

#[test]
fn test_dissect_and_grok() {
    let esql = esql::row([("a", "\"2023-01-23T12:15:00.000Z - some text - 127.0.0.1\"")])
        .dissect("a", "%{date} - %{msg} - %{ip}")
        .keep(["date", "msg", "ip"])
        .eval([("date", "TO_DATETIME(date)")]);
    assert_eq!(
        esql.query().unwrap(),
        "ROW a = \"2023-01-23T12:15:00.000Z - some text - 127.0.0.1\" \
         | DISSECT a \"\"\"%{date} - %{msg} - %{ip}\"\"\" \
         | KEEP date, msg, ip \
         | EVAL date = TO_DATETIME(date)"
    );

    let esql = esql::row([("message", "\"john jacob jingleheimer schmidt\"")])
        .dissect_with_separator("message", "%{+name} %{+name} %{+name} %{+name}", " ");
    assert_eq!(
        esql.query().unwrap(),
        "ROW message = \"john jacob jingleheimer schmidt\" \
         | DISSECT message \"\"\"%{+name} %{+name} %{+name} %{+name}\"\"\" APPEND_SEPARATOR=\" \""
    );

    let esql = esql::row([("a", "\"2023-01-23T12:15:00.000Z 127.0.0.1 some.email@foo.com 42\"")])
        .grok(
            "a",
            "%{TIMESTAMP_ISO8601:date} %{IP:ip} %{EMAILADDRESS:email} %{NUMBER:num:int}",
        )
        .keep("date, ip, email, num")
        .eval([("date", "TO_DATETIME(date)")]);
    assert_eq!(
        esql.query().unwrap(),
        "ROW a = \"2023-01-23T12:15:00.000Z 127.0.0.1 some.email@foo.com 42\" \
         | GROK a \"\"\"%{TIMESTAMP_ISO8601:date} %{IP:ip} %{EMAILADDRESS:email} %{NUMBER:num:int}\"\"\" \
         | KEEP date, ip, email, num \
         | EVAL date = TO_DATETIME(date)"
    );
}

#[test]
fn test_lookup_join() {
    let esql = sample()
        .lookup_join("threat_list", "field_name")
        .lookup_join("host_inventory", "host.name")
        .lookup_join("ownerships", "host.name");
    assert_eq!(
        esql.query().unwrap(),
        "FROM sample_data | LOOKUP JOIN threat_list ON field_name \
         | LOOKUP JOIN host_inventory ON host.name \
         | LOOKUP JOIN ownerships ON host.name"
    );
}

#[test]
fn test_lookup_join_docs_example() {
    let esql = esql::from("firewall_logs")
        .lookup_join("threat_list", "source.ip")
        .r#where("threat_level IS NOT NULL")
        .sort("timestamp")
        .keep(["source.ip", "action", "threat_type", "threat_level"])
        .limit(10);
    assert_eq!(
        esql.query().unwrap(),
        "FROM firewall_logs \
         | LOOKUP JOIN threat_list ON source.ip \
         | WHERE threat_level IS NOT NULL \
         | SORT timestamp \
         | KEEP source.ip, action, threat_type, threat_level \
         | LIMIT 10"
    );
}

#[test]
fn test_change_point() {
    assert_eq!(
        sample().change_point("my_column").unwrap().query().unwrap(),
        "FROM sample_data | CHANGE_POINT my_column"
    );
    assert_eq!(
        sample()
            .change_point(ChangePoint::new("my_column").key("my_key"))
            .unwrap()
            .query()
            .unwrap(),
        "FROM sample_data | CHANGE_POINT my_column ON my_key"
    );
    assert_eq!(
        sample()
            .change_point(
                ChangePoint::new("my_column")
                    .key("my_key")
                    .type_name("spike")
                    .pvalue_name("pvalue")
            )
            .unwrap()
            .query()
            .unwrap(),
        "FROM sample_data | CHANGE_POINT my_column ON my_key AS spike, pvalue"
    );
}

#[test]
fn test_change_point_invalid_type() {
    let mut esql = sample();
    let err = esql
        .change_point_mut(ChangePoint::new("my_column").type_name("invalid"))
        .unwrap_err();
    assert!(matches!(err, EsqlError::InvalidChangePointType { ref name } if name == "invalid"));
    assert!(err.to_string().contains("trend_change"));
    assert_eq!(esql.query().unwrap(), "FROM sample_data");
}

#[test]
fn test_custom() {
    let esql = sample().custom("| MY_VALUE = \"test value\"");
    assert_eq!(esql.query().unwrap(), "FROM sample_data | MY_VALUE = \"test value\"");

    let esql = esql.custom("| ANOTHER, VALUE");
    assert_eq!(
        esql.query().unwrap(),
        "FROM sample_data | MY_VALUE = \"test value\" | ANOTHER, VALUE"
    );
}

#[test]
fn test_custom_stays_last() {
    let mut esql = sample();
    esql.custom_mut("| X").limit_mut(1);
    assert_eq!(esql.query().unwrap(), "FROM sample_data | LIMIT 1 | X");
}
