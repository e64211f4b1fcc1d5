use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use specimen::{
    attrs, CsvFormat, Error, FormatOptions, GridFormat, Kind, TypesLocation, Value,
};

fn date(y: i32, m: u32, d: u32) -> Value {
    Value::Date(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
}

fn time(h: u32, m: u32) -> Value {
    Value::Time(NaiveTime::from_hms_opt(h, m, 0).expect("valid time"))
}

/// The configuration used by the date/time round-trip tests: a named `date`
/// parser, a pinned parser and renderer for the `time of day` column, and a
/// suppressed type annotation for times.
fn date_options(location: TypesLocation) -> FormatOptions {
    FormatOptions::new()
        .with_types_location(location)
        .with_named_parser("date", |text| {
            NaiveDate::parse_from_str(text, "%d %b %y")
                .map(Value::Date)
                .map_err(|e| Error::invalid_value(text, e))
        })
        .with_column_parser("time of day", |text| {
            NaiveTime::parse_from_str(text, "%H:%M")
                .map(Value::Time)
                .map_err(|e| Error::invalid_value(text, e))
        })
        .with_kind_renderer(Kind::Date, |value| match value {
            Value::Date(d) => d.format("%d %b %y").to_string(),
            other => other.to_string(),
        })
        .with_kind_name(Kind::Date, Some("date"))
        .with_kind_name(Kind::Time, None)
        .with_column_renderer("time of day", |value| match value {
            Value::Time(t) => t.format("%H:%M").to_string(),
            other => other.to_string(),
        })
}

mod grid {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_parse_single_row() {
        let grid = GridFormat::new();
        let actual = grid
            .parse(
                "
                +---+------+
                | x | y    |
                +---+------+
                | 1 | foo  |
                +---+------+
                ",
            )
            .unwrap();
        assert_eq!(actual.records, vec![attrs! { "x": 1, "y": "foo" }]);
    }

    #[test]
    fn test_simple_parse_multiple_rows() {
        let grid = GridFormat::new();
        let actual = grid
            .parse(
                "
                +---+------+
                | x | y    |
                +---+------+
                | 1 | foo  |
                | 2 |\" bar\"|
                | 3 |'baz '|
                +---+------+
                ",
            )
            .unwrap();
        assert_eq!(
            actual.records,
            vec![
                attrs! { "x": 1, "y": "foo" },
                attrs! { "x": 2, "y": " bar" },
                attrs! { "x": 3, "y": "baz " },
            ],
        );
    }

    #[test]
    fn test_parse_with_intrinsic_types_row() {
        let grid =
            GridFormat::with_options(FormatOptions::new().with_types_location(TypesLocation::Row));
        let actual = grid
            .parse(
                "
                +-----+------+
                | x   | y    |
                +-----+------+
                |float| str  |
                +-----+------+
                | 1   | foo  |
                | 2   | bar  |
                | 3   | baz  |
                +-----+------+
                ",
            )
            .unwrap();
        assert_eq!(
            actual.records,
            vec![
                attrs! { "x": 1.0, "y": "foo" },
                attrs! { "x": 2.0, "y": "bar" },
                attrs! { "x": 3.0, "y": "baz" },
            ],
        );
    }

    #[test]
    fn test_parse_with_types_in_header() {
        let grid = GridFormat::with_options(
            FormatOptions::new().with_types_location(TypesLocation::Header),
        );
        let actual = grid
            .parse(
                "
                +-----------+-----------+
                | x (float) | y (str)   |
                +-----------+-----------+
                | 1         | foo       |
                | 2         | bar       |
                | 3         | baz       |
                +-----------+-----------+
                ",
            )
            .unwrap();
        assert_eq!(
            actual.records,
            vec![
                attrs! { "x": 1.0, "y": "foo" },
                attrs! { "x": 2.0, "y": "bar" },
                attrs! { "x": 3.0, "y": "baz" },
            ],
        );
    }

    #[test]
    fn test_parse_with_explicit_named_parsers() {
        let grid = GridFormat::with_options(
            FormatOptions::new()
                .with_types_location(TypesLocation::Header)
                .with_named_parser("upper", |text| Ok(Value::from(text.to_uppercase()))),
        );
        let actual = grid
            .parse(
                "
                +-+--------+
                |x|y(upper)|
                +-+--------+
                |1| foo    |
                |2| bar    |
                |3| baz    |
                +-+--------+
                ",
            )
            .unwrap();
        assert_eq!(
            actual.records,
            vec![
                attrs! { "x": 1, "y": "FOO" },
                attrs! { "x": 2, "y": "BAR" },
                attrs! { "x": 3, "y": "BAZ" },
            ],
        );
    }

    #[test]
    fn test_parse_with_explicit_column_parsers() {
        let grid = GridFormat::with_options(
            FormatOptions::new()
                .with_column_parser("x", |text| {
                    text.parse::<i64>()
                        .map(Value::from)
                        .map_err(|e| Error::invalid_value(text, e))
                })
                .with_column_parser("y", |text| Ok(Value::from(text.to_uppercase()))),
        );
        let actual = grid
            .parse(
                "
                +-----+------+
                | x   | y    |
                +-----+------+
                | 1   | foo  |
                | 2   | bar  |
                | 3   | baz  |
                +-----+------+
                ",
            )
            .unwrap();
        assert_eq!(
            actual.records,
            vec![
                attrs! { "x": 1, "y": "FOO" },
                attrs! { "x": 2, "y": "BAR" },
                attrs! { "x": 3, "y": "BAZ" },
            ],
        );
    }

    #[test]
    fn test_parse_unknown_declared_type_aborts() {
        let grid =
            GridFormat::with_options(FormatOptions::new().with_types_location(TypesLocation::Row));
        let err = grid
            .parse(
                "
                +---+
                | x |
                +---+
                |odd|
                +---+
                | 1 |
                +---+
                ",
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnknownTypeName(name) if name == "odd"));
    }

    #[test]
    fn test_parse_literal_falls_back_to_string() {
        let grid = GridFormat::new();
        let actual = grid
            .parse(
                "
                +----+
                | x  |
                +----+
                | 1 2|
                +----+
                ",
            )
            .unwrap();
        assert_eq!(actual.records, vec![attrs! { "x": "1 2" }]);
    }

    #[test]
    fn test_parse_returns_column_widths() {
        let grid = GridFormat::new();
        let actual = grid
            .parse(concat!(
                "+-------------+----------------+---------+\n",
                "|city         |temp_lo         | temp_hi |\n",
                "+-------------+----------------+---------+\n",
                "|San Francisco|4| 5       |\n",
                "+-------------+----------------+---------+\n",
            ))
            .unwrap();
        assert_eq!(
            actual.records,
            vec![attrs! { "city": "San Francisco", "temp_lo": 4, "temp_hi": 5 }],
        );
        // temp_hi width has padding removed from 9, down to 7
        assert_eq!(actual.widths.get("city"), Some(&13));
        assert_eq!(actual.widths.get("temp_lo"), Some(&16));
        assert_eq!(actual.widths.get("temp_hi"), Some(&7));
    }

    #[test]
    fn test_render_simple_single_row() {
        let grid = GridFormat::new();
        let actual = grid.render(&[attrs! { "x": 1, "y": "foo" }]);
        assert_eq!(
            actual,
            concat!(
                "+---+-----+\n",
                "| x | y   |\n",
                "+---+-----+\n",
                "| 1 | foo |\n",
                "+---+-----+\n",
            ),
        );
    }

    #[test]
    fn test_render_no_padding() {
        let grid = GridFormat::with_options(FormatOptions::new().with_padding(0));
        let actual = grid.render(&[attrs! { "x": 1, "y": "foo" }]);
        assert_eq!(
            actual,
            concat!("+-+---+\n", "|x|y  |\n", "+-+---+\n", "|1|foo|\n", "+-+---+\n"),
        );
    }

    #[test]
    fn test_render_more_padding() {
        let grid = GridFormat::with_options(FormatOptions::new().with_padding(3));
        let actual = grid.render(&[attrs! { "x": 1, "y": "foo" }]);
        assert_eq!(
            actual,
            concat!(
                "+-------+---------+\n",
                "|   x   |   y     |\n",
                "+-------+---------+\n",
                "|   1   |   foo   |\n",
                "+-------+---------+\n",
            ),
        );
    }

    #[test]
    fn test_render_simple_multiple_rows() {
        let grid = GridFormat::new();
        let actual = grid.render(&[
            attrs! { "x": 1, "y": "foo" },
            attrs! { "x": 2, "y": " bar" },
            attrs! { "x": 3, "y": "baz " },
        ]);
        assert_eq!(
            actual,
            concat!(
                "+---+--------+\n",
                "| x | y      |\n",
                "+---+--------+\n",
                "| 1 | foo    |\n",
                "| 2 | ' bar' |\n",
                "| 3 | 'baz ' |\n",
                "+---+--------+\n",
            ),
        );
    }

    #[test]
    fn test_render_with_kind_renderers() {
        let grid = GridFormat::with_options(FormatOptions::new().with_kind_renderer(
            Kind::Bool,
            |value| {
                if value.as_bool() == Some(true) {
                    "yes".to_string()
                } else {
                    "no".to_string()
                }
            },
        ));
        let actual = grid.render(&[attrs! { "x": 1, "ok": true }, attrs! { "x": 2, "ok": false }]);
        assert_eq!(
            actual,
            concat!(
                "+---+-----+\n",
                "| x | ok  |\n",
                "+---+-----+\n",
                "| 1 | yes |\n",
                "| 2 | no  |\n",
                "+---+-----+\n",
            ),
        );
    }

    #[test]
    fn test_render_with_explicit_column_renderers() {
        let grid = GridFormat::with_options(
            FormatOptions::new()
                .with_column_renderer("x", |value| {
                    format!("{:.0}", value.as_f64().unwrap_or(0.0))
                })
                .with_column_renderer("y", |value| value.to_string().to_uppercase()),
        );
        let actual = grid.render(&[
            attrs! { "x": 1.1, "y": "foo" },
            attrs! { "x": 2.2, "y": "bar" },
            attrs! { "x": 3.3, "y": "baz" },
        ]);
        assert_eq!(
            actual,
            concat!(
                "+---+-----+\n",
                "| x | y   |\n",
                "+---+-----+\n",
                "| 1 | FOO |\n",
                "| 2 | BAR |\n",
                "| 3 | BAZ |\n",
                "+---+-----+\n",
            ),
        );
    }

    #[test]
    fn test_render_empty() {
        let grid =
            GridFormat::with_options(FormatOptions::new().with_types_location(TypesLocation::Row));
        let actual = grid.render(&[]);
        assert_eq!(actual, "+\n+\n");
    }

    #[test]
    fn test_render_with_reference() {
        let grid = GridFormat::new();
        let reference = vec![attrs! { "z": "X", "y": "XXXXX" }];
        let actual = grid.render_with(&[attrs! { "x": 1, "y": "foo" }], &reference);
        assert_eq!(
            actual,
            concat!(
                "+------+-------+---+\n",
                "| z    | y     | x |\n",
                "+------+-------+---+\n",
                "| null | foo   | 1 |\n",
                "+------+-------+---+\n",
            ),
        );
    }

    #[test]
    fn test_render_with_reference_and_padding() {
        let grid = GridFormat::with_options(FormatOptions::new().with_padding(3));
        let reference = grid
            .parse(concat!(
                "+-------+---------+\n",
                "|   z   |   y     |\n",
                "+-------+---------+\n",
                "|   X   |   XXX   |\n",
                "+-------+---------+\n",
            ))
            .unwrap();
        let actual = grid.render_with(&[attrs! { "y": "foo" }], &reference);
        assert_eq!(
            actual,
            concat!(
                "+----------+---------+\n",
                "|   z      |   y     |\n",
                "+----------+---------+\n",
                "|   null   |   foo   |\n",
                "+----------+---------+\n",
            ),
        );
    }

    #[test]
    fn test_render_with_empty_reference() {
        let grid = GridFormat::new();
        let reference: Vec<specimen::AttrMap> = vec![];
        let actual = grid.render_with(&[attrs! { "x": 1, "y": "foo" }], &reference);
        assert_eq!(
            actual,
            concat!(
                "+---+-----+\n",
                "| x | y   |\n",
                "+---+-----+\n",
                "| 1 | foo |\n",
                "+---+-----+\n",
            ),
        );
    }

    #[test]
    fn test_round_trip_values_simple() {
        let expected = vec![attrs! { "x": 1, "y": "foo" }];
        let grid = GridFormat::new();
        let rendered = grid.render(&expected);
        let actual = grid.parse(&rendered).unwrap();
        assert_eq!(actual.records, expected);
    }

    #[test]
    fn test_round_trip_values_multiple_rows() {
        let expected = vec![
            attrs! { "x": 1, "y": "foo" },
            attrs! { "x": 2, "y": " bar" },
            attrs! { "x": 3, "y": "baz " },
        ];
        let grid = GridFormat::new();
        let rendered = grid.render(&expected);
        let actual = grid.parse(&rendered).unwrap();
        assert_eq!(actual.records, expected);
    }

    #[test]
    fn test_round_trip_text_types_in_row() {
        let source = concat!(
            "+-------+-----+\n",
            "| x     | y   |\n",
            "+-------+-----+\n",
            "| float | str |\n",
            "+-------+-----+\n",
            "| 1.0   | foo |\n",
            "| 2.0   | bar |\n",
            "| 3.0   | baz |\n",
            "+-------+-----+\n",
        );
        let grid =
            GridFormat::with_options(FormatOptions::new().with_types_location(TypesLocation::Row));
        let parsed = grid.parse(source).unwrap();
        let rendered = grid.render(&parsed.records);
        assert_eq!(rendered, source);
    }

    #[test]
    fn test_round_trip_text_types_in_header() {
        let source = concat!(
            "+-----------+---------+\n",
            "| x (float) | y (str) |\n",
            "+-----------+---------+\n",
            "| 1.1       | foo     |\n",
            "| 2.2       | bar     |\n",
            "| 3.3       | baz     |\n",
            "+-----------+---------+\n",
        );
        let grid = GridFormat::with_options(
            FormatOptions::new().with_types_location(TypesLocation::Header),
        );
        let parsed = grid.parse(source).unwrap();
        let rendered = grid.render(&parsed.records);
        assert_eq!(rendered, source);
    }

    #[test]
    fn test_round_trip_explicit_parse_and_render() {
        let source = concat!(
            "+--------------+-------------+------------+\n",
            "| start (date) | time of day | end (date) |\n",
            "+--------------+-------------+------------+\n",
            "| 27 May 04    | 09:00       | 01 Jun 04  |\n",
            "| 02 Jun 04    | 11:02       | 02 Jul 04  |\n",
            "+--------------+-------------+------------+\n",
        );
        let grid = GridFormat::with_options(date_options(TypesLocation::Header));
        let parsed = grid.parse(source).unwrap();
        assert_eq!(
            parsed.records,
            vec![
                attrs! {
                    "start": date(2004, 5, 27),
                    "time of day": time(9, 0),
                    "end": date(2004, 6, 1),
                },
                attrs! {
                    "start": date(2004, 6, 2),
                    "time of day": time(11, 2),
                    "end": date(2004, 7, 2),
                },
            ],
        );
        let rendered = grid.render(&parsed.records);
        assert_eq!(rendered, source);
    }

    #[test]
    fn test_round_trip_types_in_row_with_suppressed_name() {
        let source = concat!(
            "+-----------+-------------+-----------+\n",
            "| start     | time of day | end       |\n",
            "+-----------+-------------+-----------+\n",
            "| date      |             | date      |\n",
            "+-----------+-------------+-----------+\n",
            "| 27 May 04 | 09:00       | 01 Jun 04 |\n",
            "| 02 Jun 04 | 11:02       | 02 Jul 04 |\n",
            "+-----------+-------------+-----------+\n",
        );
        let grid = GridFormat::with_options(date_options(TypesLocation::Row));
        let parsed = grid.parse(source).unwrap();
        assert_eq!(
            parsed.records,
            vec![
                attrs! {
                    "start": date(2004, 5, 27),
                    "time of day": time(9, 0),
                    "end": date(2004, 6, 1),
                },
                attrs! {
                    "start": date(2004, 6, 2),
                    "time of day": time(11, 2),
                    "end": date(2004, 7, 2),
                },
            ],
        );
        let rendered = grid.render(&parsed.records);
        assert_eq!(rendered, source);
    }

    #[test]
    fn test_round_trip_explicit_minimum_column_widths() {
        let source = concat!(
            "+-------+------------+\n",
            "| x     | y          |\n",
            "+-------+------------+\n",
            "| 1.0   | foo        |\n",
            "| 2.0   | bar        |\n",
            "| 3.0   | baz        |\n",
            "+-------+------------+\n",
        );
        let grid = GridFormat::with_options(
            FormatOptions::new()
                .with_minimum_width("x", 5)
                .with_minimum_width("y", 10),
        );
        let parsed = grid.parse(source).unwrap();
        let rendered = grid.render(&parsed.records);
        assert_eq!(rendered, source);
    }

    #[test]
    fn test_render_against_parsed_reference_preserves_widths() {
        let source = concat!(
            "+------+--------+\n",
            "| id   | name   |\n",
            "+------+--------+\n",
            "| 1    | Alice  |\n",
            "+------+--------+\n",
        );
        let grid = GridFormat::new();
        let parsed = grid.parse(source).unwrap();
        let rendered = grid.render_with(&parsed.records, &parsed);
        assert_eq!(rendered, source);
    }
}

mod csv {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal() {
        let format = CsvFormat::new();
        let actual = format.parse("x,y\n1,foo\n").unwrap();
        assert_eq!(actual, vec![attrs! { "x": 1, "y": "foo" }]);
    }

    #[test]
    fn test_render_minimal() {
        let format = CsvFormat::new();
        let actual = format.render(&[attrs! { "x": 1, "y": "foo" }]);
        assert_eq!(actual, "x,y\r\n1,foo\r\n");
    }

    #[test]
    fn test_render_empty() {
        let format =
            CsvFormat::with_options(FormatOptions::new().with_types_location(TypesLocation::Row));
        let actual = format.render(&[]);
        assert_eq!(actual, "");
    }

    #[test]
    fn test_render_with_reference() {
        let format = CsvFormat::new();
        let reference = vec![attrs! { "z": 0, "y": 0, "x": 0 }];
        let actual = format.render_with(&[attrs! { "x": 1, "y": "foo" }], &reference);
        assert_eq!(actual, "z,y,x\r\nnull,foo,1\r\n");
    }

    #[test]
    fn test_render_with_empty_reference() {
        let format = CsvFormat::new();
        let actual = format.render_with(&[attrs! { "x": 1, "y": "foo" }], &[]);
        assert_eq!(actual, "x,y\r\n1,foo\r\n");
    }

    #[test]
    fn test_round_trip_minimal() {
        let source = "x,y\r\n1,foo\r\n";
        let format = CsvFormat::new();
        let parsed = format.parse(source).unwrap();
        assert_eq!(parsed, vec![attrs! { "x": 1, "y": "foo" }]);
        assert_eq!(format.render(&parsed), source);
    }

    #[test]
    fn test_round_trip_whitespace_in_values() {
        let source = "x,y\r\n1,foo\r\n2,' bar'\r\n3,'baz '\r\n";
        let format = CsvFormat::new();
        let parsed = format.parse(source).unwrap();
        assert_eq!(
            parsed,
            vec![
                attrs! { "x": 1, "y": "foo" },
                attrs! { "x": 2, "y": " bar" },
                attrs! { "x": 3, "y": "baz " },
            ],
        );
        assert_eq!(format.render(&parsed), source);
    }

    #[test]
    fn test_round_trip_types_in_row() {
        let source = concat!(
            "start,time of day,end\r\n",
            "date,,date\r\n",
            "27 May 04,09:00,01 Jun 04\r\n",
            "02 Jun 04,11:02,02 Jul 04\r\n",
        );
        let format = CsvFormat::with_options(date_options(TypesLocation::Row));
        let parsed = format.parse(source).unwrap();
        assert_eq!(
            parsed,
            vec![
                attrs! {
                    "start": date(2004, 5, 27),
                    "time of day": time(9, 0),
                    "end": date(2004, 6, 1),
                },
                attrs! {
                    "start": date(2004, 6, 2),
                    "time of day": time(11, 2),
                    "end": date(2004, 7, 2),
                },
            ],
        );
        assert_eq!(format.render(&parsed), source);
    }

    #[test]
    fn test_round_trip_types_in_header() {
        let source = concat!(
            "start (date),time of day,end (date)\r\n",
            "27 May 04,09:00,01 Jun 04\r\n",
            "02 Jun 04,11:02,02 Jul 04\r\n",
        );
        let format = CsvFormat::with_options(date_options(TypesLocation::Header));
        let parsed = format.parse(source).unwrap();
        assert_eq!(
            parsed,
            vec![
                attrs! {
                    "start": date(2004, 5, 27),
                    "time of day": time(9, 0),
                    "end": date(2004, 6, 1),
                },
                attrs! {
                    "start": date(2004, 6, 2),
                    "time of day": time(11, 2),
                    "end": date(2004, 7, 2),
                },
            ],
        );
        assert_eq!(format.render(&parsed), source);
    }
}
