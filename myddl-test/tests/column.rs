use chrono::{DateTime, FixedOffset, Utc};
use myddl::{
    error::Error,
    schema::{Column, Ddl, SqlType, Value},
};
use myddl_test::init;

const INTEGER_TYPES: [&str; 5] = ["tinyint", "smallint", "mediumint", "int", "bigint"];

fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

#[test]
fn test_integer_bounds() {
    init();

    for ty in INTEGER_TYPES {
        for unsigned in [false, true] {
            let mut col = Column::integer("n", ty).unwrap();
            col.set_unsigned(unsigned).unwrap();

            let (min, max) = SqlType::parse(SqlType::Int.family(), ty)
                .unwrap()
                .int_bounds(unsigned)
                .unwrap();

            for v in [min, min + 1, max - 1, max] {
                let expected = if unsigned {
                    Value::U64(v as u64)
                } else {
                    Value::I64(v as i64)
                };
                assert_eq!(col.check(v.to_string()).unwrap(), Some(expected), "{} {}", ty, v);
            }

            for v in [min - 1, max + 1] {
                assert_eq!(
                    col.check(v.to_string()).unwrap_err(),
                    Error::IntRange {
                        min,
                        max,
                        value: v.to_string()
                    },
                    "{} {}",
                    ty,
                    v
                );
            }
        }
    }
}

#[test]
fn test_bigint_extremes() {
    let mut col = Column::integer("n", "bigint").unwrap();
    assert_eq!(col.check(i64::MIN).unwrap(), Some(Value::I64(i64::MIN)));
    assert!(col.check(u64::MAX).is_err());

    col.set_unsigned(true).unwrap();
    assert_eq!(col.check(u64::MAX).unwrap(), Some(Value::U64(u64::MAX)));
    assert!(col.check(-1).is_err());

    // Does not fit any native integer
    assert!(matches!(
        col.check("123456789012345678901234567890123456789012"),
        Err(Error::IntRange { .. })
    ));
}

#[test]
fn test_integer_type() {
    let col = Column::integer("n", "int").unwrap();
    assert_eq!(col.check(" 42 ").unwrap(), Some(Value::I64(42)));
    assert_eq!(col.check(true).unwrap(), Some(Value::I64(1)));
    assert_eq!(col.check(3.0).unwrap(), Some(Value::I64(3)));
    assert_eq!(col.check("").unwrap(), None);
    assert_eq!(col.check(Value::Null).unwrap(), None);
    assert_eq!(col.check("4.2").unwrap_err(), Error::IntType("4.2".into()));
    assert_eq!(col.check("abc").unwrap_err(), Error::IntType("abc".into()));
    assert!(matches!(col.check(4.5), Err(Error::IntType(_))));
}

#[test]
fn test_decimal_bounds() {
    init();

    // (precision, scale) -> exclusive bound 10^(precision - scale)
    for (precision, scale) in [(5, 2), (3, 0), (10, 4), (4, 4)] {
        let col = Column::decimal("d", precision, scale).unwrap();
        let max = 10f64.powi((precision - scale) as i32);
        let min = -max;
        let step = 10f64.powi(-(scale as i32));

        for v in [min + step, max - step] {
            assert!(
                matches!(col.check(v).unwrap(), Some(Value::F64(s)) if (s - v).abs() < step / 2.0),
                "{}",
                v
            );
        }

        for v in [min - step, min, max, max + step] {
            assert_eq!(
                col.check(v).unwrap_err(),
                Error::FloatRange {
                    min,
                    max,
                    value: v.to_string()
                },
                "({}, {}) {}",
                precision,
                scale,
                v
            );
        }
    }
}

#[test]
fn test_decimal_grid() {
    let col = Column::decimal("d", 5, 2).unwrap();
    for (v, ok) in [
        (-1001.0, false),
        (-1000.0, false),
        (-999.0, true),
        (999.0, true),
        (1000.0, false),
        (1001.0, false),
    ] {
        assert_eq!(col.check(v).is_ok(), ok, "{}", v);
    }
}

#[test]
fn test_float_without_precision() {
    let col = Column::float("f", "float", None).unwrap();
    assert!(col.check(1e38).is_ok());
    assert!(col.check(f32::MAX as f64).is_err());
    assert!(col.check(-(f32::MAX as f64)).is_err());

    let col = Column::float("f", "double", None).unwrap();
    assert!(col.check(1e300).is_ok());
    assert!(col.check(f64::MAX).is_err());
    assert_eq!(col.build_create(), "`f` double NOT NULL");
}

#[test]
fn test_unsigned_decimal() {
    let mut col = Column::decimal("d", 5, 2).unwrap();
    col.set_unsigned(true).unwrap();
    assert_eq!(col.check(0).unwrap(), Some(Value::F64(0.0)));
    assert_eq!(
        col.check(-1).unwrap_err(),
        Error::FloatRange {
            min: 0.0,
            max: 1000.0,
            value: "-1".into()
        }
    );
    assert_eq!(col.build_create(), "`d` decimal(5,2) UNSIGNED NOT NULL");
}

#[test]
fn test_string_length() {
    for (col, max) in [
        (Column::char("s", 10).unwrap(), 10),
        (Column::varchar("s", 300).unwrap(), 300),
        (Column::text("s", "tinytext").unwrap(), 255),
    ] {
        let value = "x".repeat(max);
        assert_eq!(col.check(value.as_str()).unwrap(), Some(Value::from(value)));

        assert_eq!(
            col.check("x".repeat(max + 1)).unwrap_err(),
            Error::StringLength {
                ty: col.sql_type().to_string(),
                max: max as u64,
                length: max as u64 + 1
            }
        );
    }

    assert_eq!(
        Column::char("s", 256).unwrap_err(),
        Error::InvalidLength {
            ty: "char".into(),
            max: 255,
            length: 256
        }
    );
    assert_eq!(Column::text("s", "longtext").unwrap().length(), Some(4_294_967_295));
}

#[test]
fn test_invalid_type() {
    assert_eq!(
        Column::integer("n", "varchar").unwrap_err(),
        Error::InvalidType {
            family: "integer",
            ty: "varchar".into()
        }
    );
    assert!(matches!(Column::text("t", "blob"), Err(Error::InvalidType { .. })));
    assert!(matches!(
        Column::temporal("t", "date"),
        Err(Error::InvalidType { family: "datetime", .. })
    ));
    assert_eq!(Column::integer("n", "INTEGER").unwrap().sql_type(), SqlType::Int);
}

#[test]
fn test_auto_increment_conflict() {
    let conflict = |attribute| Error::AutoIncrementConflict {
        column: "id".into(),
        attribute,
    };

    // nullable, then auto increment
    let mut col = Column::integer("id", "int").unwrap();
    col.set_nullable(true).unwrap();
    assert_eq!(col.set_auto_increment(true).unwrap_err(), conflict("nullable"));
    assert!(!col.is_auto_increment());

    // auto increment, then nullable
    let mut col = Column::integer("id", "int").unwrap();
    col.set_auto_increment(true).unwrap();
    assert_eq!(col.set_nullable(true).unwrap_err(), conflict("nullable"));
    assert!(!col.is_nullable());

    // default, then auto increment
    let mut col = Column::integer("id", "int").unwrap();
    col.set_default(1).unwrap();
    assert_eq!(col.set_auto_increment(true).unwrap_err(), conflict("default"));
    assert!(!col.is_auto_increment());

    // auto increment, then default
    let mut col = Column::integer("id", "int").unwrap();
    col.set_auto_increment(true).unwrap();
    assert_eq!(col.set_default(1).unwrap_err(), conflict("default"));
    assert!(!col.has_default());

    // Clearing the default is always allowed
    col.set_default(Value::Null).unwrap();
}

#[test]
fn test_default() {
    let mut col = Column::integer("n", "smallint").unwrap();
    assert!(!col.has_default());

    col.set_default("12").unwrap();
    assert!(col.has_default());
    assert_eq!(col.default(), col.check("12").unwrap().as_ref());

    // A failed setter keeps the previous default
    assert!(col.set_default(40_000).is_err());
    assert_eq!(col.default(), Some(&Value::I64(12)));

    col.set_default("").unwrap();
    assert!(!col.has_default());
    assert_eq!(col.default(), None);
}

#[test]
fn test_recheck_default() {
    let mut col = Column::varchar("s", 10).unwrap();
    col.set_default("abcdefgh").unwrap();
    assert!(matches!(col.set_length(5), Err(Error::StringLength { .. })));
    assert_eq!(col.length(), Some(10));
    col.set_length(8).unwrap();
    assert_eq!(col.build_create(), r#"`s` varchar(8) NOT NULL DEFAULT "abcdefgh""#);

    let mut col = Column::integer("n", "int").unwrap();
    col.set_default(-1).unwrap();
    assert_eq!(
        col.set_unsigned(true).unwrap_err(),
        Error::IntRange {
            min: 0,
            max: u32::MAX as i128,
            value: "-1".into()
        }
    );
    assert!(!col.is_unsigned());

    let mut col = Column::decimal("d", 6, 2).unwrap();
    col.set_default(1234.5).unwrap();
    assert!(matches!(col.set_precision(5, 2), Err(Error::FloatRange { .. })));
    assert_eq!(col.precision(), Some((6, 2)));
}

#[test]
fn test_invalid_attribute() {
    let mut col = Column::varchar("name", 10).unwrap();
    assert_eq!(
        col.set_unsigned(true).unwrap_err(),
        Error::InvalidAttribute {
            column: "name".into(),
            ty: "varchar".into(),
            attribute: "unsigned"
        }
    );
    assert!(col.set_auto_increment(true).is_err());
    assert!(col.set_precision(5, 2).is_err());
    assert!(col.set_on_update_current(true).is_err());

    let mut col = Column::integer("n", "int").unwrap();
    assert!(col.set_charset("utf8").is_err());
    assert!(col.set_length(5).is_err());
}

#[test]
fn test_encoding() {
    let mut col = Column::text("body", "text").unwrap();
    col.set_binary(true)
        .unwrap()
        .set_charset("utf8mb4")
        .unwrap()
        .set_collation("utf8mb4_bin")
        .unwrap()
        .set_nullable(true)
        .unwrap()
        .set_comment(r#"a "quoted" \ comment"#)
        .unwrap();

    assert!(col.is_binary());
    assert_eq!(
        col.build_create(),
        r#"`body` text BINARY CHARACTER SET utf8mb4 COLLATE utf8mb4_bin COMMENT "a \"quoted\" \\ comment""#
    );
}

#[test]
fn test_timestamp() {
    let mut col = Column::timestamp("updated").unwrap();
    col.set_default("CURRENT_TIMESTAMP")
        .unwrap()
        .set_on_update_current(true)
        .unwrap();

    assert!(col.is_default_current());
    assert!(!col.has_default());
    assert_eq!(
        col.build_create(),
        "`updated` timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
    );

    // A literal default replaces the current timestamp
    col.set_default("2021-06-01 12:00:00").unwrap();
    assert!(!col.is_default_current());
    assert_eq!(
        col.default(),
        Some(&Value::DateTime(utc("2021-06-01T12:00:00Z")))
    );
}

#[test]
fn test_time_zone() {
    let zone = FixedOffset::east_opt(8 * 3600).unwrap();

    let mut col = Column::datetime("at").unwrap();
    assert_eq!(col.time_zone(), Some(FixedOffset::east_opt(0).unwrap()));
    col.set_time_zone(zone)
        .unwrap()
        .set_default("2020-01-02 08:00:00")
        .unwrap();

    // Stored in UTC, rendered in the column zone
    assert_eq!(
        col.default(),
        Some(&Value::DateTime(utc("2020-01-02T00:00:00Z")))
    );
    assert_eq!(
        col.default_local().unwrap().to_rfc3339(),
        "2020-01-02T08:00:00+08:00"
    );
    assert_eq!(
        col.build_create(),
        r#"`at` datetime NOT NULL DEFAULT "2020-01-02 08:00:00""#
    );

    assert_eq!(
        col.check("yesterday").unwrap_err(),
        Error::DateTimeType("yesterday".into())
    );
    assert!(Column::integer("n", "int")
        .unwrap()
        .set_time_zone(zone)
        .is_err());
}

#[test]
fn test_render_is_pure() {
    let mut col = Column::decimal("price", 10, 2).unwrap();
    col.set_default("3.5").unwrap();

    let sql = col.build_create();
    assert_eq!(sql, r#"`price` decimal(10,2) NOT NULL DEFAULT "3.50""#);
    assert_eq!(col.build_create(), sql);
    assert_eq!(col.build_drop(), "DROP COLUMN `price`");
}

#[test]
fn test_decimal_default_rounding() {
    let mut col = Column::decimal("price", 5, 2).unwrap();
    col.set_default(12.5).unwrap();

    assert_eq!(
        col.set_default(999.999).unwrap_err(),
        Error::FloatRange {
            min: -1000.0,
            max: 1000.0,
            value: "999.999".into()
        }
    );
    assert_eq!(col.default(), Some(&Value::F64(12.5)));

    col.set_default(1.234).unwrap();
    assert_eq!(col.default(), Some(&Value::F64(1.23)));
    assert_eq!(col.build_create(), r#"`price` decimal(5,2) NOT NULL DEFAULT "1.23""#);

    // Narrowing the scale re-rounds the stored default
    col.set_precision(4, 1).unwrap();
    assert_eq!(col.default(), Some(&Value::F64(1.2)));
    assert_eq!(col.build_create(), r#"`price` decimal(4,1) NOT NULL DEFAULT "1.2""#);
}

#[test]
fn test_invalid_name() {
    assert!(matches!(Column::integer("", "int"), Err(Error::InvalidName(_))));
    assert!(matches!(
        Column::integer(&"c".repeat(65), "int"),
        Err(Error::InvalidName(_))
    ));
    assert!(Column::integer(&"c".repeat(64), "int").is_ok());
}
