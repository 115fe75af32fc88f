//! Integration tests for validation passes over records, maps, JSON and
//! single values.

use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use zvalid::prelude::*;
use zvalid::{ConfigError, Locale, Messages};

#[derive(Record)]
struct Signup {
    password: String,
    #[zvalid(rename = "rePassword")]
    re_password: Option<String>,
}

fn signup_rules() -> RuleSet {
    RuleSet::new()
        .add("password", |r| r.required().min_length(6).max_length(16))
        .add("rePassword", |r| r.required().equal_field("password"))
}

#[test]
fn record_with_absent_confirmation() {
    let signup = Signup {
        password: "123456789".into(),
        re_password: None,
    };

    let err = validate_record(&signup, &signup_rules()).unwrap_err();
    assert_eq!(
        err.details(),
        &[Violation::new("rePassword", "rePassword is required")]
    );
}

#[test]
fn record_with_matching_confirmation() {
    let signup = Signup {
        password: "123456789".into(),
        re_password: Some("123456789".into()),
    };
    assert!(validate_record(&signup, &signup_rules()).is_ok());
}

#[test]
fn map_with_mismatched_confirmation() {
    let form: HashMap<String, String> = HashMap::from([
        ("name".into(), "zrcoder".into()),
        ("password".into(), "123456789".into()),
        ("rePassword".into(), "12345678".into()),
    ]);
    let rules = RuleSet::new()
        .add("name", |r| r.required())
        .add("password", |r| r.required().min_length(6).max_length(16))
        .add("rePassword", |r| r.required().equal_field("password"));

    let err = validate_map(&form, &rules).unwrap_err();
    assert_eq!(
        err.details(),
        &[Violation::new("rePassword", "rePassword must equal password")]
    );
}

#[test]
fn map_missing_the_referenced_field_matches_record() {
    let expected = [
        Violation::new("password", "password is required"),
        Violation::new("rePassword", "rePassword must equal password"),
    ];

    let form: HashMap<String, String> =
        HashMap::from([("rePassword".into(), "12345678".into())]);
    let err = validate_map(&form, &signup_rules()).unwrap_err();
    assert_eq!(err.details(), &expected);

    let err = validate_json(&json!({"rePassword": "12345678"}), &signup_rules()).unwrap_err();
    assert_eq!(err.details(), &expected);

    let signup = Signup {
        password: String::new(),
        re_password: Some("12345678".into()),
    };
    let err = validate_record(&signup, &signup_rules()).unwrap_err();
    assert_eq!(err.details(), &expected);
}

#[test]
fn shared_alias_is_a_config_error() {
    let rules = RuleSet::new()
        .rule(rule("password").alias("secret").required())
        .rule(rule("rePassword").alias("secret").required());
    let err = validate_json(&json!({}), &rules).unwrap_err();
    assert_eq!(
        err.as_config(),
        Some(&ConfigError::AmbiguousName {
            name: "secret".into(),
            first: "password".into(),
            second: "rePassword".into(),
        })
    );
}

#[test]
fn single_value_too_short() {
    let err = validate_value("abc", &rule("username").min_length(6)).unwrap_err();
    assert_eq!(
        err.details(),
        &[Violation::new(
            "username",
            "username must be at least 6 characters long"
        )]
    );
}

#[test]
fn single_value_passes_full_chain() {
    let rule = rule("username").required().min_length(6).max_length(16);
    assert!(validate_value("zrcoder123", &rule).is_ok());
}

#[test]
fn chain_stops_at_first_failure() {
    let rule = rule("password").required().min_length(6).max_length(16);
    let err = validate_value("12345", &rule).unwrap_err();
    assert_eq!(err.details().len(), 1);
    assert_eq!(
        err.details()[0].message,
        "password must be at least 6 characters long"
    );
}

#[test]
fn every_rule_is_reported() {
    let form = json!({
        "email": "not-an-email",
        "age": 12,
        "site": "ht tp://bad",
        "role": "root",
        "birthday": "2024/01/02",
        "addr": "300.1.1.1",
    });
    let rules = RuleSet::new()
        .add("email", |r| r.required().email())
        .add("age", |r| r.min(18.0).max(120.0))
        .add("site", |r| r.url())
        .add("role", |r| r.one_of(["admin", "user"]))
        .add("birthday", |r| r.date_format("%Y-%m-%d"))
        .add("addr", |r| r.ip())
        .add("nickname", |r| r.required());

    let err = validate_json(&form, &rules).unwrap_err();
    let fields: Vec<_> = err.details().iter().map(|v| v.field.as_str()).collect();
    assert_eq!(
        fields,
        vec!["email", "age", "site", "role", "birthday", "addr", "nickname"]
    );
    assert_eq!(err.details()[1].message, "age must not be less than 18");
    assert_eq!(err.details()[3].message, "role must be one of: [admin, user]");
}

#[test]
fn valid_json_form() {
    let form = json!({
        "email": "dev@example.com",
        "age": 30,
        "site": "https://example.com/docs",
        "role": "admin",
        "birthday": "1990-05-17",
        "addr": "::1",
    });
    let rules = RuleSet::new()
        .add("email", |r| r.required().email())
        .add("age", |r| r.min(18.0).max(120.0))
        .add("site", |r| r.url())
        .add("role", |r| r.one_of(["admin", "user"]))
        .add("birthday", |r| r.date_format("%Y-%m-%d"))
        .add("addr", |r| r.ip());
    assert!(validate_json(&form, &rules).is_ok());
}

#[test]
fn custom_messages_take_precedence() {
    let rules = RuleSet::new().add("username", |r| {
        r.required()
            .message("please pick a username")
            .min_length(6)
            .message("usernames are at least 6 characters")
    });

    let empty: BTreeMap<String, String> = BTreeMap::new();
    let err = validate_map(&empty, &rules).unwrap_err();
    assert_eq!(err.details()[0].message, "please pick a username");

    let short = BTreeMap::from([("username".to_string(), "abc".to_string())]);
    let err = validate_map(&short, &rules).unwrap_err();
    assert_eq!(err.details()[0].message, "usernames are at least 6 characters");
}

#[test]
fn alias_names_the_violation() {
    let rules = RuleSet::new().rule(rule("rePassword").alias("confirmation").required());
    let err = validate_json(&json!({}), &rules).unwrap_err();
    assert_eq!(
        err.details(),
        &[Violation::new("confirmation", "confirmation is required")]
    );
}

#[test]
fn payload_shape() {
    let err = validate_json(&json!({}), &RuleSet::new().add("name", |r| r.required()))
        .unwrap_err();
    let payload = serde_json::to_value(err.as_validation().unwrap()).unwrap();
    assert_eq!(
        payload,
        json!({
            "summary": "validation failed",
            "details": [{"field": "name", "msg": "name is required"}]
        })
    );
}

#[test]
fn type_mismatch_is_a_violation() {
    let form = json!({"age": "thirty", "name": 7});
    let rules = RuleSet::new()
        .add("age", |r| r.min(18.0).message("too young"))
        .add("name", |r| r.min_length(2));

    let err = validate_json(&form, &rules).unwrap_err();
    assert_eq!(
        err.details(),
        &[
            Violation::new("age", "age must be of type number, found string"),
            Violation::new("name", "name must be of type string, found integer"),
        ]
    );
}

#[test]
fn record_rules_must_name_declared_fields() {
    let rules = RuleSet::new().add("passwd", |r| r.required());
    let signup = Signup {
        password: "x".into(),
        re_password: None,
    };
    let err = validate_record(&signup, &rules).unwrap_err();
    assert!(matches!(
        err.as_config(),
        Some(ConfigError::UnknownField { field, .. }) if field == "passwd"
    ));
    assert!(rules.for_record::<Signup>().is_err());
}

#[test]
fn record_references_are_checked_before_the_pass() {
    let rules = RuleSet::new().add("rePassword", |r| r.equal_field("pwd"));
    assert_eq!(
        rules.for_record::<Signup>().unwrap_err(),
        ConfigError::UnresolvedReference {
            field: "rePassword".into(),
            reference: "pwd".into(),
        }
    );
}

#[test]
fn invalid_pattern_is_a_config_error() {
    let rules = RuleSet::new()
        .add("name", |r| r.required())
        .add("code", |r| r.pattern("[unclosed"));
    let err = validate_json(&json!({"code": "x"}), &rules).unwrap_err();
    assert!(err.details().is_empty());
    assert!(matches!(
        err.as_config(),
        Some(ConfigError::InvalidPattern { pattern, .. }) if pattern == "[unclosed"
    ));
}

#[test]
fn chinese_catalog() {
    let validator = Validator::new(ValidatorConfig::new().locale(Locale::Chinese));
    let form = json!({"name": "", "password": "123"});
    let rules = RuleSet::new()
        .add("name", |r| r.required())
        .add("password", |r| r.min_length(6));

    let err = validator.validate_json(&form, &rules).unwrap_err();
    let err = err.as_validation().unwrap();
    assert_eq!(err.summary, "参数校验错误");
    assert_eq!(err.details[0].message, "name 不能为空");
    assert_eq!(err.details[1].message, "password 最小长度为 6");
    assert_eq!(Locale::Chinese.catalog().summary(), "参数校验错误");
}

#[test]
fn rule_sets_are_shared_across_threads() {
    let rules = std::sync::Arc::new(signup_rules());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rules = rules.clone();
            std::thread::spawn(move || {
                let password = "x".repeat(6 + i);
                let form = HashMap::from([
                    ("password".to_string(), password.clone()),
                    ("rePassword".to_string(), password),
                ]);
                validate_map(&form, &rules)
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}
