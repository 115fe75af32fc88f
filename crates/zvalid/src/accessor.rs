//! Uniform field lookup over record-shaped and map-shaped containers.

use crate::value::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Field-resolution capability of a record type.
///
/// Usually derived with `#[derive(Record)]`; can be written by hand.
///
/// ```rust,ignore
/// use zvalid::{Record, Value};
///
/// struct Login {
///     user: String,
///     password: Option<String>,
/// }
///
/// impl Record for Login {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "user" => Some(self.user.clone().into()),
///             "password" => Some(self.password.clone().into()),
///             _ => None,
///         }
///     }
///
///     fn declared_fields() -> &'static [&'static str] {
///         &["user", "password"]
///     }
/// }
/// ```
pub trait Record {
    /// Current value of a declared field, or `None` for unknown names.
    ///
    /// Optional members must be returned as `Value::Optional`; the accessor
    /// performs the unwrapping.
    fn field(&self, name: &str) -> Option<Value>;

    /// Names accepted by [`Record::field`].
    fn declared_fields() -> &'static [&'static str]
    where
        Self: Sized;

    /// Container name used in diagnostics.
    fn record_name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}

/// Key lookup over a string-keyed mapping.
pub trait FieldMap {
    /// Value stored under `key`, taken as is.
    fn get_value(&self, key: &str) -> Option<Value>;

    fn contains(&self, key: &str) -> bool;
}

impl<V, S> FieldMap for HashMap<String, V, S>
where
    V: Clone + Into<Value>,
    S: BuildHasher,
{
    fn get_value(&self, key: &str) -> Option<Value> {
        self.get(key).map(|v| v.clone().into())
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl<V> FieldMap for BTreeMap<String, V>
where
    V: Clone + Into<Value>,
{
    fn get_value(&self, key: &str) -> Option<Value> {
        self.get(key).map(|v| v.clone().into())
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl FieldMap for serde_json::Map<String, serde_json::Value> {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.get(key).map(Value::from)
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

#[derive(Clone, Copy)]
enum Target<'a> {
    Record(&'a dyn Record),
    Map(&'a dyn FieldMap),
    Empty,
}

/// Read-only view of one container for the duration of one pass.
///
/// Passed to every provider so cross-field checks see the same live data
/// the rule itself was resolved from.
#[derive(Clone, Copy)]
pub struct Accessor<'a> {
    target: Target<'a>,
    names: Option<&'a HashMap<String, String>>,
}

impl<'a> Accessor<'a> {
    /// Accessor over a record.
    pub fn record(record: &'a dyn Record) -> Self {
        Self {
            target: Target::Record(record),
            names: None,
        }
    }

    /// Accessor over a string-keyed map.
    pub fn map(map: &'a dyn FieldMap) -> Self {
        Self {
            target: Target::Map(map),
            names: None,
        }
    }

    /// Accessor that resolves nothing, for single-value validation.
    pub fn empty() -> Self {
        Self {
            target: Target::Empty,
            names: None,
        }
    }

    /// Let cross-field lookups go through the names of the active rules
    /// (source field or alias -> source field).
    pub fn with_rule_names(mut self, names: &'a HashMap<String, String>) -> Self {
        self.names = Some(names);
        self
    }

    /// Shape of the bound container, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self.target {
            Target::Record(_) => "record",
            Target::Map(_) => "map",
            Target::Empty => "value",
        }
    }

    /// Resolve a field by its exact container name.
    ///
    /// Records have one optional level removed: a null optional member is
    /// reported as absent. Map values are returned untouched.
    pub fn resolve(&self, name: &str) -> Option<Value> {
        match self.target {
            Target::Record(record) => record.field(name).and_then(Value::unwrap_optional),
            Target::Map(map) => map.get_value(name),
            Target::Empty => None,
        }
    }

    /// Whether the container knows `name` at all, present or not.
    pub fn declares(&self, name: &str) -> bool {
        match self.target {
            Target::Record(record) => record.field(name).is_some(),
            Target::Map(map) => map.contains(name),
            Target::Empty => false,
        }
    }

    /// Whether a cross-field reference to `name` can be resolved: the
    /// container declares it or an active rule answers to it.
    pub fn knows(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Resolve a cross-field reference.
    ///
    /// The name is tried as a container field first and then as the name
    /// of an active rule. Returns `None` when neither is known; the inner
    /// option is the resolved value, absent when the field holds nothing.
    ///
    /// A map declares every field a rule is written for, so a missing key
    /// behind a rule name is absent data rather than an unknown field.
    pub fn lookup(&self, reference: &str) -> Option<Option<Value>> {
        if self.declares(reference) {
            return Some(self.resolve(reference));
        }
        let source = self.names?.get(reference)?;
        match self.target {
            Target::Record(_) if !self.declares(source) => None,
            _ => Some(self.resolve(source)),
        }
    }
}

impl std::fmt::Debug for Accessor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accessor")
            .field("shape", &self.shape())
            .field("rule_names", &self.names.map(|n| n.len()).unwrap_or(0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Account {
        name: String,
        nickname: Option<String>,
        backup: Option<Option<String>>,
    }

    impl Record for Account {
        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "name" => Some(self.name.clone().into()),
                "nickname" => Some(self.nickname.clone().into()),
                "backup" => Some(self.backup.clone().into()),
                _ => None,
            }
        }

        fn declared_fields() -> &'static [&'static str] {
            &["name", "nickname", "backup"]
        }
    }

    fn account() -> Account {
        Account {
            name: "zr".into(),
            nickname: None,
            backup: Some(None),
        }
    }

    #[test]
    fn record_resolution_unwraps_one_level() {
        let acc = account();
        let accessor = Accessor::record(&acc);

        assert_eq!(accessor.resolve("name"), Some(Value::from("zr")));
        assert_eq!(accessor.resolve("nickname"), None);
        assert!(accessor.declares("nickname"));
        // Some(None) loses only the outer wrapper.
        assert_eq!(accessor.resolve("backup"), Some(Value::Optional(None)));
        assert_eq!(accessor.resolve("missing"), None);
        assert!(!accessor.declares("missing"));
    }

    #[test]
    fn map_resolution_keeps_values_as_is() {
        let mut map: HashMap<String, Value> = HashMap::new();
        map.insert("nick".into(), Value::from(None::<String>));
        map.insert("name".into(), Value::from("zr"));
        let accessor = Accessor::map(&map);

        assert_eq!(accessor.resolve("nick"), Some(Value::Optional(None)));
        assert_eq!(accessor.resolve("name"), Some(Value::from("zr")));
        assert_eq!(accessor.resolve("other"), None);
        assert_eq!(accessor.shape(), "map");
    }

    #[test]
    fn json_object_resolution() {
        let json = serde_json::json!({"age": 3});
        let object = json.as_object().unwrap();
        let accessor = Accessor::map(object);
        assert_eq!(accessor.resolve("age"), Some(Value::Int(3)));
    }

    #[test]
    fn lookup_falls_back_to_rule_names() {
        let map: BTreeMap<String, &str> = BTreeMap::from([("pwd".to_string(), "secret")]);
        let names = HashMap::from([
            ("pwd".to_string(), "pwd".to_string()),
            ("password".to_string(), "pwd".to_string()),
        ]);
        let accessor = Accessor::map(&map).with_rule_names(&names);

        assert_eq!(accessor.lookup("pwd"), Some(Some(Value::from("secret"))));
        assert_eq!(accessor.lookup("password"), Some(Some(Value::from("secret"))));
        assert_eq!(accessor.lookup("other"), None);
        assert!(accessor.knows("password"));
        assert!(!accessor.knows("other"));
    }

    #[test]
    fn missing_map_key_behind_a_rule_name_is_absent() {
        let map: HashMap<String, String> = HashMap::new();
        let names = HashMap::from([
            ("password".to_string(), "password".to_string()),
            ("pass".to_string(), "password".to_string()),
        ]);
        let accessor = Accessor::map(&map).with_rule_names(&names);

        assert_eq!(accessor.lookup("password"), Some(None));
        assert_eq!(accessor.lookup("pass"), Some(None));
        assert_eq!(accessor.lookup("token"), None);
        assert_eq!(Accessor::map(&map).lookup("password"), None);
    }

    #[test]
    fn record_lookup_requires_a_declared_source() {
        let acc = account();
        let names = HashMap::from([("alias".to_string(), "ghost".to_string())]);
        let accessor = Accessor::record(&acc).with_rule_names(&names);
        assert_eq!(accessor.lookup("alias"), None);
    }

    #[test]
    fn lookup_of_declared_but_absent_field() {
        let acc = account();
        let accessor = Accessor::record(&acc);
        assert_eq!(accessor.lookup("nickname"), Some(None));
    }

    #[test]
    fn empty_accessor_resolves_nothing() {
        let accessor = Accessor::empty();
        assert_eq!(accessor.resolve("x"), None);
        assert_eq!(accessor.lookup("x"), None);
    }
}
