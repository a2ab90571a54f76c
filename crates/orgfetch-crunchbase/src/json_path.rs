//! Typed optional-path lookups over an untyped JSON document.
//!
//! A [`JsonPath`] remembers where it points so a type mismatch can name the
//! offending key. Missing keys descend to an absent value instead of failing.
//! A value of the wrong JSON type is an error, and that includes a `null`
//! standing where an object or array is expected.

use serde_json::Value;

use crate::error::ExtractError;

#[derive(Debug, Clone)]
pub struct JsonPath<'a> {
    /// `None` when the key does not exist at all.
    value: Option<&'a Value>,
    path: String,
}

impl<'a> JsonPath<'a> {
    #[must_use]
    pub fn root(value: &'a Value) -> Self {
        Self {
            value: Some(value),
            path: "$".to_owned(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `true` when the key was not present in its parent.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }

    /// Fails unless the value is present and an object.
    ///
    /// # Errors
    ///
    /// [`ExtractError::ShapeMismatch`] naming this path.
    pub fn require_object(&self) -> Result<(), ExtractError> {
        match self.value {
            Some(Value::Object(_)) => Ok(()),
            other => Err(self.mismatch("object", other)),
        }
    }

    /// Descends into `key`, treating an absent parent as an empty mapping.
    ///
    /// # Errors
    ///
    /// [`ExtractError::ShapeMismatch`] if this value is present but not an
    /// object (`null` included).
    pub fn field(&self, key: &str) -> Result<JsonPath<'a>, ExtractError> {
        let child = match self.value {
            None => None,
            Some(Value::Object(map)) => map.get(key),
            other => return Err(self.mismatch("object", other)),
        };
        Ok(JsonPath {
            value: child,
            path: format!("{}.{key}", self.path),
        })
    }

    /// Follows `keys` in order, one [`Self::field`] call per key.
    ///
    /// # Errors
    ///
    /// [`ExtractError::ShapeMismatch`] at the first non-object on the way down.
    pub fn descend(&self, keys: &[&str]) -> Result<JsonPath<'a>, ExtractError> {
        keys.iter()
            .try_fold(self.clone(), |current, key| current.field(key))
    }

    /// # Errors
    ///
    /// [`ExtractError::ShapeMismatch`] if the value is present but not a string.
    pub fn as_str(&self) -> Result<Option<&'a str>, ExtractError> {
        match self.value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            other => Err(self.mismatch("string", other)),
        }
    }

    /// `true` only for a string equal to `expected`; any other type is simply unequal.
    #[must_use]
    pub fn eq_str(&self, expected: &str) -> bool {
        matches!(self.value, Some(Value::String(s)) if s == expected)
    }

    /// Shorthand for `descend(keys)?.as_str()` returning an owned string.
    ///
    /// # Errors
    ///
    /// [`ExtractError::ShapeMismatch`] from either step.
    pub fn string_at(&self, keys: &[&str]) -> Result<Option<String>, ExtractError> {
        Ok(self.descend(keys)?.as_str()?.map(str::to_owned))
    }

    /// Array elements, each carrying an indexed path. Absent is an empty array.
    ///
    /// # Errors
    ///
    /// [`ExtractError::ShapeMismatch`] if the value is present but not an
    /// array (`null` included).
    pub fn elements(&self) -> Result<Vec<JsonPath<'a>>, ExtractError> {
        match self.value {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .enumerate()
                .map(|(i, item)| JsonPath {
                    value: Some(item),
                    path: format!("{}[{i}]", self.path),
                })
                .collect()),
            other => Err(self.mismatch("array", other)),
        }
    }

    fn mismatch(&self, expected: &'static str, found: Option<&Value>) -> ExtractError {
        ExtractError::ShapeMismatch {
            path: self.path.clone(),
            expected,
            found: kind_of(found),
        }
    }
}

fn kind_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
