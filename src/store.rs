use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Scope-keyed state store. Only get/set semantics are promised to callers:
/// the engine reads whole values at turn start and overwrites whole values
/// at the end-of-turn flush. No partial field merges.
pub struct StateStore {
    values: DashMap<String, Value>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|v| serde_json::from_value(v.value().clone()).ok())
    }

    /// Stored value or the type's default; callers never observe absence.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.get(key).unwrap_or_default()
    }

    /// Atomic whole-value overwrite.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.values.insert(key.to_string(), v);
            }
            Err(e) => tracing::error!(key, "value not serializable, dropped: {e}"),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// User-scoped ledger key.
pub fn user_key(user: &str) -> String {
    format!("user/{user}/holidays")
}

/// Conversation-scoped dialog session key.
pub fn conversation_key(conversation: &str) -> String {
    format!("conversation/{conversation}/session")
}
