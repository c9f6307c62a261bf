use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Item name to quantity mapping that remembers insertion order.
///
/// Reports, low-stock queries and the data file all walk items in the order
/// they first appeared. Updating an existing item keeps its position. Every
/// stored value is an `i64` number; decoding rejects anything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Entries(Map<String, Value>);

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, item: &str) -> Option<i64> {
        self.0.get(item).and_then(Value::as_i64)
    }

    pub fn insert(&mut self, item: &str, quantity: i64) {
        self.0.insert(item.to_string(), Value::from(quantity));
    }

    pub fn remove(&mut self, item: &str) -> Option<i64> {
        self.0.shift_remove(item).as_ref().and_then(Value::as_i64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.0
            .iter()
            .filter_map(|(item, quantity)| Some((item.as_str(), quantity.as_i64()?)))
    }
}

impl TryFrom<Map<String, Value>> for Entries {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        if let Some((item, value)) = map.iter().find(|(_, value)| !value.is_i64()) {
            return Err(format!("quantity of {:?} is not an integer: {}", item, value));
        }
        Ok(Entries(map))
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for Entries {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut entries = Entries::new();
        for (item, quantity) in iter {
            let item: String = item.into();
            entries.insert(&item, quantity);
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_insertion_position() {
        let mut entries = Entries::new();
        entries.insert("pear", 1);
        entries.insert("apple", 2);
        entries.insert("pear", 9);

        let items: Vec<_> = entries.iter().collect();
        assert_eq!(items, vec![("pear", 9), ("apple", 2)]);
    }

    #[test]
    fn removed_item_goes_to_the_back_when_reinserted() {
        let mut entries: Entries = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(entries.remove("a"), Some(1));
        assert_eq!(entries.remove("a"), None);
        entries.insert("a", 4);

        let names: Vec<_> = entries.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn json_preserves_file_order() {
        let entries: Entries = serde_json::from_str(r#"{"zeta": 1, "alpha": -4}"#).unwrap();
        let items: Vec<_> = entries.iter().collect();
        assert_eq!(items, vec![("zeta", 1), ("alpha", -4)]);

        assert_eq!(serde_json::to_string(&entries).unwrap(), r#"{"zeta":1,"alpha":-4}"#);
    }

    #[test]
    fn non_integer_quantities_are_rejected() {
        assert!(serde_json::from_str::<Entries>(r#"{"apple": "ten"}"#).is_err());
        assert!(serde_json::from_str::<Entries>(r#"{"apple": 1.5}"#).is_err());
        assert!(serde_json::from_str::<Entries>(r#"{"apple": 18446744073709551615}"#).is_err());
        assert!(serde_json::from_str::<Entries>("[1, 2]").is_err());
    }
}
