//! JSON output.
//!
//! Shape: `{"<code>": {"names": {"<lang>": "<name>"}, "measures": {"<codename>": {"<year>":
//! <value>}}}}`. An area without measures has no `measures` key; an empty registry is `{}`.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::{Area, Areas, Measure};

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (year, value) in self.values() {
            map.serialize_entry(&year.to_string(), &value)?;
        }
        map.end()
    }
}

struct Names<'a>(&'a Area);

impl Serialize for Names<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.names())
    }
}

struct Measures<'a>(&'a Area);

impl Serialize for Measures<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.measures().map(|m| (m.codename(), m)))
    }
}

impl Serialize for Area {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.is_empty() { 1 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        if !self.is_empty() {
            map.serialize_entry("measures", &Measures(self))?;
        }
        map.serialize_entry("names", &Names(self))?;
        map.end()
    }
}

impl Serialize for Areas {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|a| (a.code(), a)))
    }
}

impl Areas {
    /// Compact JSON rendering of the whole registry.
    pub fn to_json(&self) -> String {
        // Maps with string keys and f64 values always serialize.
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::types::{Area, Areas, Measure};

    #[test]
    fn empty_registry_is_empty_object() {
        assert_eq!(Areas::new().to_json(), "{}");
    }

    #[test]
    fn area_without_measures_omits_key() {
        let mut area = Area::new("W1");
        area.set_name("eng", "Test").unwrap();
        let mut areas = Areas::new();
        areas.set_area("W1", area);

        let v: serde_json::Value = serde_json::from_str(&areas.to_json()).unwrap();
        assert_eq!(v, json!({"W1": {"names": {"eng": "Test"}}}));
    }

    #[test]
    fn measures_are_keyed_by_codename_and_year() {
        let mut m = Measure::new("Pop", "Population");
        m.set_value(2000, 5.5);
        m.set_value(2001, 6.0);
        let mut area = Area::new("W1");
        area.set_name("cym", "Prawf").unwrap();
        area.set_measure("pop", m);
        let mut areas = Areas::new();
        areas.set_area("W1", area);

        let v: serde_json::Value = serde_json::from_str(&areas.to_json()).unwrap();
        assert_eq!(
            v,
            json!({"W1": {
                "names": {"cym": "Prawf"},
                "measures": {"pop": {"2000": 5.5, "2001": 6.0}}
            }})
        );
    }
}
