/*
 *  todos.rs
 *
 *  InkList - the to-do list on the fridge door
 *
 *  To-do data model and the JSON body parser.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::collections::BTreeMap;

use log::error;
use serde::{Deserialize, Deserializer};

/// One to-do entry as delivered by the API.
///
/// A missing or null `name` is substituted with the literal `"None"` here at
/// the parse boundary, so the drawing code never sees an absent field and a
/// nameless entry still renders as `- None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToDoItem {
    #[serde(default = "missing_name", deserialize_with = "name_or_none")]
    pub name: String,

    /// Completion stamp. `null`, absent and `""` all mean outstanding.
    #[serde(rename = "doneDate", default)]
    pub done_date: Option<String>,
}

impl ToDoItem {
    /// An item counts as done once the service has stamped a non-empty
    /// `doneDate`. Outstanding items get the strike-through treatment.
    pub fn is_done(&self) -> bool {
        self.done_date.as_deref().is_some_and(|d| !d.is_empty())
    }
}

fn missing_name() -> String {
    "None".to_string()
}

fn name_or_none<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(missing_name))
}

/// Date-keyed groups of to-do items.
///
/// Keys are the API's ISO date strings, so the `BTreeMap` iterates groups
/// chronologically regardless of the order the service emitted them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ToDoCollection(BTreeMap<String, Vec<ToDoItem>>);

impl ToDoCollection {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Date groups in chronological (key) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ToDoItem])> {
        self.0.iter().map(|(date, items)| (date.as_str(), items.as_slice()))
    }

    #[allow(dead_code)]
    pub fn get(&self, date: &str) -> Option<&[ToDoItem]> {
        self.0.get(date).map(Vec::as_slice)
    }
}

/// Decode a to-do payload.
///
/// A body that fails to decode (truncated, wrong shape, not JSON at all) is
/// logged and treated as an empty collection; the run carries on and renders
/// a blank list rather than aborting.
pub fn parse_todos(body: &str) -> ToDoCollection {
    match serde_json::from_str(body) {
        Ok(todos) => todos,
        Err(e) => {
            error!("Error parsing to-do JSON: {}", e);
            ToDoCollection::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preserves_keys_and_item_counts() {
        let body = r#"{
            "2024-01-01": [{"name": "wani kani", "doneDate": null}],
            "2024-01-02": [
                {"name": "water plants", "doneDate": "2024-01-02"},
                {"name": "laundry", "doneDate": null}
            ]
        }"#;

        let todos = parse_todos(body);
        assert_eq!(todos.len(), 2);
        assert_eq!(todos.get("2024-01-01").unwrap().len(), 1);
        assert_eq!(todos.get("2024-01-02").unwrap().len(), 2);
        assert_eq!(todos.get("2024-01-01").unwrap()[0].name, "wani kani");
    }

    #[test]
    fn groups_iterate_in_date_order() {
        let body = r#"{
            "2024-03-09": [{"name": "later", "doneDate": null}],
            "2024-03-08": [{"name": "sooner", "doneDate": null}]
        }"#;

        let todos = parse_todos(body);
        let dates: Vec<&str> = todos.iter().map(|(date, _)| date).collect();
        assert_eq!(dates, vec!["2024-03-08", "2024-03-09"]);
    }

    #[test]
    fn malformed_body_yields_empty_collection() {
        for body in ["{", "", "not json", "[1, 2", "{\"a\": }"] {
            let todos = parse_todos(body);
            assert!(todos.is_empty(), "expected empty collection for {:?}", body);
        }
    }

    #[test]
    fn wrong_shape_yields_empty_collection() {
        // Syntactically valid JSON that doesn't match the schema.
        let todos = parse_todos(r#"{"2024-01-01": "not a list"}"#);
        assert!(todos.is_empty());
    }

    #[test]
    fn missing_or_null_name_becomes_none_literal() {
        let todos = parse_todos(r#"{"2024-01-01": [{"doneDate": null}, {"name": null}]}"#);
        let items = todos.get("2024-01-01").unwrap();
        assert_eq!(items[0].name, "None");
        assert_eq!(items[1].name, "None");
    }

    #[test]
    fn done_requires_a_non_empty_stamp() {
        let todos = parse_todos(
            r#"{"d": [
                {"name": "a", "doneDate": "2024-01-01"},
                {"name": "b", "doneDate": null},
                {"name": "c"},
                {"name": "d", "doneDate": ""}
            ]}"#,
        );
        let items = todos.get("d").unwrap();
        assert!(items[0].is_done());
        assert!(!items[1].is_done());
        assert!(!items[2].is_done());
        assert!(!items[3].is_done());
    }
}
