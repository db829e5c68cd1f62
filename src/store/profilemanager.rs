use serde::Deserialize;

use crate::manager::manager::Manager;
use crate::manager::managererror::ManagerError;
use crate::store::breakpoint::Breakpoint;
use crate::store::segmentstore::SegmentStore;

#[derive(Deserialize)]
pub enum EditType {
    Add,
    Set
}

#[derive(Deserialize)]
struct EditJsonProp {
    edit_type: EditType,
    from: i64,
    to: i64,
    amount: i64
}

/// A named intensity profile: an optional starting breakpoint sequence,
/// then a list of edits replayed in order.
#[derive(Deserialize)]
struct ProfileJsonProp {
    #[serde(default)]
    breakpoints: Vec<(i64, i64)>,
    #[serde(default)]
    edits: Vec<serde_json::Value>
}

fn get_segment_store_from_json(json_value: serde_json::Value) -> Result<SegmentStore, ManagerError> {
    let json_prop: ProfileJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
    let mut store = SegmentStore::new();
    store.restore(
        json_prop.breakpoints
            .iter()
            .map(|&(start, value)| Breakpoint::new(start, value))
            .collect()
    );
    for edit_json in json_prop.edits.iter() {
        let edit: EditJsonProp = ManagerError::from_json_or_json_parse_error(edit_json.clone())?;
        match edit.edit_type {
            EditType::Add => store.add(edit.from, edit.to, edit.amount)?,
            EditType::Set => store.set(edit.from, edit.to, edit.amount)?
        }
    }
    Ok(store)
}

pub struct ProfileManager;

impl ProfileManager {
    pub fn new() -> Manager<SegmentStore> {
        Manager::new(get_segment_store_from_json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::manager::manager::IManager;
    use crate::store::rangeerror::RangeError;

    use super::*;

    #[test]
    fn builds_a_profile_from_breakpoints_and_edits() {
        let manager = ProfileManager::new();
        manager
            .insert_obj_from_json(json!({
                "name": "ramp",
                "breakpoints": [[-10, 3], [0, 0], [2, 8]],
                "edits": [
                    {"edit_type": "Set", "from": -5, "to": 1, "amount": 0},
                    {"edit_type": "Add", "from": 2, "to": 4, "amount": 1}
                ]
            }))
            .unwrap();
        let store = manager.get("ramp").unwrap();
        assert_eq!(store.render(), "[-10,3], [-5,0], [2,9], [4,8]");
    }

    #[test]
    fn builds_a_profile_from_edits_alone() {
        let manager = ProfileManager::new();
        manager
            .insert_obj_from_json(json!({
                "name": "pulse",
                "edits": [{"edit_type": "Add", "from": 10, "to": 30, "amount": 1}]
            }))
            .unwrap();
        assert_eq!(manager.get("pulse").unwrap().render(), "[10,1], [30,0]");
    }

    #[test]
    fn invalid_edits_surface_the_range_error() {
        let manager = ProfileManager::new();
        let result = manager.insert_obj_from_json(json!({
            "name": "broken",
            "edits": [{"edit_type": "Add", "from": 5, "to": 5, "amount": 1}]
        }));
        assert!(matches!(
            result,
            Err(ManagerError::RangeError(RangeError::EmptyRange { from: 5, to: 5 }))
        ));
    }
}
