use std::cell::{
    RefCell,
    RefMut
};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use serde::Deserialize;

use super::managererror::ManagerError;

/// Every managed JSON object carries a `name` field used as its key.
#[derive(Deserialize)]
struct NamedJsonObject {
    name: String
}

pub trait IManager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>>;

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        let map = self.map();
        let elem_opt = map.get(name);
        elem_opt.map_or_else(
            || Err(ManagerError::NameNotFoundError(name.to_owned())),
            |elem| Ok(elem.clone())
        )
    }

    fn insert_obj_from_json_vec(&self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for json_value in json_vec.iter() {
            self.insert_obj_from_json(json_value.clone())?;
        }
        Ok(())
    }

    fn from_reader(&self, file_path: String) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = ManagerError::from_json_or_json_parse_error(json_value)?;
            self.insert_obj_from_json_vec(&json_array)
        } else {
            self.insert_obj_from_json(json_value)
        }
    }
}

/// Named-object registry. The stored values are produced from JSON by the
/// parser function supplied at construction.
pub struct Manager<V> {
    map_cell: RefCell<HashMap<String, V>>,
    get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>
}

impl <V> Manager<V> where
    V: Clone {
    pub fn new(get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>) -> Manager<V> {
        Manager { map_cell: RefCell::new(HashMap::new()), get_obj_from_json }
    }
}

impl <V> IManager<V> for Manager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>> {
        self.map_cell.borrow_mut()
    }

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let named_object: NamedJsonObject = ManagerError::from_json_or_json_parse_error(json_value.clone())?;
        let obj = (self.get_obj_from_json)(json_value)?;
        self.map().insert(named_object.name, obj);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn get_level_from_json(json_value: serde_json::Value) -> Result<i64, ManagerError> {
        #[derive(Deserialize)]
        struct LevelJsonProp {
            level: i64
        }
        let json_prop: LevelJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
        Ok(json_prop.level)
    }

    #[test]
    fn inserts_and_retrieves_named_objects() {
        let manager: Manager<i64> = Manager::new(get_level_from_json);
        manager
            .insert_obj_from_json_vec(&[
                json!({"name": "low", "level": 1}),
                json!({"name": "high", "level": 9})
            ])
            .unwrap();
        assert_eq!(manager.get("low").unwrap(), 1);
        assert_eq!(manager.get("high").unwrap(), 9);
    }

    #[test]
    fn missing_names_are_reported() {
        let manager: Manager<i64> = Manager::new(get_level_from_json);
        let result = manager.get("absent");
        assert!(matches!(result, Err(ManagerError::NameNotFoundError(name)) if name == "absent"));
    }

    #[test]
    fn objects_without_a_name_are_rejected() {
        let manager: Manager<i64> = Manager::new(get_level_from_json);
        let result = manager.insert_obj_from_json(json!({"level": 3}));
        assert!(matches!(result, Err(ManagerError::JsonParseError(_))));
    }
}
