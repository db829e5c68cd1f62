use std::cell::{
    RefCell,
    RefMut
};
use std::fs::File;
use std::io::BufReader;

use serde::Deserialize;

use crate::manager::manager::{
    IManager,
    Manager
};
use crate::manager::managererror::ManagerError;
use crate::store::profilemanager::ProfileManager;
use crate::store::segmentstore::SegmentStore;

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    profile: Vec<serde_json::Value>
}

/// Top-level configuration: the registries populated from a single JSON
/// document of the form `{ "profile": [ ... ] }`.
pub struct Configuration {
    profile_manager_cell: RefCell<Manager<SegmentStore>>
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration { profile_manager_cell: RefCell::new(ProfileManager::new()) }
    }

    pub fn profile_manager(&self) -> RefMut<'_, Manager<SegmentStore>> {
        self.profile_manager_cell.borrow_mut()
    }

    pub fn from_reader(&self, file_path: String) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        let profile_manager = self.profile_manager_cell.borrow_mut();
        profile_manager.insert_obj_from_json_vec(&json_prop.profile)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::store::stepfunction::StepFunction;

    use super::*;

    #[test]
    fn loads_profiles_from_a_json_document() {
        let document = r#"{
            "profile": [
                {"name": "pulse", "edits": [{"edit_type": "Add", "from": 10, "to": 30, "amount": 1}]},
                {"name": "plateau", "breakpoints": [[-10, 3], [2, 8]]}
            ]
        }"#;
        let file_path = std::env::temp_dir().join("intensity-configuration-test.json");
        fs::write(&file_path, document).unwrap();

        let configuration = Configuration::new();
        configuration
            .from_reader(file_path.to_str().unwrap().to_owned())
            .unwrap();
        let _ = fs::remove_file(&file_path);

        let pulse = configuration.profile_manager().get("pulse").unwrap();
        assert_eq!(pulse.render(), "[10,1], [30,0]");
        let plateau = configuration.profile_manager().get("plateau").unwrap();
        assert_eq!(plateau.value_at(5), 8);
        assert_eq!(plateau.value_at(-20), 0);
    }

    #[test]
    fn missing_files_are_reported() {
        let configuration = Configuration::new();
        let result = configuration.from_reader("does-not-exist.json".to_owned());
        assert!(matches!(result, Err(ManagerError::IOError(_))));
    }
}
