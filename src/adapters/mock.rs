use std::{
    collections::BTreeMap,
    sync::Mutex,
    time::SystemTime,
};

use crate::{adapters, model};

// In-memory stand-in for a remote bucket. BTreeMap so listings come back in
// a stable order. `fail_deletes` lets tests exercise the non-atomic pop path.
pub struct MockClient {
    pub objects: Mutex<BTreeMap<String, Vec<u8>>>,
    pub fail_deletes: bool,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            fail_deletes: false,
        }
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl adapters::ObjectAdapter for MockClient {
    fn dict_put_object(
        &self,
        _bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), model::dict::DictError> {
        let mut objects = self
            .objects
            .lock()
            .expect("failed to acquire `objects` guard");
        objects.insert(key.to_string(), body);

        Ok(())
    }

    fn dict_get_object(
        &self,
        _bucket: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, model::dict::DictError> {
        let objects = self
            .objects
            .lock()
            .expect("failed to acquire `objects` guard");

        Ok(objects.get(key).cloned())
    }

    fn dict_delete_object(&self, _bucket: &str, key: &str) -> Result<(), model::dict::DictError> {
        if self.fail_deletes {
            return Err(model::dict::DictError::Store {
                message: format!("failed to delete_object: {}", key),
            });
        }

        let mut objects = self
            .objects
            .lock()
            .expect("failed to acquire `objects` guard");
        objects.remove(key);

        Ok(())
    }

    fn dict_list_objects(
        &self,
        _bucket: &str,
        prefix: &str,
    ) -> Result<Vec<model::dict::ObjectMeta>, model::dict::DictError> {
        let objects = self
            .objects
            .lock()
            .expect("failed to acquire `objects` guard");

        let mut listing = Vec::new();
        for (key, body) in objects.iter() {
            if !key.starts_with(prefix) {
                continue;
            }

            listing.push(model::dict::ObjectMeta {
                key: key.clone(),
                size: body.len() as i64,
                modified_time: SystemTime::now(),
            });
        }

        Ok(listing)
    }
}
