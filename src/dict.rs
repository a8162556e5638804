use tracing::{info, span, Level};

use crate::{adapters, config, model, util};

// Dict-style facade over a single remote bucket. Holds no object bodies;
// the only local state is the listing snapshot, captured at construction
// and re-fetched after every mutation. Single-writer: a listing refreshed
// here can still go stale against mutations made by another actor.
pub struct ObjectDict {
    client: Box<dyn adapters::ObjectAdapter>,
    bucket: String,
    listing: Vec<model::dict::ObjectMeta>,
    _autosave: bool,
}

impl ObjectDict {
    pub fn new(
        client: Box<dyn adapters::ObjectAdapter>,
        config: &config::DictConfig,
    ) -> Result<Self, model::dict::DictError> {
        config.validate()?;

        let bucket = util::bucket::parse_bucket_from_uri(&config.bucket).to_string();
        let listing = client.dict_list_objects(&bucket, "")?;

        Ok(Self {
            client,
            bucket,
            listing,
            _autosave: config.autosave,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    // Checks the cached listing only, zero round trips. A key written
    // remotely since the last refresh reads as absent.
    pub fn contains(&self, key: &str) -> bool {
        self.listing.iter().any(|o| o.key == key)
    }

    pub fn get(&self, key: &str) -> Result<Vec<u8>, model::dict::DictError> {
        let span = span!(Level::INFO, "get", context = "get");
        let _e = span.enter();
        info!(key = key, "called");

        if !self.contains(key) {
            return Err(model::dict::DictError::KeyNotFound {
                key: key.to_string(),
            });
        }

        match self.client.dict_get_object(&self.bucket, key)? {
            Some(bytes) => Ok(bytes),
            // In the cache but gone remotely: the listing went stale. Report
            // it the same way as a cache miss.
            None => Err(model::dict::DictError::KeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    pub fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), model::dict::DictError> {
        let span = span!(Level::INFO, "put", context = "put");
        let _e = span.enter();
        info!(key = key, size = value.len(), "called");

        self.client.dict_put_object(&self.bucket, key, value)?;
        self.refresh()?;

        Ok(())
    }

    pub fn delete(&mut self, key: &str) -> Result<(), model::dict::DictError> {
        let span = span!(Level::INFO, "delete", context = "delete");
        let _e = span.enter();
        info!(key = key, "called");

        self.client.dict_delete_object(&self.bucket, key)?;
        self.refresh()?;

        Ok(())
    }

    // get then delete then refresh. Not atomic: if the delete fails after a
    // successful get, the error is returned and the key may still exist.
    pub fn pop(&mut self, key: &str) -> Result<Vec<u8>, model::dict::DictError> {
        let span = span!(Level::INFO, "pop", context = "pop");
        let _e = span.enter();
        info!(key = key, "called");

        let value = self.get(key)?;
        self.client.dict_delete_object(&self.bucket, key)?;
        self.refresh()?;

        Ok(value)
    }

    pub fn keys(&self, prefix: &str) -> Vec<String> {
        self.listing
            .iter()
            .filter(|o| o.key.starts_with(prefix))
            .map(|o| o.key.clone())
            .collect()
    }

    // One download round trip per matching key.
    pub fn items(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, model::dict::DictError> {
        let span = span!(Level::INFO, "items", context = "items");
        let _e = span.enter();
        info!(prefix = prefix, "called");

        let mut pairs = Vec::new();
        for key in self.keys(prefix) {
            match self.client.dict_get_object(&self.bucket, &key)? {
                Some(bytes) => pairs.push((key, bytes)),
                None => {
                    return Err(model::dict::DictError::KeyNotFound { key });
                }
            }
        }

        Ok(pairs)
    }

    fn refresh(&mut self) -> Result<(), model::dict::DictError> {
        self.listing = self.client.dict_list_objects(&self.bucket, "")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;
    use crate::adapters::mock::MockClient;
    use crate::model::dict::DictError;

    fn new_dict(client: MockClient) -> ObjectDict {
        let config =
            config::DictConfig::new("s3://dummy-bucket", "dummy-access", "dummy-secret", false)
                .unwrap();

        ObjectDict::new(Box::new(client), &config).unwrap()
    }

    #[test]
    fn test_new_rejects_missing_credentials() {
        let config = config::DictConfig {
            bucket: "dummy-bucket".to_string(),
            access_key_id: "".to_string(),
            secret_access_key: "dummy-secret".to_string(),
            autosave: false,
        };

        let result = ObjectDict::new(Box::new(MockClient::new()), &config);
        assert!(matches!(result, Err(DictError::Config { .. })));
    }

    #[test]
    fn test_new_populates_listing() {
        let client = MockClient::new();
        client
            .objects
            .lock()
            .unwrap()
            .insert("existing".to_string(), vec![1, 2, 3]);

        let dict = new_dict(client);

        assert!(dict.contains("existing"));
        assert_eq!(dict.bucket(), "dummy-bucket");
    }

    #[test]
    fn test_get_missing_key() {
        let dict = new_dict(MockClient::new());

        assert!(!dict.contains("nope"));
        assert!(matches!(
            dict.get("nope"),
            Err(DictError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_put_then_get_roundtrip() {
        let mut dict = new_dict(MockClient::new());

        let cases = vec![
            ("empty", vec![]),
            ("small", vec![0u8, 1, 2, 3]),
            ("binary", vec![0xff, 0x00, 0xfe, 0x01]),
        ];

        for (key, value) in cases {
            dict.put(key, value.clone()).unwrap();

            assert!(dict.contains(key), "failed contains for case: {}", key);
            assert_eq!(
                dict.get(key).unwrap(),
                value,
                "failed roundtrip for case: {}",
                key
            );
        }
    }

    #[test]
    fn test_put_overwrites() {
        let mut dict = new_dict(MockClient::new());

        dict.put("key", b"v1".to_vec()).unwrap();
        dict.put("key", b"v1".to_vec()).unwrap();
        assert_eq!(dict.get("key").unwrap(), b"v1".to_vec());

        dict.put("key", b"v2".to_vec()).unwrap();
        assert_eq!(dict.get("key").unwrap(), b"v2".to_vec());
        assert_eq!(dict.keys("").len(), 1);
    }

    #[test]
    fn test_pop() {
        let mut dict = new_dict(MockClient::new());

        dict.put("key", b"value".to_vec()).unwrap();

        let popped = dict.pop("key").unwrap();
        assert_eq!(popped, b"value".to_vec());
        assert!(!dict.contains("key"));

        assert!(matches!(
            dict.pop("key"),
            Err(DictError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_pop_delete_failure_keeps_error() {
        let client = MockClient {
            objects: Mutex::new(BTreeMap::from([("key".to_string(), b"value".to_vec())])),
            fail_deletes: true,
        };
        let mut dict = new_dict(client);

        assert!(matches!(dict.pop("key"), Err(DictError::Store { .. })));
        // The value was fetched but the delete failed, so the key survives.
        assert!(dict.contains("key"));
    }

    #[test]
    fn test_delete_then_contains() {
        let mut dict = new_dict(MockClient::new());

        dict.put("key", b"value".to_vec()).unwrap();
        dict.delete("key").unwrap();

        assert!(!dict.contains("key"));
    }

    #[test]
    fn test_keys_prefix_filter() {
        let mut dict = new_dict(MockClient::new());

        dict.put("apple", b"1".to_vec()).unwrap();
        dict.put("acorn", b"2".to_vec()).unwrap();
        dict.put("bob", b"3".to_vec()).unwrap();

        let cases = vec![
            ("", vec!["acorn", "apple", "bob"]),
            ("a", vec!["acorn", "apple"]),
            ("b", vec!["bob"]),
            ("z", vec![]),
        ];

        for (prefix, expected) in cases {
            let mut keys = dict.keys(prefix);
            keys.sort();

            assert_eq!(keys, expected, "failed keys for case: {}", prefix);
        }
    }

    #[test]
    fn test_items_prefix_filter() {
        let mut dict = new_dict(MockClient::new());

        dict.put("apple", b"1".to_vec()).unwrap();
        dict.put("bob", b"3".to_vec()).unwrap();

        let items = dict.items("b").unwrap();
        assert_eq!(items, vec![("bob".to_string(), b"3".to_vec())]);

        let mut all = dict.items("").unwrap();
        all.sort();
        assert_eq!(
            all,
            vec![
                ("apple".to_string(), b"1".to_vec()),
                ("bob".to_string(), b"3".to_vec()),
            ]
        );
    }

    #[test]
    fn test_scenario_apple_acorn_bob() {
        let mut dict = new_dict(MockClient::new());

        dict.put("apple", b"b1".to_vec()).unwrap();
        dict.put("acorn", b"b2".to_vec()).unwrap();
        dict.put("bob", b"b3".to_vec()).unwrap();

        let mut keys = dict.keys("");
        keys.sort();
        assert_eq!(keys, vec!["acorn", "apple", "bob"]);

        let mut keys_a = dict.keys("a");
        keys_a.sort();
        assert_eq!(keys_a, vec!["acorn", "apple"]);

        let items_b = dict.items("b").unwrap();
        assert_eq!(items_b, vec![("bob".to_string(), b"b3".to_vec())]);

        let popped = dict.pop("apple").unwrap();
        assert_eq!(popped, b"b1".to_vec());

        let mut remaining = dict.keys("");
        remaining.sort();
        assert_eq!(remaining, vec!["acorn", "bob"]);
    }

    #[test]
    fn test_stale_listing_normalizes_to_key_not_found() {
        let mut dict = new_dict(MockClient::new());

        dict.put("key", b"value".to_vec()).unwrap();

        // Simulate another actor deleting the object behind the dict's back:
        // the key is still in the cached listing but gone remotely.
        {
            let client = &dict.client;
            let _ = client.dict_delete_object("dummy-bucket", "key");
        }

        assert!(dict.contains("key"));
        assert!(matches!(
            dict.get("key"),
            Err(DictError::KeyNotFound { .. })
        ));
        assert!(matches!(
            dict.items(""),
            Err(DictError::KeyNotFound { .. })
        ));
    }
}
