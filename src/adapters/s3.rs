use std::time::{Duration, SystemTime};

use aws_sdk_s3::primitives::ByteStream;

use crate::{adapters, model, util};

impl adapters::ObjectAdapter for aws_sdk_s3::Client {
    fn dict_put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), model::dict::DictError> {
        let req = self
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body));

        util::poll::poll_until_ready(req.send()).map_err(|err| model::dict::DictError::Store {
            message: format!("failed to put_object at: {}, {}", key, err),
        })?;

        Ok(())
    }

    fn dict_get_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, model::dict::DictError> {
        let req = self.get_object().bucket(bucket).key(key);

        let o = match util::poll::poll_until_ready(req.send()) {
            Err(err) => {
                if let Some(svc_err) = err.as_service_error() {
                    if svc_err.is_no_such_key() {
                        return Ok(None);
                    }
                }

                return Err(model::dict::DictError::Store {
                    message: format!("failed to get_object: {}, {}", key, err),
                });
            }
            Ok(o) => o,
        };

        let bytes = util::poll::poll_until_ready(o.body.collect()).map_err(|err| {
            model::dict::DictError::Store {
                message: format!("failed to collect body: {}, {}", key, err),
            }
        })?;

        Ok(Some(bytes.into_bytes().to_vec()))
    }

    fn dict_delete_object(&self, bucket: &str, key: &str) -> Result<(), model::dict::DictError> {
        let req = self.delete_object().bucket(bucket).key(key);

        util::poll::poll_until_ready(req.send()).map_err(|err| model::dict::DictError::Store {
            message: format!("failed to delete_object: {}, {}", key, err),
        })?;

        Ok(())
    }

    fn dict_list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<model::dict::ObjectMeta>, model::dict::DictError> {
        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut req = self.list_objects_v2().bucket(bucket).prefix(prefix);

            if let Some(tok) = continuation_token {
                req = req.continuation_token(tok);
            }

            let lo = util::poll::poll_until_ready(req.send()).map_err(|err| {
                model::dict::DictError::Store {
                    message: format!("failed to list_objects at: {}, {}", prefix, err),
                }
            })?;

            for o in lo.contents() {
                let key = o.key().unwrap_or("").to_string();
                let size = o.size().unwrap_or(0);
                let modified_time = match o.last_modified() {
                    Some(lm) => {
                        SystemTime::UNIX_EPOCH + Duration::new(lm.secs() as u64, lm.subsec_nanos())
                    }
                    None => SystemTime::UNIX_EPOCH,
                };

                objects.push(model::dict::ObjectMeta {
                    key,
                    size,
                    modified_time,
                });
            }

            continuation_token = lo.next_continuation_token().map(|tok| tok.to_string());
            if continuation_token.is_none() {
                break;
            }
        }

        Ok(objects)
    }
}
