use std::time::{Duration, SystemTime};

use google_cloud_storage::http::objects::{
    delete::DeleteObjectRequest,
    download::Range,
    get::GetObjectRequest,
    list::ListObjectsRequest,
    upload::{Media, UploadObjectRequest, UploadType},
};

use crate::{adapters, model, util};

impl adapters::ObjectAdapter for google_cloud_storage::client::Client {
    fn dict_put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), model::dict::DictError> {
        let req = UploadObjectRequest {
            bucket: bucket.to_string(),
            ..Default::default()
        };

        util::poll::poll_until_ready(self.upload_object(
            &req,
            body,
            &UploadType::Simple(Media::new(key.to_string())),
        ))
        .map_err(|err| model::dict::DictError::Store {
            message: format!("failed to put_object at: {}, {}", key, err),
        })?;

        Ok(())
    }

    fn dict_get_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, model::dict::DictError> {
        let req = GetObjectRequest {
            bucket: bucket.to_string(),
            object: key.to_string(),
            ..Default::default()
        };

        let bytes = match util::poll::poll_until_ready(self.download_object(&req, &Range::default()))
        {
            Err(google_cloud_storage::http::Error::Response(err)) => {
                if err.code == 404 {
                    return Ok(None);
                }

                return Err(model::dict::DictError::Store {
                    message: format!("failed to get_object: {}, {}", key, err),
                });
            }
            Err(err) => {
                return Err(model::dict::DictError::Store {
                    message: format!("failed to get_object: {}, {}", key, err),
                });
            }
            Ok(bytes) => bytes,
        };

        Ok(Some(bytes))
    }

    fn dict_delete_object(&self, bucket: &str, key: &str) -> Result<(), model::dict::DictError> {
        let req = DeleteObjectRequest {
            bucket: bucket.to_string(),
            object: key.to_string(),
            ..Default::default()
        };

        util::poll::poll_until_ready(self.delete_object(&req)).map_err(|err| {
            model::dict::DictError::Store {
                message: format!("failed to delete_object: {}, {}", key, err),
            }
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
            let req = ListObjectsRequest {
                bucket: bucket.to_string(),
                prefix: Some(prefix.to_string()),
                page_token: continuation_token.clone(),
                ..Default::default()
            };

            let lo = util::poll::poll_until_ready(self.list_objects(&req)).map_err(|err| {
                model::dict::DictError::Store {
                    message: format!("failed to list_objects at: {}, {}", prefix, err),
                }
            })?;

            if let Some(objs) = lo.items {
                for obj in objs {
                    let modified_time = SystemTime::UNIX_EPOCH
                        + Duration::from_secs(
                            obj.updated
                                .unwrap_or(time::OffsetDateTime::now_utc())
                                .unix_timestamp() as u64,
                        );

                    objects.push(model::dict::ObjectMeta {
                        key: obj.name,
                        size: obj.size,
                        modified_time,
                    });
                }
            }

            continuation_token = lo.next_page_token;
            if continuation_token.is_none() {
                break;
            }
        }

        Ok(objects)
    }
}
