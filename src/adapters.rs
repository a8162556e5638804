use crate::model;

pub mod gcs;
pub mod mock;
pub mod s3;

// Collaborator contract for a remote object store. Methods carry a `dict_`
// prefix so the trait can be implemented directly on the SDK clients without
// shadowing their inherent request builders.
pub trait ObjectAdapter {
    fn dict_put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), model::dict::DictError>;

    // Ok(None) means the object does not exist remotely.
    fn dict_get_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, model::dict::DictError>;

    fn dict_delete_object(&self, bucket: &str, key: &str)
        -> Result<(), model::dict::DictError>;

    fn dict_list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<model::dict::ObjectMeta>, model::dict::DictError>;
}
