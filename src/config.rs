use std::{fs, path::Path};

use crate::model::dict::DictError;

// Construction parameters for the dict. `autosave` is accepted for
// compatibility with existing callers but no operation reads it.
#[derive(Clone, Debug)]
pub struct DictConfig {
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub autosave: bool,
}

impl DictConfig {
    pub fn new(
        bucket: &str,
        access_key_id: &str,
        secret_access_key: &str,
        autosave: bool,
    ) -> Result<Self, DictError> {
        let config = Self {
            bucket: bucket.to_string(),
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            autosave,
        };
        config.validate()?;

        Ok(config)
    }

    // Credentials file layout, one value per line:
    //   bucket (optionally `s3://name` or `gs://name`)
    //   access key id
    //   secret access key
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, DictError> {
        let contents = fs::read_to_string(&path).map_err(|err| DictError::Config {
            message: format!(
                "failed to read credentials file: {}, {}",
                path.as_ref().display(),
                err
            ),
        })?;

        let mut lines = contents.lines().map(|line| {
            line.split(',')
                .next()
                .unwrap_or("")
                .trim()
                .to_string()
        });

        let bucket = lines.next().unwrap_or_default();
        let access_key_id = lines.next().unwrap_or_default();
        let secret_access_key = lines.next().unwrap_or_default();

        Self::new(&bucket, &access_key_id, &secret_access_key, false)
    }

    pub fn validate(&self) -> Result<(), DictError> {
        if self.bucket.is_empty() || self.access_key_id.is_empty() || self.secret_access_key.is_empty()
        {
            return Err(DictError::Config {
                message: "bucket, access_key_id and secret_access_key must be specified"
                    .to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_validate() {
        let cases = vec![
            ("bucket", "access", "secret", true),
            ("", "access", "secret", false),
            ("bucket", "", "secret", false),
            ("bucket", "access", "", false),
            ("", "", "", false),
        ];

        for (bucket, access, secret, expected_ok) in cases {
            let result = DictConfig::new(bucket, access, secret, false);
            assert_eq!(
                result.is_ok(),
                expected_ok,
                "failed validation for case: {}/{}/{}",
                bucket,
                access,
                secret
            );
        }
    }

    #[test]
    fn test_from_csv() {
        let path = env::temp_dir().join("objectdict-credentials-test.csv");
        fs::write(&path, "s3://my-bucket\nAKIAEXAMPLE\nwJalrEXAMPLEKEY\n").unwrap();

        let config = DictConfig::from_csv(&path).unwrap();

        assert_eq!(config.bucket, "s3://my-bucket");
        assert_eq!(config.access_key_id, "AKIAEXAMPLE");
        assert_eq!(config.secret_access_key, "wJalrEXAMPLEKEY");
        assert!(!config.autosave);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_from_csv_missing_lines() {
        let path = env::temp_dir().join("objectdict-credentials-short.csv");
        fs::write(&path, "s3://my-bucket\n").unwrap();

        let result = DictConfig::from_csv(&path);
        assert!(matches!(result, Err(DictError::Config { .. })));

        fs::remove_file(&path).unwrap();
    }
}
