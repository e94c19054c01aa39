use super::Operator;
use super::params::optional_str;
use crate::{ParamError, Params};
use md5::Md5;
use sha2::{Digest, Sha256, Sha512};

const HASH_TYPE: &str = "hash_type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HashType {
    Md5,
    Sha256,
    Sha512,
}

impl HashType {
    fn from_params(params: &Params) -> Result<Self, ParamError> {
        match optional_str(params, HASH_TYPE)? {
            None | Some("sha256") => Ok(HashType::Sha256),
            Some("sha512") => Ok(HashType::Sha512),
            Some("md5") => Ok(HashType::Md5),
            Some(other) => Err(ParamError::Constraint {
                name: HASH_TYPE.to_string(),
                constraint: format!("must be one of sha256, sha512, md5 (got '{other}')"),
            }),
        }
    }
}

/// Replaces the text with a lowercase hex digest of its UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hash;

impl Operator for Hash {
    fn name(&self) -> &str {
        "hash"
    }

    fn validate(&self, params: &Params) -> Result<(), ParamError> {
        HashType::from_params(params).map(|_| ())
    }

    fn operate(&self, text: &str, params: &Params) -> Result<String, ParamError> {
        let digest = match HashType::from_params(params)? {
            HashType::Md5 => hex::encode(Md5::digest(text.as_bytes())),
            HashType::Sha256 => hex::encode(Sha256::digest(text.as_bytes())),
            HashType::Sha512 => hex::encode(Sha512::digest(text.as_bytes())),
        };
        Ok(digest)
    }
}
